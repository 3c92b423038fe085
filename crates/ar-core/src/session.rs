//! The single interaction controller for one page/session.
//!
//! Owns placement, layer selection, user transform adjustments, organ
//! metadata and the transient message slot. The front-end constructs one on
//! load and forwards DOM and XR events into it.

use crate::camera::{Camera, Viewport};
use crate::config::ViewerConfig;
use crate::constants::{MESSAGE_TTL_SEC, PREVIEW_MODEL_POSITION};
use crate::error::ViewerError;
use crate::layers::{Layer, LayerVisibility};
use crate::organ::OrganCatalog;
use crate::picker::{PickOutcome, SelectionPicker};
use crate::placement::{
    clamp_scale, wrap_degrees, CandidateUpdate, ModelTransform, PlacementController,
    UserAdjustments,
};
use crate::pose::Pose;
use crate::scene::SceneGraph;
use crate::tooltip::TooltipContent;
use glam::{Quat, Vec3};
use instant::Instant;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Warning,
    Blocking,
}

#[derive(Clone, Debug)]
pub struct UserMessage {
    pub kind: MessageKind,
    pub text: String,
    pub shown_at: Instant,
}

impl UserMessage {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn from_error(err: &ViewerError) -> Self {
        let kind = if err.is_blocking() {
            MessageKind::Blocking
        } else {
            MessageKind::Warning
        };
        Self::new(kind, err.user_message())
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        if self.kind == MessageKind::Blocking || now < self.shown_at {
            return false;
        }
        now.duration_since(self.shown_at) >= Duration::from_secs_f32(MESSAGE_TTL_SEC)
    }
}

#[derive(Debug)]
pub struct ViewerSession {
    config: ViewerConfig,
    placement: PlacementController,
    layers: LayerVisibility,
    adjust: UserAdjustments,
    catalog: OrganCatalog,
    picker: SelectionPicker,
    message: Option<UserMessage>,
    selection: Option<TooltipContent>,
    ar_active: bool,
    ar_requested: bool,
}

impl ViewerSession {
    pub fn new(config: ViewerConfig) -> Self {
        let layers = LayerVisibility::new(config.initial_layer);
        Self {
            config,
            placement: PlacementController::new(),
            layers,
            adjust: UserAdjustments::default(),
            catalog: OrganCatalog::empty(),
            picker: SelectionPicker::new(),
            message: None,
            selection: None,
            ar_active: false,
            ar_requested: false,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn placement(&self) -> &PlacementController {
        &self.placement
    }

    pub fn layers(&self) -> &LayerVisibility {
        &self.layers
    }

    pub fn adjustments(&self) -> UserAdjustments {
        self.adjust
    }

    pub fn catalog(&self) -> &OrganCatalog {
        &self.catalog
    }

    pub fn selection(&self) -> Option<&TooltipContent> {
        self.selection.as_ref()
    }

    pub fn message(&self) -> Option<&UserMessage> {
        self.message.as_ref()
    }

    pub fn ar_active(&self) -> bool {
        self.ar_active
    }

    pub fn controls_enabled(&self) -> bool {
        self.placement.is_placed()
    }

    pub fn set_catalog(&mut self, catalog: OrganCatalog) {
        log::info!("[meta] {} organ records loaded", catalog.len());
        self.catalog = catalog;
    }

    /// Apply the one-shot metadata fetch result. Failure degrades to an empty
    /// catalog and a warning; it never blocks the viewer.
    pub fn on_metadata_result(&mut self, result: Result<OrganCatalog, ViewerError>) {
        match result {
            Ok(catalog) => self.set_catalog(catalog),
            Err(e) => {
                log::warn!("[meta] {}", e);
                self.catalog = OrganCatalog::empty();
                self.report(&e);
            }
        }
    }

    pub fn report(&mut self, err: &ViewerError) {
        self.message = Some(UserMessage::from_error(err));
    }

    pub fn expire_message(&mut self, now: Instant) -> bool {
        if self.message.as_ref().is_some_and(|m| m.is_expired(now)) {
            self.message = None;
            return true;
        }
        false
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Claim the single in-flight session request. Returns `false` while a
    /// request is pending or a session is already running.
    pub fn request_ar(&mut self) -> bool {
        if self.ar_active || self.ar_requested {
            log::debug!("[xr] session request ignored, one is pending or active");
            return false;
        }
        self.ar_requested = true;
        true
    }

    /// The pending request was refused; the page stays in its pre-session state.
    pub fn ar_request_failed(&mut self, err: &ViewerError) {
        self.ar_requested = false;
        self.report(err);
    }

    pub fn begin_ar<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) {
        self.ar_requested = false;
        self.ar_active = true;
        self.placement.reset();
        self.clear_selection();
        scene.set_model_visible(false);
        log::info!("[xr] session started, searching for surface");
    }

    /// Session ended: the only cancellation point. Placement is reset and the
    /// model hidden.
    pub fn end_ar<S: SceneGraph + ?Sized>(&mut self, scene: &mut S) {
        self.ar_active = false;
        self.ar_requested = false;
        self.placement.reset();
        self.clear_selection();
        scene.set_model_visible(false);
        log::info!("[xr] session ended, placement reset");
    }

    pub fn on_candidate_pose(&mut self, pose: Option<Pose>) -> CandidateUpdate {
        self.placement.on_candidate_pose(pose)
    }

    pub fn confirm_placement<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
    ) -> Result<Pose, ViewerError> {
        let anchor = match self.placement.confirm_placement() {
            Ok(p) => p,
            Err(e) => {
                log::info!("[place] {}", e);
                self.report(&e);
                return Err(e);
            }
        };
        if self.config.reset_layer_on_place {
            self.layers.select(self.config.initial_layer);
        }
        self.apply_layers(scene);
        self.apply_transform(scene);
        scene.set_model_visible(true);
        self.clear_message();
        Ok(anchor)
    }

    /// Non-AR mode: place the model in front of the fixed preview camera.
    pub fn place_preview<S: SceneGraph + ?Sized>(
        &mut self,
        scene: &mut S,
    ) -> Result<Pose, ViewerError> {
        let pose = Pose::new(Vec3::from_array(PREVIEW_MODEL_POSITION), Quat::IDENTITY);
        self.placement.reset();
        _ = self.placement.on_candidate_pose(Some(pose));
        self.confirm_placement(scene)
    }

    pub fn model_transform(&self) -> Option<ModelTransform> {
        self.placement
            .anchor()
            .map(|a| ModelTransform::with_adjustments(a, self.adjust))
    }

    pub fn select_layer<S: SceneGraph + ?Sized>(&mut self, layer: Layer, scene: &mut S) -> bool {
        if !self.controls_enabled() {
            return false;
        }
        if self.layers.select(layer) {
            self.clear_selection();
            log::info!("[layers] showing {}", layer);
        }
        self.apply_layers(scene);
        true
    }

    pub fn set_scale<S: SceneGraph + ?Sized>(&mut self, scale: f32, scene: &mut S) {
        self.adjust.scale = clamp_scale(scale, self.config.min_scale, self.config.max_scale);
        self.apply_transform(scene);
    }

    pub fn set_yaw_degrees<S: SceneGraph + ?Sized>(&mut self, degrees: f32, scene: &mut S) {
        self.adjust.yaw_degrees = wrap_degrees(degrees);
        self.apply_transform(scene);
    }

    /// Tap on the canvas. Updates the current selection and reports whether
    /// an organ was hit.
    pub fn tap<S: SceneGraph + ?Sized>(
        &mut self,
        x: f32,
        y: f32,
        camera: &Camera,
        viewport: &Viewport,
        scene: &S,
    ) -> PickOutcome {
        let outcome = self.picker.pick_outcome(
            &self.placement,
            x,
            y,
            camera,
            viewport,
            &self.layers,
            scene,
        );
        self.selection = match outcome {
            PickOutcome::Selected(id) => Some(TooltipContent::for_organ(id, &self.catalog)),
            PickOutcome::Nothing => None,
        };
        outcome
    }

    fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn apply_layers<S: SceneGraph + ?Sized>(&self, scene: &mut S) {
        for (layer, visible) in self.layers.iter() {
            scene.set_layer_visible(layer, visible);
        }
    }

    fn apply_transform<S: SceneGraph + ?Sized>(&self, scene: &mut S) {
        if let Some(t) = self.model_transform() {
            scene.set_model_transform(&t);
        }
    }
}
