//! Organ picking: screen point -> ray -> nearest visible part -> organ id.

use crate::camera::{Camera, Viewport};
use crate::layers::LayerVisibility;
use crate::organ::{match_keyword, OrganId};
use crate::placement::PlacementController;
use crate::scene::{PartId, RayHit, SceneGraph, ScenePart};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickOutcome {
    Selected(OrganId),
    Nothing,
}

impl From<Option<OrganId>> for PickOutcome {
    fn from(value: Option<OrganId>) -> Self {
        match value {
            Some(id) => PickOutcome::Selected(id),
            None => PickOutcome::Nothing,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionPicker;

impl SelectionPicker {
    pub fn new() -> Self {
        Self
    }

    /// Organ under the client point `(x, y)`, restricted to visible layers.
    ///
    /// Always `None` before placement is confirmed.
    #[allow(clippy::too_many_arguments)]
    pub fn pick<S: SceneGraph + ?Sized>(
        &self,
        placement: &PlacementController,
        x: f32,
        y: f32,
        camera: &Camera,
        viewport: &Viewport,
        visibility: &LayerVisibility,
        scene: &S,
    ) -> Option<OrganId> {
        if !placement.is_placed() {
            return None;
        }
        let ray = camera.ray_from_screen(viewport, x, y)?;
        let candidates = candidate_parts(visibility, scene);
        if candidates.is_empty() {
            return None;
        }
        let hit = nearest_hit(scene.cast_ray(&ray, &candidates))?;
        let part = scene.part(hit.part)?;
        let organ = resolve_organ(part, scene);
        log::info!(
            "[pick] part '{}' at {:.3} -> {}",
            hit.name,
            hit.distance,
            organ
        );
        Some(organ)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pick_outcome<S: SceneGraph + ?Sized>(
        &self,
        placement: &PlacementController,
        x: f32,
        y: f32,
        camera: &Camera,
        viewport: &Viewport,
        visibility: &LayerVisibility,
        scene: &S,
    ) -> PickOutcome {
        self.pick(placement, x, y, camera, viewport, visibility, scene)
            .into()
    }
}

pub fn candidate_parts<S: SceneGraph + ?Sized>(
    visibility: &LayerVisibility,
    scene: &S,
) -> Vec<PartId> {
    scene
        .leaf_parts()
        .iter()
        .filter(|p| {
            scene
                .layer_of(p)
                .map(|layer| visibility.is_visible(layer))
                .unwrap_or(false)
        })
        .map(|p| p.id)
        .collect()
}

pub fn nearest_hit(hits: Vec<RayHit>) -> Option<RayHit> {
    hits.into_iter()
        .filter(|h| h.distance.is_finite() && h.distance >= 0.0)
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Keyword on the part name, then on its immediate owner, then the named
/// part list by node identity, then `body`.
pub fn resolve_organ<S: SceneGraph + ?Sized>(part: &ScenePart, scene: &S) -> OrganId {
    match_keyword(&part.name)
        .or_else(|| part.immediate_owner().and_then(match_keyword))
        .or_else(|| scene.named_organ(part.id))
        .unwrap_or(OrganId::Body)
}
