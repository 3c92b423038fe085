//! Surface placement: turns a noisy stream of candidate surface poses into a
//! single frozen anchor.
//!
//! After confirmation the anchor is decoupled from tracking. The live pose
//! stream keeps arriving every frame but no longer moves the model.

use crate::constants::{DEFAULT_MODEL_SCALE, MAX_MODEL_SCALE, MIN_MODEL_SCALE};
use crate::error::ViewerError;
use crate::pose::Pose;
use glam::{Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlacementState {
    #[default]
    Searching,
    Placed,
}

/// Notification produced for every candidate-pose update.
///
/// Callers react to `Appeared`/`Lost` (reticle and place-button visibility)
/// instead of polling the controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CandidateUpdate {
    Ignored,
    Appeared,
    Moved,
    Lost,
    Unchanged,
}

impl CandidateUpdate {
    /// `Some(visible)` when reticle visibility flipped.
    pub fn visibility_change(self) -> Option<bool> {
        match self {
            CandidateUpdate::Appeared => Some(true),
            CandidateUpdate::Lost => Some(false),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct PlacementController {
    state: PlacementState,
    candidate: Option<Pose>,
    anchor: Option<Pose>,
}

impl PlacementController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlacementState {
        self.state
    }

    pub fn is_placed(&self) -> bool {
        self.state == PlacementState::Placed
    }

    pub fn candidate(&self) -> Option<Pose> {
        self.candidate
    }

    pub fn anchor(&self) -> Option<Pose> {
        self.anchor
    }

    pub fn on_candidate_pose(&mut self, pose: Option<Pose>) -> CandidateUpdate {
        if self.is_placed() {
            return CandidateUpdate::Ignored;
        }
        let had = self.candidate.is_some();
        self.candidate = pose;
        match (had, pose.is_some()) {
            (false, true) => CandidateUpdate::Appeared,
            (true, true) => CandidateUpdate::Moved,
            (true, false) => CandidateUpdate::Lost,
            (false, false) => CandidateUpdate::Unchanged,
        }
    }

    pub fn confirm_placement(&mut self) -> Result<Pose, ViewerError> {
        if self.is_placed() {
            return Err(ViewerError::AlreadyPlaced);
        }
        let pose = self.candidate.ok_or(ViewerError::NoSurfaceDetected)?;
        self.anchor = Some(pose);
        self.candidate = None;
        self.state = PlacementState::Placed;
        log::info!(
            "[place] anchored at ({:.2},{:.2},{:.2})",
            pose.position.x,
            pose.position.y,
            pose.position.z
        );
        Ok(pose)
    }

    pub fn reset(&mut self) {
        self.state = PlacementState::Searching;
        self.candidate = None;
        self.anchor = None;
    }
}

/// World transform of the model: the frozen anchor plus user adjustments.
///
/// Yaw spins the model about the anchor's up axis and scale is uniform. With
/// the defaults (yaw 0, scale 1) the world transform is the anchor itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelTransform {
    pub anchor: Pose,
    yaw_radians: f32,
    scale: f32,
}

impl ModelTransform {
    pub fn new(anchor: Pose) -> Self {
        Self {
            anchor,
            yaw_radians: 0.0,
            scale: DEFAULT_MODEL_SCALE,
        }
    }

    pub fn with_adjustments(anchor: Pose, adjust: UserAdjustments) -> Self {
        let mut t = Self::new(anchor);
        t.set_scale(adjust.scale);
        t.set_yaw_degrees(adjust.yaw_degrees);
        t
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn yaw_degrees(&self) -> f32 {
        self.yaw_radians.to_degrees()
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.scale = clamp_scale(scale, MIN_MODEL_SCALE, MAX_MODEL_SCALE);
    }

    pub fn set_yaw_degrees(&mut self, degrees: f32) {
        self.yaw_radians = wrap_degrees(degrees).to_radians();
    }

    pub fn world_pose(&self) -> Pose {
        if self.yaw_radians == 0.0 {
            return self.anchor;
        }
        Pose::new(
            self.anchor.position,
            (self.anchor.orientation * Quat::from_rotation_y(self.yaw_radians)).normalize(),
        )
    }

    pub fn to_matrix(&self) -> Mat4 {
        let pose = self.world_pose();
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), pose.orientation, pose.position)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UserAdjustments {
    pub scale: f32,
    pub yaw_degrees: f32,
}

impl Default for UserAdjustments {
    fn default() -> Self {
        Self {
            scale: DEFAULT_MODEL_SCALE,
            yaw_degrees: 0.0,
        }
    }
}

#[inline]
pub fn clamp_scale(scale: f32, min: f32, max: f32) -> f32 {
    if !scale.is_finite() {
        return DEFAULT_MODEL_SCALE.clamp(min, max);
    }
    scale.clamp(min, max)
}

#[inline]
pub fn wrap_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let w = degrees.rem_euclid(360.0);
    if w >= 360.0 {
        0.0
    } else {
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_degrees_stays_in_range() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert!((wrap_degrees(-90.0) - 270.0).abs() < 1e-4);
        assert!((wrap_degrees(725.0) - 5.0).abs() < 1e-3);
        assert_eq!(wrap_degrees(f32::NAN), 0.0);
    }

    #[test]
    fn scale_is_clamped() {
        let mut t = ModelTransform::new(Pose::IDENTITY);
        t.set_scale(100.0);
        assert_eq!(t.scale(), MAX_MODEL_SCALE);
        t.set_scale(0.0);
        assert_eq!(t.scale(), MIN_MODEL_SCALE);
        t.set_scale(f32::INFINITY);
        assert_eq!(t.scale(), DEFAULT_MODEL_SCALE);
    }

    #[test]
    fn yaw_keeps_anchor_position() {
        let anchor = Pose::new(Vec3::new(1.0, 0.0, -2.0), Quat::IDENTITY);
        let mut t = ModelTransform::new(anchor);
        t.set_yaw_degrees(90.0);
        let world = t.world_pose();
        assert_eq!(world.position, anchor.position);
        let fwd = world.orientation * Vec3::NEG_Z;
        assert!((fwd - Vec3::NEG_X).length() < 1e-5, "forward was {fwd:?}");
        assert_eq!(t.anchor, anchor);
    }
}
