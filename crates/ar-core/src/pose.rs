use crate::error::ViewerError;
use glam::{Mat4, Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    pub const IDENTITY: Pose = Pose {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    pub fn from_arrays(position: [f32; 3], orientation: [f32; 4]) -> Result<Self, ViewerError> {
        let p = Vec3::from_array(position);
        let q = Quat::from_array(orientation);
        if !p.is_finite() || !q.is_finite() {
            return Err(ViewerError::InvalidPose);
        }
        let len = q.length();
        if len < 1e-6 {
            return Err(ViewerError::InvalidPose);
        }
        Ok(Self::new(p, q / len))
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }
}
