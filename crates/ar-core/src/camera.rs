use crate::constants::{CAMERA_ZFAR, CAMERA_ZNEAR, PREVIEW_CAMERA_EYE, PREVIEW_FOVY_RADIANS};
use crate::pose::Pose;
use glam::{Mat4, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }
}

/// Client rectangle of the canvas, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    pub fn to_ndc(&self, x: f32, y: f32) -> Option<[f32; 2]> {
        if self.width <= 0.0 || self.height <= 0.0 || !x.is_finite() || !y.is_finite() {
            return None;
        }
        let u = (x - self.left) / self.width;
        let v = (y - self.top) / self.height;
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }
        Some([2.0 * u - 1.0, 1.0 - 2.0 * v])
    }
}

/// Perspective camera: world pose of the eye plus its projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub pose: Pose,
    pub projection: Mat4,
}

impl Camera {
    pub fn from_view(pose: Pose, projection: Mat4) -> Self {
        Self { pose, projection }
    }

    pub fn look_at(eye: Vec3, target: Vec3, fovy_radians: f32, aspect: f32) -> Self {
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let (_, rot, _) = view.inverse().to_scale_rotation_translation();
        Self {
            pose: Pose::new(eye, rot),
            projection: Mat4::perspective_rh(fovy_radians, aspect.max(1e-3), CAMERA_ZNEAR, CAMERA_ZFAR),
        }
    }

    pub fn preview(aspect: f32) -> Self {
        let eye = Vec3::from_array(PREVIEW_CAMERA_EYE);
        Self::look_at(eye, eye + Vec3::NEG_Z, PREVIEW_FOVY_RADIANS, aspect)
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.pose.to_matrix().inverse()
    }

    /// Ray through a client-space point of `viewport`.
    pub fn ray_from_screen(&self, viewport: &Viewport, x: f32, y: f32) -> Option<Ray> {
        let [ndc_x, ndc_y] = viewport.to_ndc(x, y)?;
        let inv = (self.projection * self.view_matrix()).inverse();
        let p_near = inv * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        if p_near.w.abs() < f32::EPSILON || p_far.w.abs() < f32::EPSILON {
            return None;
        }
        let near: Vec3 = p_near.truncate() / p_near.w;
        let far: Vec3 = p_far.truncate() / p_far.w;
        let dir = (far - near).normalize_or_zero();
        if dir == Vec3::ZERO || !dir.is_finite() {
            return None;
        }
        Some(Ray::new(self.pose.position, dir))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::look_at(Vec3::ZERO, Vec3::NEG_Z, std::f32::consts::FRAC_PI_4, 1.0)
    }
}
