use glam::{EulerRot, Quat, Vec3};
use std::cell::RefCell;
use std::rc::Rc;

use crate::core::controller::Axis;
use crate::error::ControlsError;

pub const DEFAULT_FOV_DEGREES: f32 = 50.0;
pub const DEFAULT_NEAR: f32 = 0.01;
pub const DEFAULT_FAR: f32 = 1000.0;

/// Tolerance for the unit-norm orientation check
const UNIT_EPSILON: f32 = 1e-3;

/// Camera shared between the renderer and the controls
pub type SharedCamera = Rc<RefCell<PerspectiveCamera>>;

/// Perspective camera transform with local-axis movement.
///
/// Projection parameters are set by the host and never touched by the
/// controls; only `position` and `orientation` are mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub orientation: Quat,
    pub scale: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            scale: Vec3::ONE,
            up: Vec3::Y,
            fov,
            aspect,
            near,
            far,
        }
    }

    pub fn with_pose(mut self, position: Vec3, orientation: Quat) -> Self {
        self.position = position;
        self.orientation = orientation;
        self
    }

    pub fn into_shared(self) -> SharedCamera {
        Rc::new(RefCell::new(self))
    }

    /// Move along one of the camera's own axes
    pub fn translate_on_axis(&mut self, axis: Axis, distance: f32) {
        self.position += self.orientation * axis.unit() * distance;
    }

    pub fn translate_x(&mut self, distance: f32) {
        self.translate_on_axis(Axis::X, distance);
    }

    pub fn translate_y(&mut self, distance: f32) {
        self.translate_on_axis(Axis::Y, distance);
    }

    pub fn translate_z(&mut self, distance: f32) {
        self.translate_on_axis(Axis::Z, distance);
    }

    /// Orientation as (yaw, pitch, roll) in YXZ order
    pub fn euler_yxz(&self) -> (f32, f32, f32) {
        self.orientation.to_euler(EulerRot::YXZ)
    }

    /// Add yaw/pitch, clamping the resulting pitch to `[min_pitch, max_pitch]`.
    /// Roll is preserved.
    pub fn rotate_yaw_pitch(&mut self, yaw: f32, pitch: f32, min_pitch: f32, max_pitch: f32) {
        let (y, x, z) = self.euler_yxz();
        let x = (x + pitch).clamp(min_pitch, max_pitch);
        self.orientation = Quat::from_euler(EulerRot::YXZ, y + yaw, x, z).normalize();
    }

    /// Unit vector the camera looks along (local -Z)
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// World-space (scale, orientation, position)
    pub fn decompose(&self) -> (Vec3, Quat, Vec3) {
        (self.scale, self.orientation, self.position)
    }

    /// Check that this camera can be driven by the controls
    pub fn validate(&self) -> Result<(), ControlsError> {
        if !(self.aspect.is_finite() && self.aspect > 0.0) {
            return Err(ControlsError::IncompatibleCamera(format!(
                "aspect must be positive, got {}",
                self.aspect
            )));
        }
        if !(self.fov > 0.0 && self.fov < 180.0) {
            return Err(ControlsError::IncompatibleCamera(format!(
                "fov must be in (0, 180) degrees, got {}",
                self.fov
            )));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(ControlsError::IncompatibleCamera(format!(
                "clip range must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        if (self.orientation.length() - 1.0).abs() > UNIT_EPSILON {
            return Err(ControlsError::IncompatibleCamera(format!(
                "orientation is not unit length ({})",
                self.orientation.length()
            )));
        }
        Ok(())
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(DEFAULT_FOV_DEGREES, 1.0, DEFAULT_NEAR, DEFAULT_FAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn translate_z_moves_along_view_axis() {
        let mut camera = PerspectiveCamera::default();
        camera.translate_z(-2.0);
        assert!(approx(camera.position, Vec3::new(0.0, 0.0, -2.0)));
    }

    #[test]
    fn translation_is_local() {
        // Yawed 90 degrees left: local -Z points at world -X
        let mut camera = PerspectiveCamera::default()
            .with_pose(Vec3::ZERO, Quat::from_rotation_y(FRAC_PI_2));
        camera.translate_z(-1.0);
        assert!(approx(camera.position, Vec3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = PerspectiveCamera::default();
        camera.rotate_yaw_pitch(0.0, 10.0, -FRAC_PI_2, FRAC_PI_2);
        let (_, pitch, _) = camera.euler_yxz();
        assert!(pitch <= FRAC_PI_2 + 1e-4);

        camera.rotate_yaw_pitch(0.0, -20.0, -FRAC_PI_2, FRAC_PI_2);
        let (_, pitch, _) = camera.euler_yxz();
        assert!(pitch >= -FRAC_PI_2 - 1e-4);
    }

    #[test]
    fn yaw_accumulates() {
        let mut camera = PerspectiveCamera::default();
        camera.rotate_yaw_pitch(0.3, 0.0, -FRAC_PI_2, FRAC_PI_2);
        camera.rotate_yaw_pitch(0.2, 0.0, -FRAC_PI_2, FRAC_PI_2);
        let (yaw, pitch, _) = camera.euler_yxz();
        assert!((yaw - 0.5).abs() < 1e-5);
        assert!(pitch.abs() < 1e-5);
    }

    #[test]
    fn decompose_matches_fields() {
        let orientation = Quat::from_rotation_x(0.4);
        let camera = PerspectiveCamera::default().with_pose(Vec3::new(1.0, 2.0, 3.0), orientation);
        let (scale, rotation, translation) = camera.decompose();
        assert_eq!(scale, Vec3::ONE);
        assert_eq!(rotation, orientation);
        assert_eq!(translation, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn validate_rejects_bad_projection() {
        assert!(PerspectiveCamera::default().validate().is_ok());
        assert!(PerspectiveCamera::new(50.0, 0.0, 0.1, 10.0).validate().is_err());
        assert!(PerspectiveCamera::new(0.0, 1.0, 0.1, 10.0).validate().is_err());
        assert!(PerspectiveCamera::new(50.0, 1.0, 1.0, 0.5).validate().is_err());

        let mut camera = PerspectiveCamera::default();
        camera.orientation = Quat::from_xyzw(0.0, 0.0, 0.0, 2.0);
        assert!(matches!(camera.validate(), Err(ControlsError::IncompatibleCamera(_))));
    }
}
