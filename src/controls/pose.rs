use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::types::PoseSnapshot;

/// Sample a wire-ready pose from the camera. Pure; never fails
pub fn sample_pose(camera: &PerspectiveCamera) -> PoseSnapshot {
    // Cameras are never scaled
    let (_scale, orientation, position) = camera.decompose();
    let look_at = orientation * Vec3::NEG_Z + position;

    PoseSnapshot {
        wxyz: [orientation.w, orientation.x, orientation.y, orientation.z],
        position: position.to_array(),
        aspect: camera.aspect,
        fov: camera.fov.to_radians(),
        near: camera.near,
        far: camera.far,
        look_at: look_at.to_array(),
        up_direction: camera.up.to_array(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn wxyz_and_position_are_not_reordered() {
        let q = Quat::from_xyzw(0.1, 0.2, 0.3, 0.9).normalize();
        let camera = PerspectiveCamera::default().with_pose(Vec3::new(4.0, -5.0, 6.0), q);

        let pose = sample_pose(&camera);
        assert_eq!(pose.wxyz, [q.w, q.x, q.y, q.z]);
        assert_eq!(pose.position, [4.0, -5.0, 6.0]);
    }

    #[test]
    fn fov_is_radians() {
        let camera = PerspectiveCamera::new(90.0, 1.0, 0.1, 10.0);
        let pose = sample_pose(&camera);
        assert!((pose.fov - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn look_at_is_one_unit_ahead() {
        let camera = PerspectiveCamera::default()
            .with_pose(Vec3::new(1.0, 1.0, 1.0), Quat::from_rotation_y(FRAC_PI_2));
        let look_at = Vec3::from_array(sample_pose(&camera).look_at);
        assert!((look_at - Vec3::new(0.0, 1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn sampling_is_idempotent() {
        let camera = PerspectiveCamera::default()
            .with_pose(Vec3::new(0.3, 0.7, -2.0), Quat::from_rotation_x(0.25));
        let before = camera.clone();

        let a = sample_pose(&camera);
        let b = sample_pose(&camera);
        assert_eq!(a, b);
        assert_eq!(camera, before);
    }

    #[test]
    fn up_and_projection_are_copied() {
        let mut camera = PerspectiveCamera::new(60.0, 16.0 / 9.0, 0.05, 500.0);
        camera.up = Vec3::Z;
        let pose = sample_pose(&camera);
        assert_eq!(pose.up_direction, [0.0, 0.0, 1.0]);
        assert_eq!(pose.aspect, 16.0 / 9.0);
        assert_eq!(pose.near, 0.05);
        assert_eq!(pose.far, 500.0);
    }
}
