use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Wire-ready camera pose sampled at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseSnapshot {
    /// Orientation as [w, x, y, z]
    pub wxyz: [f32; 4],
    pub position: [f32; 3],
    pub aspect: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// One unit ahead of the camera along its forward axis
    pub look_at: [f32; 3],
    pub up_direction: [f32; 3],
}

impl PoseSnapshot {
    pub fn orientation(&self) -> Quat {
        let [w, x, y, z] = self.wxyz;
        Quat::from_xyzw(x, y, z, w)
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Outbound message, tagged with its `type` name on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ViewerMessage {
    ViewerCameraMessage(PoseSnapshot),
}

impl ViewerMessage {
    pub fn pose(&self) -> &PoseSnapshot {
        match self {
            ViewerMessage::ViewerCameraMessage(pose) => pose,
        }
    }
}
