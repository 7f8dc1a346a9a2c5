pub mod camera;
pub mod cli;
pub mod config;
pub mod controls;
pub mod core;
pub mod error;
pub mod traits;
pub mod transport;
pub mod types;

pub use camera::{PerspectiveCamera, SharedCamera};
pub use config::ControlsConfig;
pub use controls::{sample_pose, CameraControls, LockState};
pub use error::{CaptureError, ControlsError, TransportError};
pub use types::{PoseSnapshot, ViewerMessage};
