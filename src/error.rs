//! Error types for the camera controls.

use std::fmt;

/// Errors raised while setting up the controls.
///
/// These are configuration failures: they are reported once at setup and the
/// controls perform no further action.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlsError {
    /// The camera handed to the controls cannot be driven (bad projection or
    /// non-unit orientation).
    IncompatibleCamera(String),
    /// Two bindings claim the same key.
    DuplicateBinding(String),
    /// A configuration value is out of range.
    InvalidConfig(String),
}

impl fmt::Display for ControlsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncompatibleCamera(msg) => write!(f, "incompatible camera: {msg}"),
            Self::DuplicateBinding(msg) => write!(f, "duplicate key binding: {msg}"),
            Self::InvalidConfig(msg) => write!(f, "invalid controls config: {msg}"),
        }
    }
}

impl std::error::Error for ControlsError {}

/// The input source refused exclusive pointer capture.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureError {
    Denied(String),
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Denied(reason) => write!(f, "pointer capture denied: {reason}"),
        }
    }
}

impl std::error::Error for CaptureError {}

/// Failure to hand a message to the outbound transport.
#[derive(Debug)]
pub enum TransportError {
    Io(std::io::Error),
    Encode(serde_json::Error),
    Closed,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Encode(e) => write!(f, "encode error: {e}"),
            Self::Closed => write!(f, "transport closed"),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::Closed => None,
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e)
    }
}
