use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::path::Path;
use std::time::Duration;

use crate::error::ControlsError;

/// Tunables for the camera controls. Missing JSON fields take defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// World units per millisecond of key hold
    pub move_speed: f32,
    /// Minimum spacing of held-key ticks
    pub hold_interval_ms: u64,
    /// Multiplier on the base 0.002 rad/pixel look sensitivity
    pub pointer_speed: f32,
    /// Polar angle limits (radians from straight up)
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    /// Minimum spacing of outbound pose messages
    pub throttle_ms: u64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.002,
            hold_interval_ms: 20,
            pointer_speed: 1.0,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            throttle_ms: 20,
        }
    }
}

impl ControlsConfig {
    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, ControlsError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ControlsError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ControlsError> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| ControlsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ControlsError> {
        if !(self.move_speed.is_finite() && self.move_speed >= 0.0) {
            return Err(ControlsError::InvalidConfig(format!(
                "move_speed must be finite and non-negative, got {}",
                self.move_speed
            )));
        }
        if self.hold_interval_ms == 0 {
            return Err(ControlsError::InvalidConfig("hold_interval_ms must be positive".into()));
        }
        if !self.pointer_speed.is_finite() {
            return Err(ControlsError::InvalidConfig("pointer_speed must be finite".into()));
        }
        if !(0.0 <= self.min_polar_angle
            && self.min_polar_angle <= self.max_polar_angle
            && self.max_polar_angle <= PI)
        {
            return Err(ControlsError::InvalidConfig(format!(
                "polar angles must satisfy 0 <= min <= max <= PI, got {}..{}",
                self.min_polar_angle, self.max_polar_angle
            )));
        }
        Ok(())
    }

    pub fn hold_interval(&self) -> Duration {
        Duration::from_millis(self.hold_interval_ms)
    }

    pub fn throttle_interval(&self) -> Duration {
        Duration::from_millis(self.throttle_ms)
    }

    /// Pitch range implied by the polar angle limits
    pub fn pitch_range(&self) -> (f32, f32) {
        (PI / 2.0 - self.max_polar_angle, PI / 2.0 - self.min_polar_angle)
    }
}
