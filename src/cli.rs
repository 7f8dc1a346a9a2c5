// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

use crate::config::ControlsConfig;
use crate::error::ControlsError;

#[derive(Parser, Debug, Clone)]
#[command(name = "viewer-camera")]
#[command(about = "First-person viewer camera with pose export", long_about = None)]
pub struct Cli {
    /// JSON file with controls settings; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum milliseconds between pose messages
    #[arg(long)]
    pub throttle_ms: Option<u64>,

    /// World units per millisecond of key hold
    #[arg(long)]
    pub move_speed: Option<f32>,

    /// Mouse-look sensitivity multiplier
    #[arg(long)]
    pub pointer_speed: Option<f32>,

    /// Write pose messages here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 50.0)]
    pub fov: f32,

    #[arg(long, default_value_t = 0.01)]
    pub near: f32,

    #[arg(long, default_value_t = 1000.0)]
    pub far: f32,
}

impl Cli {
    /// Resolve the controls config: file (if any), then flag overrides
    pub fn controls_config(&self) -> Result<ControlsConfig, ControlsError> {
        let mut config = match &self.config {
            Some(path) => ControlsConfig::load(path)?,
            None => ControlsConfig::default(),
        };

        if let Some(throttle_ms) = self.throttle_ms {
            config.throttle_ms = throttle_ms;
        }
        if let Some(move_speed) = self.move_speed {
            config.move_speed = move_speed;
        }
        if let Some(pointer_speed) = self.pointer_speed {
            config.pointer_speed = pointer_speed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["viewer-camera"]);
        assert_eq!(cli.fov, 50.0);
        assert!(cli.output.is_none());
        assert_eq!(cli.controls_config().unwrap(), ControlsConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from(["viewer-camera", "--throttle-ms", "100", "--move-speed", "0.01"]);
        let config = cli.controls_config().unwrap();
        assert_eq!(config.throttle_ms, 100);
        assert_eq!(config.move_speed, 0.01);
        assert_eq!(config.pointer_speed, 1.0);
    }

    #[test]
    fn invalid_override_rejected() {
        let cli = Cli::parse_from(["viewer-camera", "--move-speed=-1"]);
        assert!(cli.controls_config().is_err());
    }
}
