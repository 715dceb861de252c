//! Game tuning and scene naming
//!
//! Loaded from a JSON file; any missing field falls back to its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{BreakerError, BreakerResult};

/// Largest paddle steering step accepted (degrees, either direction)
pub const MAX_STEER_DEGREES: f32 = 360.0;

/// Tunable gameplay values and the scene names the responder keys on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Rules ===
    /// Lives at the start of a run (and after every reset)
    pub initial_lives: u8,
    /// Ball speed pinned after every accepted contact
    pub ball_speed: f32,
    /// Steering applied by the left/right paddle segments (degrees)
    pub steer_degrees: f32,
    /// Seconds a destroyed brick stays hidden
    pub brick_respawn_secs: f32,

    // === Scene names ===
    pub ball_name: String,
    pub bottom_barrier_name: String,
    pub left_paddle_name: String,
    pub right_paddle_name: String,

    // === Persistence ===
    /// Where `save_state` writes; `None` keeps saves in memory only
    pub save_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_lives: INITIAL_LIVES,
            ball_speed: BALL_SPEED,
            steer_degrees: PADDLE_STEER_DEGREES,
            brick_respawn_secs: BRICK_RESPAWN_SECS,

            ball_name: BALL_NAME.to_string(),
            bottom_barrier_name: BOTTOM_BARRIER_NAME.to_string(),
            left_paddle_name: LEFT_PADDLE_NAME.to_string(),
            right_paddle_name: RIGHT_PADDLE_NAME.to_string(),

            save_path: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> BreakerResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> BreakerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a file
    pub fn read(path: &Path) -> BreakerResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from a file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match Self::read(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Check every value is usable by the responder
    pub fn validate(&self) -> BreakerResult<()> {
        if self.initial_lives == 0 {
            return Err(BreakerError::InvalidSettings(
                "initial_lives must be at least 1".into(),
            ));
        }
        if !self.ball_speed.is_finite() || self.ball_speed <= 0.0 {
            return Err(BreakerError::InvalidSettings(format!(
                "ball_speed must be positive, got {}",
                self.ball_speed
            )));
        }
        if !self.steer_degrees.is_finite() || self.steer_degrees.abs() > MAX_STEER_DEGREES {
            return Err(BreakerError::InvalidSettings(format!(
                "steer_degrees must be within ±{}, got {}",
                MAX_STEER_DEGREES, self.steer_degrees
            )));
        }
        if !self.brick_respawn_secs.is_finite() || self.brick_respawn_secs < 0.0 {
            return Err(BreakerError::InvalidSettings(format!(
                "brick_respawn_secs must be non-negative, got {}",
                self.brick_respawn_secs
            )));
        }
        if self.ball_name.is_empty() {
            return Err(BreakerError::InvalidSettings("ball_name is empty".into()));
        }
        Ok(())
    }

    /// Paddle steering in radians
    pub fn steer_radians(&self) -> f32 {
        crate::to_radians(self.steer_degrees)
    }
}
