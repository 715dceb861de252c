//! AR Breaker - collision-response core for an augmented-reality breakout game
//!
//! Core modules:
//! - `sim`: Contact classification, dedup, game state and render-tick hook
//! - `game`: Host-facing facade wiring state, scene and HUD together
//! - `settings`: Data-driven tuning loaded from JSON
//! - `persistence`: Save hook collaborators (JSON file, in-memory)
//! - `hud`: Score/lives display collaborator

pub mod error;
pub mod game;
pub mod highscores;
pub mod hud;
pub mod persistence;
pub mod settings;
pub mod sim;

pub use error::{BreakerError, BreakerResult};
pub use game::Game;
pub use highscores::ScoreRecord;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Lives at the start of a run
    pub const INITIAL_LIVES: u8 = 3;
    /// Ball speed pinned after every accepted contact (engine velocity units)
    pub const BALL_SPEED: f32 = 0.5;
    /// Horizontal steering applied by the side paddle segments (degrees)
    pub const PADDLE_STEER_DEGREES: f32 = 20.0;
    /// Time a destroyed brick stays hidden (seconds)
    pub const BRICK_RESPAWN_SECS: f32 = 120.0;

    /// Scene node names the responder keys on
    pub const BALL_NAME: &str = "Ball";
    pub const BOTTOM_BARRIER_NAME: &str = "Bottom";
    pub const LEFT_PADDLE_NAME: &str = "Left";
    pub const RIGHT_PADDLE_NAME: &str = "Right";
}

/// Convert degrees to radians
#[inline]
pub fn to_radians(degrees: f32) -> f32 {
    degrees * std::f32::consts::PI / 180.0
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return angle;
    }
    let mut wrapped = (angle + PI).rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU
    if wrapped >= TAU {
        wrapped = 0.0;
    }
    wrapped - PI
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_to_radians() {
        assert_eq!(to_radians(0.0), 0.0);
        assert!((to_radians(180.0) - PI).abs() < 1e-6);
        assert!((to_radians(-90.0) + FRAC_PI_2).abs() < 1e-6);
        assert!((to_radians(20.0) - 0.349_065_85).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_angle_wraps() {
        assert!((normalize_angle(2.5 * PI) - FRAC_PI_2).abs() < 1e-5);
        assert!((normalize_angle(PI) - (-PI)).abs() < 1e-5);
        assert!((normalize_angle(-3.0 * FRAC_PI_2) - FRAC_PI_2).abs() < 1e-5);
        assert!((normalize_angle(0.25) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_angle_huge_values() {
        for angle in [1.0e30f32, -1.0e30, 3.4e38, 1.7e28] {
            let wrapped = normalize_angle(angle);
            assert!((-PI..PI).contains(&wrapped), "{} -> {}", angle, wrapped);
        }
    }
}
