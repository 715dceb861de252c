//! Heads-up display collaborator
//!
//! The game only forwards counters; drawing the text is the host's job.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Counters shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub score: u64,
    pub lives: u8,
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SCORE: {}  LIVES: {}", self.score, self.lives)
    }
}

/// Receives the counters once per render tick
pub trait HudDisplay {
    fn show(&mut self, snapshot: HudSnapshot);
}

/// Text HUD that keeps the last rendered line
#[derive(Debug, Clone, Default)]
pub struct TextHud {
    text: String,
    /// Number of times the text actually changed
    updates: u64,
}

impl TextHud {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }
}

impl HudDisplay for TextHud {
    fn show(&mut self, snapshot: HudSnapshot) {
        let text = snapshot.to_string();
        if text != self.text {
            log::debug!("HUD: {}", text);
            self.text = text;
            self.updates += 1;
        }
    }
}
