//! Per-frame render hook
//!
//! Called once per rendered frame. Purely observational: it reads the
//! counters and forwards them to the HUD, never touching gameplay state.

use super::state::GameState;
use crate::hud::HudDisplay;

/// Refresh the HUD from the current game state
#[inline]
pub fn render_tick(state: &GameState, hud: &mut dyn HudDisplay) {
    state.refresh_display(hud);
}
