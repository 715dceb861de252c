//! Score, lives and their lifecycle hooks
//!
//! One `GameState` is created when the session starts and is passed by
//! reference to the responder and the render-tick hook.

use std::fmt;

use crate::highscores::ScoreRecord;
use crate::hud::{HudDisplay, HudSnapshot};
use crate::persistence::{SavedState, StateStore};

/// Counters mutated by the contact responder
pub struct GameState {
    /// Bricks destroyed this run
    score: u64,
    /// Lives remaining (never negative)
    lives: u8,
    /// Lives restored by `reset`
    initial_lives: u8,
    /// Last/best score, updated by `save_state`
    scores: ScoreRecord,
    /// Persistence collaborator
    store: Box<dyn StateStore>,
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("score", &self.score)
            .field("lives", &self.lives)
            .field("initial_lives", &self.initial_lives)
            .field("scores", &self.scores)
            .finish_non_exhaustive()
    }
}

impl GameState {
    /// Create a fresh run, seeding the score record from the store
    pub fn new(initial_lives: u8, store: Box<dyn StateStore>) -> Self {
        let scores = match store.load() {
            Ok(Some(saved)) => {
                log::info!("Best score so far: {}", saved.scores.best_score);
                saved.scores
            }
            Ok(None) => ScoreRecord::new(),
            Err(e) => {
                log::warn!("Could not load saved state: {}", e);
                ScoreRecord::new()
            }
        };

        Self {
            score: 0,
            lives: initial_lives,
            initial_lives,
            scores,
            store,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn initial_lives(&self) -> u8 {
        self.initial_lives
    }

    pub fn best_score(&self) -> u64 {
        self.scores.best_score
    }

    pub fn scores(&self) -> ScoreRecord {
        self.scores
    }

    pub fn increment_score(&mut self) {
        self.score = self.score.saturating_add(1);
    }

    /// Lose a life; does nothing once lives are at zero
    pub fn decrement_lives(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    /// Restore starting counters
    pub fn reset(&mut self) {
        self.lives = self.initial_lives;
        self.score = 0;
    }

    /// Record the run and hand it to the store
    ///
    /// Store failures are logged and otherwise invisible to gameplay.
    pub fn save_state(&mut self) {
        if self.scores.record(self.score) {
            log::info!("New best score: {}", self.score);
        }
        let saved = SavedState {
            scores: self.scores,
            lives: self.lives,
        };
        if let Err(e) = self.store.save(&saved) {
            log::warn!("Failed to save state: {}", e);
        }
    }

    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot {
            score: self.score,
            lives: self.lives,
        }
    }

    /// Forward the current counters to the display
    pub fn refresh_display(&self, hud: &mut dyn HudDisplay) {
        hud.show(self.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BreakerError, BreakerResult};
    use crate::persistence::{MemoryStore, NullStore};

    struct FailingStore;

    impl StateStore for FailingStore {
        fn save(&mut self, _state: &SavedState) -> BreakerResult<()> {
            Err(BreakerError::Io(std::io::Error::other("disk full")))
        }

        fn load(&self) -> BreakerResult<Option<SavedState>> {
            Err(BreakerError::Io(std::io::Error::other("unreadable")))
        }
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(3, Box::new(NullStore));
        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), 3);
        assert_eq!(state.best_score(), 0);
    }

    #[test]
    fn test_decrement_lives_stops_at_zero() {
        let mut state = GameState::new(1, Box::new(NullStore));
        state.decrement_lives();
        assert_eq!(state.lives(), 0);
        state.decrement_lives();
        assert_eq!(state.lives(), 0);
    }

    #[test]
    fn test_reset_restores_counters() {
        let mut state = GameState::new(3, Box::new(NullStore));
        state.increment_score();
        state.increment_score();
        state.decrement_lives();
        state.reset();
        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), 3);
    }

    #[test]
    fn test_save_state_records_scores() {
        let store = MemoryStore::new();
        let mut state = GameState::new(3, Box::new(store.clone()));
        for _ in 0..5 {
            state.increment_score();
        }
        state.save_state();

        let saves = store.saves();
        assert_eq!(saves.len(), 1);
        assert_eq!(saves[0].scores.last_score, 5);
        assert_eq!(saves[0].scores.best_score, 5);
        assert_eq!(state.best_score(), 5);
    }

    #[test]
    fn test_best_score_seeded_from_store() {
        let store = MemoryStore::new();
        {
            let mut state = GameState::new(3, Box::new(store.clone()));
            state.increment_score();
            state.increment_score();
            state.save_state();
        }
        let state = GameState::new(3, Box::new(store));
        assert_eq!(state.best_score(), 2);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_store_failure_is_silent() {
        let mut state = GameState::new(2, Box::new(FailingStore));
        state.increment_score();
        state.save_state();
        assert_eq!(state.score(), 1);
        assert_eq!(state.best_score(), 1);
    }

    #[test]
    fn test_refresh_display_forwards_counters() {
        struct Recorder(Vec<HudSnapshot>);
        impl HudDisplay for Recorder {
            fn show(&mut self, snapshot: HudSnapshot) {
                self.0.push(snapshot);
            }
        }

        let mut state = GameState::new(3, Box::new(NullStore));
        state.increment_score();
        let mut hud = Recorder(Vec::new());
        state.refresh_display(&mut hud);
        state.refresh_display(&mut hud);
        assert_eq!(hud.0, vec![HudSnapshot { score: 1, lives: 3 }; 2]);
        assert_eq!(state.score(), 1);
    }
}
