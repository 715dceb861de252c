//! Save hook collaborators
//!
//! `GameState::save_state` hands a `SavedState` to whatever `StateStore` the
//! host wired in:
//! - `JsonFileStore`: pretty JSON, written to a temp file then renamed
//! - `MemoryStore`: shared in-memory log (tests, headless driver)
//! - `NullStore`: discards everything

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::BreakerResult;
use crate::highscores::ScoreRecord;

/// Snapshot written when the player runs out of lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedState {
    /// Last/best score after recording this run
    pub scores: ScoreRecord,
    /// Lives at the moment of saving (0 on game over)
    pub lives: u8,
}

/// External persistence collaborator
pub trait StateStore {
    fn save(&mut self, state: &SavedState) -> BreakerResult<()>;

    /// Most recent save, if any
    fn load(&self) -> BreakerResult<Option<SavedState>>;
}

/// Store that discards saves
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl StateStore for NullStore {
    fn save(&mut self, _state: &SavedState) -> BreakerResult<()> {
        Ok(())
    }

    fn load(&self) -> BreakerResult<Option<SavedState>> {
        Ok(None)
    }
}

/// In-memory store; clones share the same log
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    saves: Rc<RefCell<Vec<SavedState>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every save so far, oldest first
    pub fn saves(&self) -> Vec<SavedState> {
        self.saves.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.saves.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.saves.borrow().is_empty()
    }
}

impl StateStore for MemoryStore {
    fn save(&mut self, state: &SavedState) -> BreakerResult<()> {
        self.saves.borrow_mut().push(*state);
        Ok(())
    }

    fn load(&self) -> BreakerResult<Option<SavedState>> {
        Ok(self.saves.borrow().last().copied())
    }
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for JsonFileStore {
    fn save(&mut self, state: &SavedState) -> BreakerResult<()> {
        let json = serde_json::to_string_pretty(state)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::info!("State saved to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> BreakerResult<Option<SavedState>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&json)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BreakerError;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ar_breaker_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_memory_store_shares_log() {
        let store = MemoryStore::new();
        let mut handle: Box<dyn StateStore> = Box::new(store.clone());
        let state = SavedState {
            scores: ScoreRecord { last_score: 4, best_score: 9 },
            lives: 0,
        };
        handle.save(&state).unwrap();
        assert_eq!(store.saves(), vec![state]);
        assert_eq!(handle.load().unwrap(), Some(state));
    }

    #[test]
    fn test_json_file_store_round_trip() {
        let path = temp_path("round_trip");
        let mut store = JsonFileStore::new(&path);
        assert_eq!(store.load().unwrap(), None);

        let state = SavedState {
            scores: ScoreRecord { last_score: 12, best_score: 30 },
            lives: 0,
        };
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), Some(state));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_json_file_store_corrupt_file() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.load(), Err(BreakerError::Json(_))));
        let _ = std::fs::remove_file(&path);
    }
}
