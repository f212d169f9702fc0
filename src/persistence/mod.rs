//! Save/load with offline progress
//!
//! The save is a small JSON blob in LocalStorage: soul count, upgrade
//! levels and the wall-clock time of the last save. On load the elapsed
//! time feeds the offline progress formula in `sim::tick`.

use serde::{Deserialize, Serialize};

use crate::platform::storage;
use crate::sim::{BattleState, Levels, offline_progress};

/// LocalStorage key for the game save
pub const SAVE_KEY: &str = "soul_tap_save";

/// Persisted game progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub souls: u64,
    pub levels: Levels,
    /// Unix time (ms) of the last save
    pub last_played_ms: f64,
}

impl SaveData {
    /// Snapshot the persistable parts of the battle state.
    pub fn capture(state: &BattleState, now_ms: f64) -> Self {
        Self {
            souls: state.souls,
            levels: state.levels,
            last_played_ms: now_ms,
        }
    }

    /// Load the save from LocalStorage. Corrupt or missing data yields
    /// `None`; the caller starts a fresh game.
    pub fn load() -> Option<Self> {
        let json = storage::get(SAVE_KEY)?;
        match serde_json::from_str(&json) {
            Ok(save) => Some(save),
            Err(err) => {
                log::warn!("Discarding corrupt save: {}", err);
                None
            }
        }
    }

    /// Write the save to LocalStorage.
    pub fn save(&self) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if storage::set(SAVE_KEY, &json) {
                    log::info!("Game saved ({} souls)", self.souls);
                } else {
                    log::warn!("Game save failed - storage unavailable");
                }
            }
            Err(err) => log::error!("Failed to serialize save: {}", err),
        }
    }

    /// Remove the save from LocalStorage.
    pub fn clear() {
        storage::remove(SAVE_KEY);
        log::info!("Saved game cleared");
    }

    /// Battle state restored from this save, with offline souls applied.
    /// Returns the state and the number of souls earned while away.
    pub fn into_battle_state(self, seed: u64, now_ms: f64) -> (BattleState, u64) {
        let elapsed_secs = (now_ms - self.last_played_ms) / 1000.0;
        let gained = offline_progress(&self.levels, elapsed_secs);
        let souls = self.souls.saturating_add(gained);
        (
            BattleState::from_progress(souls, self.levels, seed),
            gained,
        )
    }
}
