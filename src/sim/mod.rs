//! Deterministic battle simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time arrives as dt, never read from a clock
//! - No rendering or platform dependencies

pub mod monsters;
pub mod state;
pub mod tick;

pub use monsters::{MONSTERS, MonsterSpec};
pub use state::{BattleEvent, BattleState, Levels, Monster, RngState};
pub use tick::{TickInput, offline_progress, tick};
