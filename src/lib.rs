//! Soul Tap - a browser idle clicker
//!
//! Core modules:
//! - `gesture`: Swipe recognition (raw pointer samples -> classified swipe events)
//! - `sim`: Deterministic battle simulation (monsters, souls, upgrades)
//! - `platform`: Browser/native platform abstraction
//! - `persistence`: Save/load with offline progress extrapolation

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod gesture;
pub mod persistence;
pub mod platform;
pub mod sim;

pub use gesture::{SwipeEvent, SwipeRecognizer};
pub use persistence::SaveData;

/// Game configuration constants
pub mod consts {
    /// Souls required to buy one bolt level
    pub const BOLT_COST: u64 = 5;
    /// Souls granted per monster kill
    pub const SOULS_PER_KILL: u64 = 1;
    /// Damage dealt by a single tap on the monster
    pub const TAP_DAMAGE: i64 = 1;
    /// Bolt damage is applied once per this interval (seconds)
    pub const BOLT_TICK_SECS: f32 = 1.0;
    /// Assumed average monster hp for offline progress extrapolation
    pub const AVERAGE_MONSTER_HP: u32 = 15;
    /// Autosave interval while in battle (seconds)
    pub const AUTOSAVE_INTERVAL_SECS: f64 = 60.0;
}
