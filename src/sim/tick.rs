//! Battle tick and offline progress
//!
//! Advances the battle deterministically from accumulated frame time and
//! one-shot input flags. No rendering or platform dependencies.

use super::state::{BattleEvent, BattleState, Levels};
use crate::consts::*;

/// Input commands for a single tick (one-shot, cleared by the shell)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// The player tapped the monster
    pub tap: bool,
    /// The player clicked the bolt upgrade icon
    pub buy_bolt: bool,
}

/// Advance the battle by `dt` seconds of frame time.
///
/// Bolt damage lands once per whole second of accumulated time, so frame
/// rate does not change the passive damage rate. Returned events are in
/// the order they occurred.
pub fn tick(state: &mut BattleState, input: &TickInput, dt: f32) -> Vec<BattleEvent> {
    let mut events = Vec::new();

    if input.buy_bolt {
        state.try_buy_bolt(&mut events);
    }
    if input.tap {
        state.damage(TAP_DAMAGE, &mut events);
    }

    state.bolt_accumulator += dt;
    while state.bolt_accumulator >= BOLT_TICK_SECS {
        state.bolt_accumulator -= BOLT_TICK_SECS;
        if state.levels.bolt > 0 {
            state.damage(state.levels.bolt as i64, &mut events);
        }
    }

    events
}

/// Souls earned while the player was away.
///
/// Linear extrapolation of passive bolt damage against the roster's
/// average hp: `floor(bolt_level * elapsed / AVERAGE_MONSTER_HP)`.
/// Negative elapsed time (clock moved backwards) yields zero.
pub fn offline_progress(levels: &Levels, elapsed_secs: f64) -> u64 {
    if elapsed_secs <= 0.0 || levels.bolt == 0 {
        return 0;
    }
    let damage = levels.bolt as f64 * elapsed_secs;
    (damage / AVERAGE_MONSTER_HP as f64).floor() as u64
}
