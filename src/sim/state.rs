//! Battle state and core simulation types
//!
//! All state that must be persisted for saves/determinism lives here.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::monsters::{self, MonsterSpec};
use crate::consts::*;

/// Upgrade levels the player has purchased
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Levels {
    /// Bolt level N deals N damage per second, passively
    pub bolt: u32,
}

/// The monster currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Monster {
    /// Index into the roster
    pub index: usize,
    /// Remaining hit points
    pub hp: i64,
    /// False once slain (guards against double-counting the kill)
    pub alive: bool,
}

impl Monster {
    pub fn spawn(index: usize) -> Self {
        Self {
            index,
            hp: monsters::spec(index).hp,
            alive: true,
        }
    }

    pub fn spec(&self) -> &'static MonsterSpec {
        monsters::spec(self.index)
    }
}

/// RNG state wrapper for serialization
///
/// Each draw seeds a fresh `Pcg32` on a new stream, so the sequence is
/// reproducible from (seed, draws) alone and survives a save/load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub draws: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, draws: 0 }
    }

    /// Draw a roster index in `0..len`.
    pub fn next_index(&mut self, len: usize) -> usize {
        let mut rng = Pcg32::new(self.seed, self.draws);
        self.draws = self.draws.wrapping_add(1);
        rng.random_range(0..len)
    }
}

/// Things that happened during a tick, reported to the shell
/// (for sound effects, HUD updates and save triggers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleEvent {
    /// The current monster died; `souls` is the new total
    MonsterSlain { name: &'static str, souls: u64 },
    /// A replacement monster appeared
    MonsterSpawned { name: &'static str, hp: i64 },
    /// A bolt level was purchased; `level` is the new level
    BoltUpgraded { level: u32 },
}

/// Complete battle state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// RNG state for monster selection
    pub rng_state: RngState,
    /// Soul currency
    pub souls: u64,
    /// Purchased upgrade levels
    pub levels: Levels,
    /// Monster currently on screen
    pub monster: Monster,
    /// Lifetime kill count
    pub kills: u64,
    /// Fractional seconds gathered toward the next bolt tick
    #[serde(default)]
    pub bolt_accumulator: f32,
}

impl BattleState {
    /// Fresh state with the given seed; spawns the first monster.
    pub fn new(seed: u64) -> Self {
        let mut rng_state = RngState::new(seed);
        let index = rng_state.next_index(monsters::MONSTERS.len());
        Self {
            seed,
            rng_state,
            souls: 0,
            levels: Levels::default(),
            monster: Monster::spawn(index),
            kills: 0,
            bolt_accumulator: 0.0,
        }
    }

    /// State restored from a save's progress, with a fresh monster.
    pub fn from_progress(souls: u64, levels: Levels, seed: u64) -> Self {
        let mut state = Self::new(seed);
        state.souls = souls;
        state.levels = levels;
        state
    }

    /// Apply damage to the current monster. On death: grant a soul, count
    /// the kill and spawn a random replacement.
    pub fn damage(&mut self, amount: i64, events: &mut Vec<BattleEvent>) {
        if !self.monster.alive || amount <= 0 {
            return;
        }
        self.monster.hp -= amount;
        if self.monster.hp <= 0 {
            self.monster.hp = 0;
            self.monster.alive = false;
            self.souls = self.souls.saturating_add(SOULS_PER_KILL);
            self.kills += 1;
            events.push(BattleEvent::MonsterSlain {
                name: self.monster.spec().name,
                souls: self.souls,
            });
            self.respawn(events);
        }
    }

    /// Buy one bolt level if the player can afford it.
    pub fn try_buy_bolt(&mut self, events: &mut Vec<BattleEvent>) {
        if self.souls < BOLT_COST {
            return;
        }
        self.souls -= BOLT_COST;
        self.levels.bolt += 1;
        events.push(BattleEvent::BoltUpgraded {
            level: self.levels.bolt,
        });
    }

    fn respawn(&mut self, events: &mut Vec<BattleEvent>) {
        let index = self.rng_state.next_index(monsters::MONSTERS.len());
        self.monster = Monster::spawn(index);
        events.push(BattleEvent::MonsterSpawned {
            name: self.monster.spec().name,
            hp: self.monster.hp,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_spawns_living_monster() {
        let state = BattleState::new(42);
        assert!(state.monster.alive);
        assert_eq!(state.monster.hp, state.monster.spec().hp);
        assert_eq!(state.souls, 0);
    }

    #[test]
    fn kill_grants_soul_and_respawns() {
        let mut state = BattleState::new(42);
        let hp = state.monster.hp;
        let mut events = Vec::new();

        state.damage(hp, &mut events);

        assert_eq!(state.souls, 1);
        assert_eq!(state.kills, 1);
        assert!(state.monster.alive, "replacement should be spawned");
        assert!(matches!(events[0], BattleEvent::MonsterSlain { souls: 1, .. }));
        assert!(matches!(events[1], BattleEvent::MonsterSpawned { .. }));
    }

    #[test]
    fn overkill_does_not_double_count() {
        let mut state = BattleState::new(42);
        let hp = state.monster.hp;
        let mut events = Vec::new();

        state.damage(hp + 100, &mut events);

        assert_eq!(state.souls, 1);
        assert_eq!(state.kills, 1);
    }

    #[test]
    fn buy_bolt_requires_five_souls() {
        let mut state = BattleState::new(42);
        let mut events = Vec::new();

        state.souls = 4;
        state.try_buy_bolt(&mut events);
        assert_eq!(state.levels.bolt, 0);
        assert_eq!(state.souls, 4);
        assert!(events.is_empty());

        state.souls = 5;
        state.try_buy_bolt(&mut events);
        assert_eq!(state.levels.bolt, 1);
        assert_eq!(state.souls, 0);
        assert_eq!(events, vec![BattleEvent::BoltUpgraded { level: 1 }]);
    }

    #[test]
    fn rng_sequence_is_reproducible() {
        let mut a = RngState::new(7);
        let mut b = RngState::new(7);
        let draws_a: Vec<usize> = (0..16).map(|_| a.next_index(6)).collect();
        let draws_b: Vec<usize> = (0..16).map(|_| b.next_index(6)).collect();
        assert_eq!(draws_a, draws_b);
        assert!(draws_a.iter().all(|&i| i < 6));
    }

    #[test]
    fn state_round_trips_through_json() {
        let mut state = BattleState::new(42);
        let mut events = Vec::new();
        state.damage(state.monster.hp, &mut events);
        state.souls = 9;

        let json = serde_json::to_string(&state).unwrap();
        let restored: BattleState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.souls, 9);
        assert_eq!(restored.kills, state.kills);
        assert_eq!(restored.rng_state, state.rng_state);
        assert_eq!(restored.monster, state.monster);
    }
}
