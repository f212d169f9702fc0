//! Monster roster
//!
//! Static configuration for the monsters that appear in battle. Balance is
//! tuned so the roster averages around 15 hp, which the offline progress
//! formula assumes.

/// Static configuration for one monster kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonsterSpec {
    /// Display name (also the asset key)
    pub name: &'static str,
    /// Image path relative to the assets directory
    pub image: &'static str,
    /// Hit points at spawn
    pub hp: i64,
}

/// All monsters the battle scene can spawn.
pub const MONSTERS: &[MonsterSpec] = &[
    MonsterSpec {
        name: "imp",
        image: "monsters/imp.png",
        hp: 5,
    },
    MonsterSpec {
        name: "slime",
        image: "monsters/slime.png",
        hp: 8,
    },
    MonsterSpec {
        name: "ghoul",
        image: "monsters/ghoul.png",
        hp: 10,
    },
    MonsterSpec {
        name: "wraith",
        image: "monsters/wraith.png",
        hp: 15,
    },
    MonsterSpec {
        name: "kraken",
        image: "monsters/kraken.png",
        hp: 25,
    },
    MonsterSpec {
        name: "bone-colossus",
        image: "monsters/bone_colossus.png",
        hp: 40,
    },
];

/// Look up a monster spec by roster index (wraps out-of-range indices).
pub fn spec(index: usize) -> &'static MonsterSpec {
    &MONSTERS[index % MONSTERS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_is_nonempty_with_positive_hp() {
        assert!(!MONSTERS.is_empty());
        for m in MONSTERS {
            assert!(m.hp > 0, "{} has nonpositive hp", m.name);
        }
    }

    #[test]
    fn spec_wraps_out_of_range() {
        assert_eq!(spec(MONSTERS.len()), spec(0));
    }
}
