//! Character model - the stat record shared by players and enemies
//!
//! [`Character`] owns the numeric stats and the clamping primitives that
//! keep `0 <= hp <= max_hp` and `0 <= mp <= max_mp`. [`Player`] and
//! [`Enemy`] wrap it with their own extra fields and both expose it through
//! the [`Combatant`] capability.

mod enemy;
mod player;

pub use enemy::Enemy;
pub use player::{ItemUse, Player};

use crate::config::BaseStats;
use crate::types::Stat;
use serde::{Deserialize, Serialize};

/// Current HP and MP removed when a maximum was lowered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClampedResources {
    pub hp: i32,
    pub mp: i32,
}

impl ClampedResources {
    pub fn is_empty(self) -> bool {
        self.hp == 0 && self.mp == 0
    }
}

/// Mutable combat stats of any combatant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub level: u32,
    /// Cumulative experience, never reduced
    pub exp: u32,
    pub exp_to_next_level: u32,

    // === Resources ===
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,

    // === Attributes ===
    pub atk: i32,
    pub matk: i32,
    pub def: i32,
    pub mdef: i32,
    pub agi: i32,

    /// Learned skill ids
    pub skills: Vec<String>,
    /// Loose inventory; duplicates are separate copies
    pub items: Vec<String>,
}

impl Character {
    /// Create a level 1 character at full HP and MP
    pub fn new(name: impl Into<String>, stats: &BaseStats) -> Self {
        let max_hp = stats.hp.max(1);
        let max_mp = stats.mp.max(0);
        Character {
            name: name.into(),
            level: 1,
            exp: 0,
            exp_to_next_level: 100,
            hp: max_hp,
            max_hp,
            mp: max_mp,
            max_mp,
            atk: stats.atk,
            matk: stats.matk,
            def: stats.def,
            mdef: stats.mdef,
            agi: stats.agi,
            skills: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Read a stat; `Hp` and `Mp` refer to the maximums
    pub fn stat(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Hp => self.max_hp,
            Stat::Mp => self.max_mp,
            Stat::Atk => self.atk,
            Stat::Matk => self.matk,
            Stat::Def => self.def,
            Stat::Mdef => self.mdef,
            Stat::Agi => self.agi,
        }
    }

    /// Mutable access to a stat; `Hp` and `Mp` refer to the maximums
    ///
    /// Callers that lower a maximum must follow up with
    /// [`Character::clamp_resources`].
    pub fn stat_mut(&mut self, stat: Stat) -> &mut i32 {
        match stat {
            Stat::Hp => &mut self.max_hp,
            Stat::Mp => &mut self.max_mp,
            Stat::Atk => &mut self.atk,
            Stat::Matk => &mut self.matk,
            Stat::Def => &mut self.def,
            Stat::Mdef => &mut self.mdef,
            Stat::Agi => &mut self.agi,
        }
    }

    /// Pull current HP and MP back into `[0, max]`
    ///
    /// The maximums themselves are left as they are, even when negative.
    /// Returns how much current HP and MP was cut off.
    pub fn clamp_resources(&mut self) -> ClampedResources {
        let hp = self.hp.clamp(0, self.max_hp.max(0));
        let mp = self.mp.clamp(0, self.max_mp.max(0));
        let clamped = ClampedResources {
            hp: self.hp.saturating_sub(hp).max(0),
            mp: self.mp.saturating_sub(mp).max(0),
        };
        self.hp = hp;
        self.mp = mp;
        clamped
    }

    /// Apply damage, at least 1 point; returns the damage dealt
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.max(1);
        self.hp = self.hp.saturating_sub(actual).max(0);
        actual
    }

    /// Restore HP up to the maximum; returns the HP actually gained
    pub fn heal(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.max_hp - self.hp).max(0);
        self.hp += actual;
        actual
    }

    /// Spend MP if there is enough; nothing changes on failure
    pub fn use_mp(&mut self, amount: i32) -> bool {
        let amount = amount.max(0);
        if self.mp < amount {
            return false;
        }
        self.mp -= amount;
        true
    }

    /// Restore MP up to the maximum; returns the MP actually gained
    pub fn restore_mp(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.max_mp - self.mp).max(0);
        self.mp += actual;
        actual
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// HP as a fraction of max HP
    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        f64::from(self.hp) / f64::from(self.max_hp)
    }

    pub fn knows_skill(&self, skill_id: &str) -> bool {
        self.skills.iter().any(|s| s == skill_id)
    }

    pub fn learn_skill(&mut self, skill_id: impl Into<String>) {
        let skill_id = skill_id.into();
        if !self.knows_skill(&skill_id) {
            self.skills.push(skill_id);
        }
    }

    pub fn has_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|i| i == item_id)
    }

    /// Number of copies of an item in the inventory
    pub fn item_count(&self, item_id: &str) -> usize {
        self.items.iter().filter(|i| *i == item_id).count()
    }

    pub fn add_item(&mut self, item_id: impl Into<String>) {
        self.items.push(item_id.into());
    }

    /// Remove one copy of an item; false if none was held
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        match self.items.iter().position(|i| i == item_id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Combat capability shared by players and enemies
///
/// Only [`Combatant::character`] and [`Combatant::character_mut`] need
/// implementing; the rest forward to the clamping primitives.
pub trait Combatant {
    fn character(&self) -> &Character;
    fn character_mut(&mut self) -> &mut Character;

    fn name(&self) -> &str {
        &self.character().name
    }

    fn take_damage(&mut self, amount: i32) -> i32 {
        self.character_mut().take_damage(amount)
    }

    fn heal(&mut self, amount: i32) -> i32 {
        self.character_mut().heal(amount)
    }

    fn use_mp(&mut self, amount: i32) -> bool {
        self.character_mut().use_mp(amount)
    }

    fn restore_mp(&mut self, amount: i32) -> i32 {
        self.character_mut().restore_mp(amount)
    }

    fn is_alive(&self) -> bool {
        self.character().is_alive()
    }
}
