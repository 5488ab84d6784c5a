//! Core types shared by every battle_core module

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stat that can be raised by equipment or allocated stat points
///
/// Replaces string-keyed attribute lookup: every access to a numeric stat
/// goes through [`crate::character::Character::stat`] /
/// [`crate::character::Character::stat_mut`] with one of these keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    /// Maximum hit points
    Hp,
    /// Maximum mana points
    Mp,
    Atk,
    Matk,
    Def,
    Mdef,
    Agi,
}

impl Stat {
    /// Get all stats
    pub fn all() -> &'static [Stat] {
        &[
            Stat::Hp,
            Stat::Mp,
            Stat::Atk,
            Stat::Matk,
            Stat::Def,
            Stat::Mdef,
            Stat::Agi,
        ]
    }

    /// Lowercase key used in content files and commands
    pub fn key(self) -> &'static str {
        match self {
            Stat::Hp => "hp",
            Stat::Mp => "mp",
            Stat::Atk => "atk",
            Stat::Matk => "matk",
            Stat::Def => "def",
            Stat::Mdef => "mdef",
            Stat::Agi => "agi",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Stat {
    type Err = crate::error::ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Stat::all()
            .iter()
            .copied()
            .find(|stat| stat.key() == lowered)
            // "defense" is what the save format and older content call it
            .or_else(|| (lowered == "defense").then_some(Stat::Def))
            .ok_or_else(|| crate::error::ActionError::InvalidStat(s.to_string()))
    }
}

/// Equipment slot, at most one item each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

impl EquipmentSlot {
    /// Get all equipment slots
    pub fn all() -> &'static [EquipmentSlot] {
        &[EquipmentSlot::Weapon, EquipmentSlot::Armor]
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentSlot::Weapon => f.write_str("weapon"),
            EquipmentSlot::Armor => f.write_str("armor"),
        }
    }
}

/// How a skill resolves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillKind {
    /// `atk + power` against `def`
    #[default]
    Physical,
    /// `matk + power` against `mdef`
    Magical,
    /// Self-targeted utility (`heal` restores `power` HP)
    Support,
    /// Logged only
    Buff,
}

impl SkillKind {
    /// Whether this kind of skill deals damage to the opponent
    pub fn is_damaging(self) -> bool {
        matches!(self, SkillKind::Physical | SkillKind::Magical)
    }
}

/// Item category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    #[default]
    Consumable,
    Weapon,
    Armor,
    /// Quest items, trophies and anything else that cannot be used
    Misc,
}

impl ItemKind {
    /// The slot this kind of item occupies when equipped
    pub fn slot(self) -> Option<EquipmentSlot> {
        match self {
            ItemKind::Weapon => Some(EquipmentSlot::Weapon),
            ItemKind::Armor => Some(EquipmentSlot::Armor),
            ItemKind::Consumable | ItemKind::Misc => None,
        }
    }
}

/// What a consumable does when used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemEffect {
    #[serde(alias = "heal")]
    HealHp,
    #[serde(alias = "mp")]
    RestoreMp,
}

/// Machine-checkable condition tracked by a quest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    #[default]
    DefeatEnemies,
}

/// Which side of a battle performed an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Enemy,
}
