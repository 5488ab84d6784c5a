//! BattleLogEntry - structured battle log

use crate::error::ActionError;
use crate::types::{ItemEffect, Side};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One line of the battle log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum BattleLogEntry {
    Encounter {
        enemy: String,
    },
    BattleStart,
    /// Basic attack landed
    Attack {
        side: Side,
        attacker: String,
        target: String,
        damage: i32,
        critical: bool,
    },
    SkillUsed {
        side: Side,
        user: String,
        skill: String,
    },
    /// Damage from the skill announced just before
    SkillHit {
        side: Side,
        target: String,
        damage: i32,
        critical: bool,
        magical: bool,
    },
    Healed {
        side: Side,
        user: String,
        amount: i32,
    },
    BuffActivated {
        side: Side,
        user: String,
        skill: String,
    },
    /// Support skill with no mechanical effect
    NoEffect {
        user: String,
        skill: String,
    },
    ItemUsed {
        user: String,
        item: String,
        effect: ItemEffect,
        amount: i32,
    },
    Defended {
        user: String,
    },
    Escaped,
    EscapeFailed,
    /// Rejected player action; the turn is still spent
    ActionFailed {
        user: String,
        error: ActionError,
    },
    Victory {
        enemy: String,
        exp: u32,
        gold: u32,
        drops: Vec<String>,
    },
    LevelUp {
        user: String,
        level: u32,
    },
    Defeat {
        user: String,
    },
}

impl BattleLogEntry {
    /// Whether this entry records a critical hit
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            BattleLogEntry::Attack { critical: true, .. }
                | BattleLogEntry::SkillHit { critical: true, .. }
        )
    }

    /// Damage dealt by this entry, if it is a hit
    pub fn damage(&self) -> Option<i32> {
        match self {
            BattleLogEntry::Attack { damage, .. } | BattleLogEntry::SkillHit { damage, .. } => {
                Some(*damage)
            }
            _ => None,
        }
    }

    /// Side that acted, for entries that have one
    pub fn side(&self) -> Option<Side> {
        match self {
            BattleLogEntry::Attack { side, .. }
            | BattleLogEntry::SkillUsed { side, .. }
            | BattleLogEntry::SkillHit { side, .. }
            | BattleLogEntry::Healed { side, .. }
            | BattleLogEntry::BuffActivated { side, .. } => Some(*side),
            BattleLogEntry::ItemUsed { .. }
            | BattleLogEntry::Defended { .. }
            | BattleLogEntry::Escaped
            | BattleLogEntry::EscapeFailed
            | BattleLogEntry::ActionFailed { .. } => Some(Side::Player),
            _ => None,
        }
    }
}

const CRIT_MARKER: &str = "CRITICAL! ";

fn crit_marker(critical: bool) -> &'static str {
    if critical {
        CRIT_MARKER
    } else {
        ""
    }
}

impl fmt::Display for BattleLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleLogEntry::Encounter { enemy } => write!(f, "{} charges at you!", enemy),
            BattleLogEntry::BattleStart => f.write_str("Battle start!"),
            BattleLogEntry::Attack {
                attacker,
                target,
                damage,
                critical,
                ..
            } => write!(
                f,
                "{}{} hits {} for {} damage!",
                crit_marker(*critical),
                attacker,
                target,
                damage
            ),
            BattleLogEntry::SkillUsed { user, skill, .. } => write!(f, "{} uses {}!", user, skill),
            BattleLogEntry::SkillHit {
                target,
                damage,
                critical,
                magical,
                ..
            } => write!(
                f,
                "{}{} takes {} {}damage!",
                crit_marker(*critical),
                target,
                damage,
                if *magical { "magic " } else { "" }
            ),
            BattleLogEntry::Healed { user, amount, .. } => {
                write!(f, "{} recovers {} HP!", user, amount)
            }
            BattleLogEntry::BuffActivated { user, skill, .. } => {
                write!(f, "{} is empowered by {}!", user, skill)
            }
            BattleLogEntry::NoEffect { user, skill } => {
                write!(f, "{}'s {} has no effect.", user, skill)
            }
            BattleLogEntry::ItemUsed {
                user,
                item,
                effect,
                amount,
            } => {
                let resource = match effect {
                    ItemEffect::HealHp => "HP",
                    ItemEffect::RestoreMp => "MP",
                };
                write!(f, "{} uses {} and recovers {} {}!", user, item, amount, resource)
            }
            BattleLogEntry::Defended { user } => write!(f, "{} takes a defensive stance!", user),
            BattleLogEntry::Escaped => f.write_str("You escaped!"),
            BattleLogEntry::EscapeFailed => f.write_str("Couldn't get away!"),
            BattleLogEntry::ActionFailed { user, error } => {
                write!(f, "{} fumbles: {}", user, error)
            }
            BattleLogEntry::Victory {
                enemy,
                exp,
                gold,
                drops,
            } => {
                write!(f, "You defeated {}! Gained {} EXP and {} gold", enemy, exp, gold)?;
                if !drops.is_empty() {
                    write!(f, ", found {}", drops.join(", "))?;
                }
                f.write_str("!")
            }
            BattleLogEntry::LevelUp { user, level } => {
                write!(f, "{} reached level {}!", user, level)
            }
            BattleLogEntry::Defeat { user } => write!(f, "{} has been defeated!", user),
        }
    }
}
