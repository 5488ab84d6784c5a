//! Prelude module for convenient imports
//!
//! ```rust
//! use battle_core::prelude::*;
//! ```

// Core types
pub use crate::character::{Character, Combatant, Enemy, Player};
pub use crate::types::{EquipmentSlot, ItemEffect, ItemKind, Side, SkillKind, Stat};

// Battle
pub use crate::combat::{Battle, BattleEvent, BattleLogEntry, BattleState, PlayerAction, TurnReport};

// Progression and quests
pub use crate::progression::{add_exp, allocate_stat_points};
pub use crate::quest::{Quest, QuestLog};

// Session
pub use crate::session::{GameSession, SessionSnapshot};

// Config
pub use crate::config::{default_content, ConfigProvider, GameContent};

// Errors and randomness
pub use crate::error::ActionError;
pub use crate::rng::{RollSource, ScriptedRolls};
