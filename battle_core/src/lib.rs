//! battle_core - Battle resolution and character progression for a
//! data-driven RPG
//!
//! This library provides:
//! - Character: clamped HP/MP primitives shared by players and enemies
//! - Equipment: reversible stat bonuses from weapons and armor
//! - Damage: basic-attack and skill damage rolls with variance and crits
//! - Battle: the turn-based state machine and its structured log
//! - Progression: experience, level-ups and stat-point allocation
//! - Quests: defeat objectives driven by battle outcomes
//! - GameSession: session-scoped state, commands and snapshots
//!
//! All randomness goes through [`rng::RollSource`], so any seeded
//! `rand::Rng` or a [`rng::ScriptedRolls`] sequence can drive a battle.

pub mod character;
pub mod combat;
pub mod config;
pub mod damage;
pub mod equipment;
pub mod error;
pub mod prelude;
pub mod progression;
pub mod quest;
pub mod rng;
pub mod session;
pub mod types;

// Re-export core types for convenience
pub use character::{Character, ClampedResources, Combatant, Enemy, ItemUse, Player};
pub use combat::{Battle, BattleEvent, BattleLogEntry, BattleState, PlayerAction, TurnReport};
pub use config::{default_content, ConfigError, ConfigProvider, GameConstants, GameContent};
pub use damage::{AttackSource, DamageRoll};
pub use equipment::EquipOutcome;
pub use error::ActionError;
pub use quest::{Objective, Quest, QuestDefinition, QuestLog, QuestReward, RewardGrant};
pub use rng::{RollSource, ScriptedRolls};
pub use session::{ActionOutcome, GameSession, SessionSnapshot};
pub use types::{EquipmentSlot, ItemEffect, ItemKind, ObjectiveKind, Side, SkillKind, Stat};
