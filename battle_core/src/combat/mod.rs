//! Combat - the battle state machine and its log

mod action;
mod battle;
mod log;

pub use action::PlayerAction;
pub use battle::{Battle, BattleEvent, BattleState, TurnReport, HEAL_SKILL_ID};
pub use log::BattleLogEntry;
