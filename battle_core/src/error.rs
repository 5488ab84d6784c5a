//! Rejected actions and missing content
//!
//! Every failure in the engine is a value of [`ActionError`]. None of them
//! are fatal: the caller reports them and carries on. Inside a battle a
//! rejected player action still costs the player their turn.

use crate::types::EquipmentSlot;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A command or battle action that could not be carried out
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionError {
    // === Missing configuration ===
    #[error("Unknown class: {0}")]
    UnknownClass(String),
    #[error("Unknown enemy: {0}")]
    UnknownEnemy(String),
    #[error("Unknown skill: {0}")]
    UnknownSkill(String),
    #[error("Unknown item: {0}")]
    UnknownItem(String),
    #[error("Unknown shop: {0}")]
    UnknownShop(String),
    #[error("Unknown chapter: {0}")]
    UnknownChapter(u32),
    #[error("Quest not found: {0}")]
    QuestNotFound(String),

    // === Rejected actions ===
    #[error("Skill not learned: {0}")]
    SkillNotLearned(String),
    #[error("Item not in inventory: {0}")]
    ItemNotOwned(String),
    #[error("Item cannot be equipped: {0}")]
    NotEquippable(String),
    #[error("Equipping {0} would drop max HP below 1")]
    LethalEquipment(String),
    #[error("Item cannot be used: {0}")]
    NotConsumable(String),
    #[error("Nothing equipped in {0} slot")]
    SlotEmpty(EquipmentSlot),
    #[error("Not enough MP: need {required}, have {available}")]
    InsufficientMp { required: i32, available: i32 },
    #[error("Not enough gold: need {required}, have {available}")]
    InsufficientGold { required: u32, available: u32 },
    #[error("Invalid stat: {0}")]
    InvalidStat(String),
    #[error("Must allocate at least one stat point")]
    ZeroPoints,
    #[error("Not enough stat points: requested {requested}, have {available}")]
    InsufficientStatPoints { requested: u32, available: u32 },
    #[error("Shop {shop} does not sell {item}")]
    NotSoldHere { shop: String, item: String },
    #[error("Quest already accepted: {0}")]
    QuestAlreadyAccepted(String),
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Action {0} needs a target id")]
    MissingActionTarget(String),

    // === Battle flow ===
    #[error("A battle is already in progress")]
    BattleInProgress,
    #[error("No battle in progress")]
    NoActiveBattle,
    #[error("The battle has already ended")]
    BattleFinished,
}

impl ActionError {
    /// Whether the failure comes from absent content rather than the
    /// player's choice
    pub fn is_missing_content(&self) -> bool {
        matches!(
            self,
            ActionError::UnknownClass(_)
                | ActionError::UnknownEnemy(_)
                | ActionError::UnknownSkill(_)
                | ActionError::UnknownItem(_)
                | ActionError::UnknownShop(_)
                | ActionError::UnknownChapter(_)
                | ActionError::QuestNotFound(_)
        )
    }
}
