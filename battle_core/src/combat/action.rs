//! PlayerAction - what the player can do on their turn

use crate::error::ActionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A player's choice for one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum PlayerAction {
    Attack,
    Skill(String),
    Item(String),
    Defend,
    Escape,
}

impl PlayerAction {
    /// Build an action from a command name and an optional skill or item id
    pub fn parse(kind: &str, target: Option<&str>) -> Result<Self, ActionError> {
        let needs_target = |kind: &str| {
            target
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .ok_or_else(|| ActionError::MissingActionTarget(kind.to_string()))
        };

        match kind.trim().to_ascii_lowercase().as_str() {
            "attack" => Ok(PlayerAction::Attack),
            "skill" => Ok(PlayerAction::Skill(needs_target("skill")?)),
            "item" => Ok(PlayerAction::Item(needs_target("item")?)),
            "defend" => Ok(PlayerAction::Defend),
            "escape" => Ok(PlayerAction::Escape),
            other => Err(ActionError::UnknownAction(other.to_string())),
        }
    }

    /// Command name of this action
    pub fn kind(&self) -> &'static str {
        match self {
            PlayerAction::Attack => "attack",
            PlayerAction::Skill(_) => "skill",
            PlayerAction::Item(_) => "item",
            PlayerAction::Defend => "defend",
            PlayerAction::Escape => "escape",
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Skill(id) | PlayerAction::Item(id) => write!(f, "{} {}", self.kind(), id),
            _ => f.write_str(self.kind()),
        }
    }
}
