//! Quest records and per-quest progress

use crate::types::ObjectiveKind;
use serde::{Deserialize, Serialize};

/// The condition a quest tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    #[serde(rename = "type", default)]
    pub kind: ObjectiveKind,
    /// Enemy id or display name to match
    #[serde(alias = "enemy")]
    pub enemy_id: String,
    #[serde(default = "default_count")]
    pub count: u32,
}

fn default_count() -> u32 {
    1
}

impl Objective {
    /// Whether a defeated enemy counts towards this objective
    pub fn matches(&self, enemy_id: &str, enemy_name: &str) -> bool {
        match self.kind {
            ObjectiveKind::DefeatEnemies => {
                self.enemy_id == enemy_id || self.enemy_id == enemy_name
            }
        }
    }
}

/// What completing a quest grants
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestReward {
    pub exp: u32,
    pub gold: u32,
    pub items: Vec<String>,
    pub title: Option<String>,
}

/// Quest as offered by a chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub objective: Objective,
    #[serde(default)]
    pub reward: QuestReward,
}

/// An accepted quest
///
/// `progress` only grows while the quest is open and is frozen once
/// `completed` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub objective: Objective,
    pub progress: u32,
    pub completed: bool,
    pub reward: QuestReward,
}

impl Quest {
    /// Accept a quest from its definition
    pub fn new(definition: &QuestDefinition) -> Self {
        Quest {
            id: definition.id.clone(),
            name: definition.name.clone(),
            description: definition.description.clone(),
            objective: definition.objective.clone(),
            progress: 0,
            completed: false,
            reward: definition.reward.clone(),
        }
    }

    /// Count one defeat; returns true if this defeat completed the quest
    pub fn record_defeat(&mut self, enemy_id: &str, enemy_name: &str) -> bool {
        if self.completed || !self.objective.matches(enemy_id, enemy_name) {
            return false;
        }

        self.progress = (self.progress + 1).min(self.objective.count);
        if self.progress >= self.objective.count {
            self.completed = true;
        }
        self.completed
    }

    /// Progress as `"done/required"`
    pub fn progress_text(&self) -> String {
        match self.objective.kind {
            ObjectiveKind::DefeatEnemies => {
                format!("{}/{}", self.progress, self.objective.count)
            }
        }
    }
}
