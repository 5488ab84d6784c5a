//! QuestLog - accepted quests and reward bookkeeping

use super::{Quest, QuestDefinition, QuestReward};
use crate::character::Player;
use crate::config::ProgressionConstants;
use crate::error::ActionError;
use crate::progression;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

/// What a reward resolution actually granted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardGrant {
    pub quest_id: String,
    pub reward: QuestReward,
    pub levels_gained: u32,
}

/// The session's quests
///
/// A quest id enters `rewarded` exactly once, when its reward is granted;
/// [`QuestLog::resolve_reward`] consults it so rewards are never paid twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestLog {
    quests: Vec<Quest>,
    rewarded: BTreeSet<String>,
}

impl QuestLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from persisted parts
    pub fn from_parts(quests: Vec<Quest>, rewarded: impl IntoIterator<Item = String>) -> Self {
        QuestLog {
            quests,
            rewarded: rewarded.into_iter().collect(),
        }
    }

    /// Accept a quest; a quest already held or already rewarded is rejected
    pub fn accept(&mut self, definition: &QuestDefinition) -> Result<&Quest, ActionError> {
        if self.get(&definition.id).is_some() || self.rewarded.contains(&definition.id) {
            return Err(ActionError::QuestAlreadyAccepted(definition.id.clone()));
        }

        info!(quest = %definition.id, "Quest accepted");
        self.quests.push(Quest::new(definition));
        let index = self.quests.len() - 1;
        Ok(&self.quests[index])
    }

    /// Report a defeat to every open quest
    ///
    /// Returns the ids of quests completed by this defeat, in acceptance
    /// order; they are waiting for [`QuestLog::resolve_reward`].
    pub fn on_enemy_defeated(&mut self, enemy_id: &str, enemy_name: &str) -> Vec<String> {
        let mut completed = Vec::new();
        for quest in self.quests.iter_mut().filter(|q| !q.completed) {
            let before = quest.progress;
            if quest.record_defeat(enemy_id, enemy_name) {
                info!(quest = %quest.id, "Quest completed");
                completed.push(quest.id.clone());
            } else if quest.progress != before {
                info!(quest = %quest.id, progress = %quest.progress_text(), "Quest progress");
            }
        }
        completed
    }

    /// Grant a completed quest's reward once
    ///
    /// Returns `Ok(None)` for a quest that is still open or was already
    /// rewarded.
    pub fn resolve_reward(
        &mut self,
        quest_id: &str,
        player: &mut Player,
        rules: &ProgressionConstants,
    ) -> Result<Option<RewardGrant>, ActionError> {
        let quest = self
            .get(quest_id)
            .ok_or_else(|| ActionError::QuestNotFound(quest_id.to_string()))?;
        if !quest.completed || self.rewarded.contains(quest_id) {
            return Ok(None);
        }
        let reward = quest.reward.clone();

        let levels_gained = progression::add_exp(player, reward.exp, rules);
        player.add_gold(reward.gold);
        for item in &reward.items {
            player.character.add_item(item.clone());
        }
        if let Some(title) = &reward.title {
            player.title = Some(title.clone());
        }
        self.rewarded.insert(quest_id.to_string());

        info!(
            quest = %quest_id,
            exp = reward.exp,
            gold = reward.gold,
            items = reward.items.len(),
            "Quest reward granted"
        );
        Ok(Some(RewardGrant {
            quest_id: quest_id.to_string(),
            reward,
            levels_gained,
        }))
    }

    pub fn get(&self, quest_id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == quest_id)
    }

    /// All accepted quests in acceptance order
    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    /// Quests still in progress
    pub fn active(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter().filter(|q| !q.completed)
    }

    /// Quests whose objective is met
    pub fn completed(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter().filter(|q| q.completed)
    }

    /// Ids of quests whose reward has been granted
    pub fn rewarded_ids(&self) -> impl Iterator<Item = &str> {
        self.rewarded.iter().map(String::as_str)
    }

    pub fn is_rewarded(&self, quest_id: &str) -> bool {
        self.rewarded.contains(quest_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BaseStats;
    use crate::quest::Objective;
    use crate::types::ObjectiveKind;

    fn goblin_hunt() -> QuestDefinition {
        QuestDefinition {
            id: "goblin_hunt".to_string(),
            name: "Goblin Hunt".to_string(),
            description: String::new(),
            objective: Objective {
                kind: ObjectiveKind::DefeatEnemies,
                enemy_id: "goblin".to_string(),
                count: 3,
            },
            reward: QuestReward {
                exp: 100,
                gold: 50,
                items: vec!["potion".to_string()],
                title: Some("Goblin Slayer".to_string()),
            },
        }
    }

    fn player() -> Player {
        Player::new("Aria", "warrior", "Warrior", &BaseStats::default())
    }

    #[test]
    fn test_accept_twice_rejected() {
        let mut log = QuestLog::new();
        assert!(log.accept(&goblin_hunt()).is_ok());
        assert_eq!(
            log.accept(&goblin_hunt()).unwrap_err(),
            ActionError::QuestAlreadyAccepted("goblin_hunt".to_string())
        );
        assert_eq!(log.quests().len(), 1);
    }

    #[test]
    fn test_completion_on_third_defeat() {
        let mut log = QuestLog::new();
        log.accept(&goblin_hunt()).unwrap();

        assert!(log.on_enemy_defeated("goblin", "Goblin").is_empty());
        assert!(log.on_enemy_defeated("goblin", "Goblin").is_empty());
        assert_eq!(
            log.on_enemy_defeated("goblin", "Goblin"),
            vec!["goblin_hunt".to_string()]
        );
        assert!(log.on_enemy_defeated("goblin", "Goblin").is_empty());
        assert_eq!(log.get("goblin_hunt").unwrap().progress, 3);
    }

    #[test]
    fn test_reward_granted_once() {
        let rules = ProgressionConstants::default();
        let mut log = QuestLog::new();
        let mut p = player();
        log.accept(&goblin_hunt()).unwrap();

        // Not complete yet
        assert_eq!(log.resolve_reward("goblin_hunt", &mut p, &rules), Ok(None));

        for _ in 0..3 {
            log.on_enemy_defeated("goblin", "Goblin");
        }
        let grant = log
            .resolve_reward("goblin_hunt", &mut p, &rules)
            .unwrap()
            .unwrap();
        assert_eq!(grant.levels_gained, 1);
        assert_eq!(p.gold, 50);
        assert_eq!(p.character.level, 2);
        assert_eq!(p.title.as_deref(), Some("Goblin Slayer"));
        assert!(p.character.has_item("potion"));

        let again = log.resolve_reward("goblin_hunt", &mut p, &rules).unwrap();
        assert!(again.is_none());
        assert_eq!(p.gold, 50);
        assert_eq!(p.character.exp, 100);
        assert_eq!(p.character.item_count("potion"), 1);
    }

    #[test]
    fn test_unknown_quest() {
        let rules = ProgressionConstants::default();
        let mut log = QuestLog::new();
        let mut p = player();
        assert_eq!(
            log.resolve_reward("missing", &mut p, &rules),
            Err(ActionError::QuestNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_rewarded_quest_cannot_be_reaccepted() {
        let mut log = QuestLog::from_parts(Vec::new(), vec!["goblin_hunt".to_string()]);
        assert!(log.accept(&goblin_hunt()).is_err());
        assert!(log.is_rewarded("goblin_hunt"));
    }
}
