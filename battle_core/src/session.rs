//! GameSession - one player's session state
//!
//! The session owns the [`Player`], at most one [`Battle`] and the
//! [`QuestLog`]. Every presentation command is a method here; content and
//! randomness are passed in per call, so sessions share nothing mutable.

use crate::character::{ItemUse, Player};
use crate::combat::{Battle, BattleEvent, PlayerAction, TurnReport};
use crate::config::ConfigProvider;
use crate::equipment::{self, EquipOutcome};
use crate::error::ActionError;
use crate::progression;
use crate::quest::{Quest, QuestLog, RewardGrant};
use crate::rng::RollSource;
use crate::types::{EquipmentSlot, Stat};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default difficulty for new sessions
pub const DEFAULT_DIFFICULTY: &str = "normal";

/// Result of a battle round routed through the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    pub report: TurnReport,
    /// Quests completed by this round's victory
    pub quests_completed: Vec<String>,
    /// Rewards paid out for those quests
    pub rewards: Vec<RewardGrant>,
}

/// Persistable session state
///
/// The active battle is not part of a snapshot; a restored session has none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub player: Player,
    pub current_chapter: u32,
    pub difficulty: String,
    pub quests: Vec<Quest>,
    pub completed_quest_ids: Vec<String>,
}

impl SessionSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A single player's game
#[derive(Debug, Clone)]
pub struct GameSession {
    player: Player,
    battle: Option<Battle>,
    quests: QuestLog,
    current_chapter: u32,
    difficulty: String,
}

impl GameSession {
    /// Start a session at chapter 1
    pub fn new(player: Player, difficulty: impl Into<String>) -> Self {
        GameSession {
            player,
            battle: None,
            quests: QuestLog::new(),
            current_chapter: 1,
            difficulty: difficulty.into(),
        }
    }

    /// Create a player from a class and start a session
    pub fn create(
        name: impl Into<String>,
        class_id: &str,
        difficulty: impl Into<String>,
        content: &impl ConfigProvider,
    ) -> Result<Self, ActionError> {
        let player = Player::from_class(name, class_id, content)?;
        info!(class = %class_id, "Session created");
        Ok(GameSession::new(player, difficulty))
    }

    // === Accessors ===

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Current or most recently finished battle
    pub fn battle(&self) -> Option<&Battle> {
        self.battle.as_ref()
    }

    pub fn in_battle(&self) -> bool {
        self.battle.as_ref().is_some_and(|b| !b.is_over())
    }

    pub fn quests(&self) -> &QuestLog {
        &self.quests
    }

    pub fn current_chapter(&self) -> u32 {
        self.current_chapter
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    /// Change difficulty; takes effect from the next battle
    pub fn set_difficulty(&mut self, difficulty: impl Into<String>) {
        self.difficulty = difficulty.into();
    }

    // === Battle ===

    /// Start a battle at the session difficulty
    ///
    /// A finished battle is replaced; a running one is an error.
    pub fn start_battle(
        &mut self,
        enemy_id: &str,
        content: &impl ConfigProvider,
    ) -> Result<&Battle, ActionError> {
        if self.in_battle() {
            return Err(ActionError::BattleInProgress);
        }
        let battle = Battle::start(enemy_id, &self.difficulty, content)?;
        Ok(self.battle.insert(battle))
    }

    /// Run one battle round and route a victory to the quest tracker
    pub fn player_action(
        &mut self,
        action: &PlayerAction,
        content: &impl ConfigProvider,
        rng: &mut impl RollSource,
    ) -> Result<ActionOutcome, ActionError> {
        let battle = self.battle.as_mut().ok_or(ActionError::NoActiveBattle)?;
        let report = battle.player_action(&mut self.player, action, content, rng)?;

        let (quests_completed, rewards) = match &report.event {
            Some(BattleEvent::EnemyDefeated {
                enemy_id,
                enemy_name,
                ..
            }) => {
                let completed = self.quests.on_enemy_defeated(enemy_id, enemy_name);
                let rewards = self.resolve_rewards(&completed, content)?;
                (completed, rewards)
            }
            _ => (Vec::new(), Vec::new()),
        };

        Ok(ActionOutcome {
            report,
            quests_completed,
            rewards,
        })
    }

    /// Drop the stored battle, returning it
    pub fn end_battle(&mut self) -> Option<Battle> {
        self.battle.take()
    }

    // === Quests ===

    /// Accept a quest offered by the current chapter
    pub fn accept_quest(
        &mut self,
        quest_id: &str,
        content: &impl ConfigProvider,
    ) -> Result<&Quest, ActionError> {
        let chapter = content
            .chapter(self.current_chapter)
            .ok_or(ActionError::UnknownChapter(self.current_chapter))?;
        let definition = chapter
            .quest(quest_id)
            .ok_or_else(|| ActionError::QuestNotFound(quest_id.to_string()))?;
        self.quests.accept(definition)
    }

    /// Report a defeat that happened outside a session battle
    pub fn on_enemy_defeated(
        &mut self,
        enemy_id: &str,
        enemy_name: &str,
        content: &impl ConfigProvider,
    ) -> Result<Vec<RewardGrant>, ActionError> {
        let completed = self.quests.on_enemy_defeated(enemy_id, enemy_name);
        self.resolve_rewards(&completed, content)
    }

    /// Grant a completed quest's reward; `None` if open or already paid
    pub fn resolve_reward(
        &mut self,
        quest_id: &str,
        content: &impl ConfigProvider,
    ) -> Result<Option<RewardGrant>, ActionError> {
        self.quests.resolve_reward(
            quest_id,
            &mut self.player,
            &content.constants().progression,
        )
    }

    fn resolve_rewards(
        &mut self,
        quest_ids: &[String],
        content: &impl ConfigProvider,
    ) -> Result<Vec<RewardGrant>, ActionError> {
        let mut grants = Vec::new();
        for quest_id in quest_ids {
            if let Some(grant) = self.resolve_reward(quest_id, content)? {
                grants.push(grant);
            }
        }
        Ok(grants)
    }

    /// Move to the next chapter if it exists
    pub fn advance_chapter(&mut self, content: &impl ConfigProvider) -> Result<u32, ActionError> {
        let next = self.current_chapter + 1;
        content
            .chapter(next)
            .ok_or(ActionError::UnknownChapter(next))?;
        self.current_chapter = next;
        info!(chapter = next, "Advanced chapter");
        Ok(next)
    }

    // === Character ===

    /// Spend stat points on a stat named by its key
    pub fn allocate_stat_points(
        &mut self,
        stat: &str,
        points: u32,
        content: &impl ConfigProvider,
    ) -> Result<(), ActionError> {
        let stat: Stat = stat.parse()?;
        progression::allocate_stat_points(
            &mut self.player,
            stat,
            points,
            &content.constants().progression,
        )
    }

    pub fn equip(
        &mut self,
        item_id: &str,
        content: &impl ConfigProvider,
    ) -> Result<EquipOutcome, ActionError> {
        equipment::equip(&mut self.player, item_id, content)
    }

    pub fn unequip(
        &mut self,
        slot: EquipmentSlot,
        content: &impl ConfigProvider,
    ) -> Result<String, ActionError> {
        equipment::unequip(&mut self.player, slot, content)
    }

    /// Unequip by item id rather than slot
    pub fn unequip_item(
        &mut self,
        item_id: &str,
        content: &impl ConfigProvider,
    ) -> Result<String, ActionError> {
        let slot = equipment::slot_of(&self.player, item_id)
            .ok_or_else(|| ActionError::ItemNotOwned(item_id.to_string()))?;
        self.unequip(slot, content)
    }

    /// Use a consumable outside battle
    pub fn use_item(
        &mut self,
        item_id: &str,
        content: &impl ConfigProvider,
    ) -> Result<ItemUse, ActionError> {
        self.player.use_item(item_id, content)
    }

    /// Buy one item from a shop
    pub fn buy_item(
        &mut self,
        shop_id: &str,
        item_id: &str,
        content: &impl ConfigProvider,
    ) -> Result<u32, ActionError> {
        let shop = content
            .shop(shop_id)
            .ok_or_else(|| ActionError::UnknownShop(shop_id.to_string()))?;
        if !shop.sells(item_id) {
            return Err(ActionError::NotSoldHere {
                shop: shop_id.to_string(),
                item: item_id.to_string(),
            });
        }
        let item = content
            .item(item_id)
            .ok_or_else(|| ActionError::UnknownItem(item_id.to_string()))?;

        self.player.remove_gold(item.price)?;
        self.player.character.add_item(item_id);
        info!(shop = %shop_id, item = %item_id, price = item.price, "Bought item");
        Ok(item.price)
    }

    // === Persistence ===

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            player: self.player.clone(),
            current_chapter: self.current_chapter,
            difficulty: self.difficulty.clone(),
            quests: self.quests.quests().to_vec(),
            completed_quest_ids: self.quests.rewarded_ids().map(str::to_string).collect(),
        }
    }

    pub fn restore(snapshot: SessionSnapshot) -> Self {
        GameSession {
            player: snapshot.player,
            battle: None,
            quests: QuestLog::from_parts(snapshot.quests, snapshot.completed_quest_ids),
            current_chapter: snapshot.current_chapter,
            difficulty: snapshot.difficulty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_content;
    use crate::rng::ScriptedRolls;

    #[test]
    fn test_battle_lifecycle() {
        let content = default_content();
        let mut session = GameSession::create("Aria", "warrior", "normal", &content).unwrap();

        assert_eq!(
            session
                .player_action(&PlayerAction::Attack, &content, &mut ScriptedRolls::midpoint())
                .unwrap_err(),
            ActionError::NoActiveBattle
        );

        session.start_battle("goblin", &content).unwrap();
        assert!(session.in_battle());
        assert_eq!(
            session.start_battle("goblin", &content).unwrap_err(),
            ActionError::BattleInProgress
        );

        // Escape with roll 1
        let outcome = session
            .player_action(&PlayerAction::Escape, &content, &mut ScriptedRolls::new([0.0]))
            .unwrap();
        assert!(outcome.report.state.is_terminal());
        assert!(!session.in_battle());

        // A finished battle can be replaced
        assert!(session.start_battle("wolf", &content).is_ok());
    }

    #[test]
    fn test_accept_quest_from_current_chapter() {
        let content = default_content();
        let mut session = GameSession::create("Aria", "warrior", "normal", &content).unwrap();

        assert_eq!(
            session.accept_quest("chief_hunt", &content).unwrap_err(),
            ActionError::QuestNotFound("chief_hunt".to_string())
        );
        assert!(session.accept_quest("goblin_hunt", &content).is_ok());

        assert_eq!(session.advance_chapter(&content), Ok(2));
        assert!(session.accept_quest("chief_hunt", &content).is_ok());
        assert_eq!(
            session.advance_chapter(&content),
            Err(ActionError::UnknownChapter(3))
        );
        assert_eq!(session.current_chapter(), 2);
    }

    #[test]
    fn test_buy_item() {
        let content = default_content();
        let mut session = GameSession::create("Aria", "warrior", "normal", &content).unwrap();
        let gold = session.player().gold;
        let price = content.item("potion").unwrap().price;

        assert_eq!(session.buy_item("village_shop", "potion", &content), Ok(price));
        assert_eq!(session.player().gold, gold - price);

        assert!(matches!(
            session.buy_item("village_shop", "chainmail", &content),
            Err(ActionError::NotSoldHere { .. })
        ));
        assert_eq!(
            session.buy_item("black_market", "potion", &content),
            Err(ActionError::UnknownShop("black_market".to_string()))
        );

        session.player_mut().gold = 0;
        let potions = session.player().character.item_count("potion");
        assert!(matches!(
            session.buy_item("village_shop", "potion", &content),
            Err(ActionError::InsufficientGold { .. })
        ));
        assert_eq!(session.player().character.item_count("potion"), potions);
    }

    #[test]
    fn test_allocate_by_name() {
        let content = default_content();
        let mut session = GameSession::create("Aria", "warrior", "normal", &content).unwrap();
        session.player_mut().stat_points = 2;
        let atk = session.player().character.atk;

        assert_eq!(
            session.allocate_stat_points("luck", 1, &content),
            Err(ActionError::InvalidStat("luck".to_string()))
        );
        session.allocate_stat_points("atk", 2, &content).unwrap();
        assert_eq!(session.player().character.atk, atk + 2);
        assert_eq!(session.player().stat_points, 0);
    }

    #[test]
    fn test_unequip_by_item_id() {
        let content = default_content();
        let mut session = GameSession::create("Aria", "warrior", "normal", &content).unwrap();
        session.equip("leather_armor", &content).unwrap();
        assert_eq!(
            session.unequip_item("leather_armor", &content),
            Ok("leather_armor".to_string())
        );
        assert_eq!(
            session.unequip_item("leather_armor", &content),
            Err(ActionError::ItemNotOwned("leather_armor".to_string()))
        );
    }

    #[test]
    fn test_snapshot_round_trip() {
        let content = default_content();
        let mut session = GameSession::create("Aria", "mage", "hard", &content).unwrap();
        session.accept_quest("goblin_hunt", &content).unwrap();
        session.start_battle("goblin", &content).unwrap();

        let json = session.snapshot().to_json().unwrap();
        let restored = GameSession::restore(SessionSnapshot::from_json(&json).unwrap());

        assert_eq!(restored.snapshot(), session.snapshot());
        assert!(restored.battle().is_none());
        assert_eq!(restored.difficulty(), "hard");
    }
}
