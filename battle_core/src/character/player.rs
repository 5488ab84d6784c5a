//! Player - the session-owned character

use super::{Character, ClampedResources, Combatant};
use crate::config::{BaseStats, ConfigProvider};
use crate::error::ActionError;
use crate::types::{EquipmentSlot, ItemEffect, ItemKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A consumable that was used
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUse {
    pub item_id: String,
    pub item_name: String,
    pub effect: ItemEffect,
    /// HP or MP actually restored
    pub amount: i32,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub character: Character,
    pub class_id: String,
    /// Display name of the class
    pub class_name: String,
    pub gold: u32,
    /// Unspent stat points
    pub stat_points: u32,
    /// At most one item per slot
    pub equipped: BTreeMap<EquipmentSlot, String>,
    /// Current HP/MP an equipped item cut off, given back on unequip
    #[serde(default)]
    pub equip_clamped: BTreeMap<EquipmentSlot, ClampedResources>,
    /// Set the first time the player is observed dead, never cleared
    pub is_dead: bool,
    /// Latest title granted by a quest
    #[serde(default)]
    pub title: Option<String>,
}

impl Player {
    /// Create a player with the given stats and nothing else
    pub fn new(
        name: impl Into<String>,
        class_id: impl Into<String>,
        class_name: impl Into<String>,
        stats: &BaseStats,
    ) -> Self {
        Player {
            character: Character::new(name, stats),
            class_id: class_id.into(),
            class_name: class_name.into(),
            gold: 0,
            stat_points: 0,
            equipped: BTreeMap::new(),
            equip_clamped: BTreeMap::new(),
            is_dead: false,
            title: None,
        }
    }

    /// Create a player from a class definition
    pub fn from_class(
        name: impl Into<String>,
        class_id: &str,
        content: &impl ConfigProvider,
    ) -> Result<Self, ActionError> {
        let class = content
            .class(class_id)
            .ok_or_else(|| ActionError::UnknownClass(class_id.to_string()))?;

        let mut player = Player::new(name, &class.id, &class.name, &class.base_stats);
        player.character.skills = class.skills.clone();
        player.character.items = class.starting_items.clone();
        player.gold = class.starting_gold;
        Ok(player)
    }

    /// Check whether the player is alive, latching `is_dead` on the first
    /// observation of zero HP
    pub fn check_alive(&mut self) -> bool {
        let alive = self.character.is_alive();
        if !alive && !self.is_dead {
            tracing::info!(player = %self.character.name, "Player has fallen");
            self.is_dead = true;
        }
        alive
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Spend gold; nothing changes if the player cannot afford it
    pub fn remove_gold(&mut self, amount: u32) -> Result<(), ActionError> {
        if self.gold < amount {
            return Err(ActionError::InsufficientGold {
                required: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }

    /// Item id in a slot, if any
    pub fn equipped_in(&self, slot: EquipmentSlot) -> Option<&str> {
        self.equipped.get(&slot).map(String::as_str)
    }

    pub fn level(&self) -> u32 {
        self.character.level
    }

    /// Use one copy of a consumable from the inventory
    ///
    /// On error nothing changes.
    pub fn use_item(
        &mut self,
        item_id: &str,
        content: &impl ConfigProvider,
    ) -> Result<ItemUse, ActionError> {
        let item = content
            .item(item_id)
            .ok_or_else(|| ActionError::UnknownItem(item_id.to_string()))?;
        let effect = match (item.kind, item.effect) {
            (ItemKind::Consumable, Some(effect)) => effect,
            _ => return Err(ActionError::NotConsumable(item_id.to_string())),
        };
        if !self.character.remove_item(item_id) {
            return Err(ActionError::ItemNotOwned(item_id.to_string()));
        }

        let value = item.value.unwrap_or(0);
        let amount = match effect {
            ItemEffect::HealHp => self.character.heal(value),
            ItemEffect::RestoreMp => self.character.restore_mp(value),
        };
        tracing::debug!(item = %item_id, amount, "Used item");

        Ok(ItemUse {
            item_id: item_id.to_string(),
            item_name: item.name.clone(),
            effect,
            amount,
        })
    }
}

impl Combatant for Player {
    fn character(&self) -> &Character {
        &self.character
    }

    fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }
}
