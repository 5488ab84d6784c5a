//! Equipment - additive stat bonuses from equipped items
//!
//! Bonuses are applied and removed through the same enum-keyed stat table.
//! HP and MP bonuses change the maximums only; current HP/MP cut off by a
//! lowered maximum is remembered per slot and given back on unequip, so
//! equip followed by unequip restores every stat exactly.

use crate::character::{Character, ClampedResources, Player};
use crate::config::{ConfigProvider, ItemDefinition};
use crate::error::ActionError;
use crate::types::{EquipmentSlot, Stat};
use std::collections::BTreeMap;
use tracing::info;

/// Result of a successful equip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquipOutcome {
    pub slot: EquipmentSlot,
    pub equipped: String,
    /// Item that was in the slot before, now back in the inventory
    pub replaced: Option<String>,
}

/// Add every bonus in the map to the character
///
/// Returns the current HP/MP lost to lowered maximums.
pub fn apply_bonus(character: &mut Character, bonus: &BTreeMap<Stat, i32>) -> ClampedResources {
    for (&stat, &value) in bonus {
        let raised = character.stat(stat).saturating_add(value);
        *character.stat_mut(stat) = raised;
    }
    character.clamp_resources()
}

/// Subtract every bonus in the map, then give back `clamped`
pub fn remove_bonus(
    character: &mut Character,
    bonus: &BTreeMap<Stat, i32>,
    clamped: ClampedResources,
) {
    for (&stat, &value) in bonus {
        let lowered = character.stat(stat).saturating_sub(value);
        *character.stat_mut(stat) = lowered;
    }
    character.clamp_resources();
    character.heal(clamped.hp);
    character.restore_mp(clamped.mp);
}

fn hp_bonus(item: &ItemDefinition) -> i32 {
    item.stat_bonus.get(&Stat::Hp).copied().unwrap_or(0)
}

/// Equip an item from the inventory
///
/// An occupied slot is emptied first. An item that would leave max HP
/// below 1 is refused. On error nothing changes.
pub fn equip(
    player: &mut Player,
    item_id: &str,
    content: &impl ConfigProvider,
) -> Result<EquipOutcome, ActionError> {
    let item = content
        .item(item_id)
        .ok_or_else(|| ActionError::UnknownItem(item_id.to_string()))?;
    let slot = item
        .kind
        .slot()
        .ok_or_else(|| ActionError::NotEquippable(item_id.to_string()))?;
    if !player.character.has_item(item_id) {
        return Err(ActionError::ItemNotOwned(item_id.to_string()));
    }

    let outgoing_hp = match player.equipped_in(slot) {
        Some(current) => content
            .item(current)
            .map(hp_bonus)
            .ok_or_else(|| ActionError::UnknownItem(current.to_string()))?,
        None => 0,
    };
    let max_hp = player
        .character
        .max_hp
        .saturating_sub(outgoing_hp)
        .saturating_add(hp_bonus(item));
    if max_hp < 1 {
        return Err(ActionError::LethalEquipment(item_id.to_string()));
    }

    let replaced = if player.equipped_in(slot).is_some() {
        Some(unequip(player, slot, content)?)
    } else {
        None
    };

    player.character.remove_item(item_id);
    let clamped = apply_bonus(&mut player.character, &item.stat_bonus);
    player.equipped.insert(slot, item_id.to_string());
    if !clamped.is_empty() {
        player.equip_clamped.insert(slot, clamped);
    }

    info!(item = %item_id, slot = %slot, "Equipped");
    Ok(EquipOutcome {
        slot,
        equipped: item_id.to_string(),
        replaced,
    })
}

/// Empty a slot, returning the item to the inventory
///
/// Returns the id of the removed item.
pub fn unequip(
    player: &mut Player,
    slot: EquipmentSlot,
    content: &impl ConfigProvider,
) -> Result<String, ActionError> {
    let item_id = player
        .equipped_in(slot)
        .ok_or(ActionError::SlotEmpty(slot))?
        .to_string();
    let item: &ItemDefinition = content
        .item(&item_id)
        .ok_or_else(|| ActionError::UnknownItem(item_id.clone()))?;

    let clamped = player.equip_clamped.remove(&slot).unwrap_or_default();
    remove_bonus(&mut player.character, &item.stat_bonus, clamped);
    player.equipped.remove(&slot);
    player.character.add_item(item_id.clone());

    info!(item = %item_id, slot = %slot, "Unequipped");
    Ok(item_id)
}

/// Slot holding the given item, if it is equipped
pub fn slot_of(player: &Player, item_id: &str) -> Option<EquipmentSlot> {
    player
        .equipped
        .iter()
        .find(|(_, id)| id.as_str() == item_id)
        .map(|(slot, _)| *slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{default_content, BaseStats, GameContent};
    use crate::types::ItemKind;

    fn player_with(items: &[&str]) -> Player {
        let mut player = Player::new("Aria", "warrior", "Warrior", &BaseStats::default());
        for item in items {
            player.character.add_item(*item);
        }
        player
    }

    #[test]
    fn test_equip_applies_bonus() {
        let content = default_content();
        let mut player = player_with(&["iron_sword"]);
        let atk = player.character.atk;

        let outcome = equip(&mut player, "iron_sword", &content).unwrap();
        assert_eq!(outcome.slot, EquipmentSlot::Weapon);
        assert_eq!(outcome.replaced, None);
        assert_eq!(player.character.atk, atk + 5);
        assert_eq!(player.equipped_in(EquipmentSlot::Weapon), Some("iron_sword"));
        assert!(!player.character.has_item("iron_sword"));
    }

    #[test]
    fn test_equip_then_unequip_is_exact_inverse() {
        let content = default_content();
        let mut player = player_with(&["chainmail"]);
        player.character.take_damage(30);
        let before = player.character.clone();

        equip(&mut player, "chainmail", &content).unwrap();
        assert_eq!(player.character.max_hp, before.max_hp + 20);
        assert_eq!(player.character.agi, before.agi - 1);
        // Current HP is untouched by the max HP bonus
        assert_eq!(player.character.hp, before.hp);

        unequip(&mut player, EquipmentSlot::Armor, &content).unwrap();
        assert_eq!(player.character, before);
        assert!(player.equipped.is_empty());
    }

    #[test]
    fn test_equip_replaces_occupied_slot() {
        let content = default_content();
        let mut player = player_with(&["leather_armor", "chainmail"]);
        let base_def = player.character.def;

        equip(&mut player, "leather_armor", &content).unwrap();
        let outcome = equip(&mut player, "chainmail", &content).unwrap();

        assert_eq!(outcome.replaced.as_deref(), Some("leather_armor"));
        assert_eq!(player.character.def, base_def + 6);
        assert!(player.character.has_item("leather_armor"));
        assert_eq!(player.equipped_in(EquipmentSlot::Armor), Some("chainmail"));
    }

    #[test]
    fn test_equip_rejections() {
        let content = default_content();
        let mut player = player_with(&["potion"]);
        let before = player.clone();

        assert_eq!(
            equip(&mut player, "potion", &content),
            Err(ActionError::NotEquippable("potion".to_string()))
        );
        assert_eq!(
            equip(&mut player, "iron_sword", &content),
            Err(ActionError::ItemNotOwned("iron_sword".to_string()))
        );
        assert_eq!(
            equip(&mut player, "excalibur", &content),
            Err(ActionError::UnknownItem("excalibur".to_string()))
        );
        assert_eq!(
            unequip(&mut player, EquipmentSlot::Weapon, &content),
            Err(ActionError::SlotEmpty(EquipmentSlot::Weapon))
        );
        assert_eq!(player, before);
    }

    #[test]
    fn test_removing_max_hp_bonus_clamps_current() {
        let content = default_content();
        let mut player = player_with(&["leather_armor"]);
        equip(&mut player, "leather_armor", &content).unwrap();
        player.character.heal(1000);
        assert_eq!(player.character.hp, 110);

        unequip(&mut player, EquipmentSlot::Armor, &content).unwrap();
        assert_eq!(player.character.hp, 100);
        assert_eq!(player.character.max_hp, 100);
    }

    fn cursed(id: &str, hp: i32, mp: i32) -> ItemDefinition {
        let mut item = ItemDefinition {
            id: id.to_string(),
            name: id.to_string(),
            kind: ItemKind::Armor,
            description: String::new(),
            effect: None,
            value: None,
            stat_bonus: BTreeMap::new(),
            price: 0,
        };
        item.stat_bonus.insert(Stat::Hp, hp);
        item.stat_bonus.insert(Stat::Mp, mp);
        item.stat_bonus.insert(Stat::Mdef, 4);
        item
    }

    #[test]
    fn test_negative_resource_bonus_is_exact_inverse() {
        let mut content = GameContent::new();
        content.register_item(cursed("cursed_mail", -60, -80));
        let mut player = player_with(&["cursed_mail"]);
        let before = player.character.clone();

        equip(&mut player, "cursed_mail", &content).unwrap();
        assert_eq!(player.character.max_hp, 40);
        assert_eq!(player.character.hp, 40);
        assert_eq!(player.character.max_mp, -30);
        assert_eq!(player.character.mp, 0);
        assert_eq!(
            player.equip_clamped.get(&EquipmentSlot::Armor),
            Some(&ClampedResources { hp: 60, mp: 50 })
        );
        assert_eq!(slot_of(&player, "cursed_mail"), Some(EquipmentSlot::Armor));

        unequip(&mut player, EquipmentSlot::Armor, &content).unwrap();
        assert_eq!(player.character, before);
        assert!(player.equip_clamped.is_empty());
    }

    #[test]
    fn test_lethal_equipment_is_refused() {
        let mut content = default_content();
        content.register_item(cursed("doom_plate", -200, 0));
        content.register_item(cursed("grim_plate", -99, 0));
        content.register_item(cursed("bone_plate", -100, 0));
        let mut player = player_with(&["doom_plate", "leather_armor", "grim_plate", "bone_plate"]);
        let before = player.clone();

        assert_eq!(
            equip(&mut player, "doom_plate", &content),
            Err(ActionError::LethalEquipment("doom_plate".to_string()))
        );
        assert_eq!(player, before);

        // Leather armor's +10 comes off first: 110 - 10 - 100 = 0
        equip(&mut player, "leather_armor", &content).unwrap();
        let wearing = player.clone();
        assert_eq!(
            equip(&mut player, "bone_plate", &content),
            Err(ActionError::LethalEquipment("bone_plate".to_string()))
        );
        assert_eq!(player, wearing);

        // 110 - 10 - 99 = 1 is still alive
        equip(&mut player, "grim_plate", &content).unwrap();
        assert_eq!(player.character.max_hp, 1);
        assert_eq!(player.character.hp, 1);
        assert!(player.character.is_alive());
    }
}
