//! Enemy - a battle-scoped instance of an enemy definition

use super::{Character, Combatant};
use crate::config::{ConfigProvider, Difficulty, EnemyDefinition};
use crate::error::ActionError;
use serde::{Deserialize, Serialize};

/// An opponent; the combat stats belong to this instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    /// Definition id, reported to quests alongside the name
    pub id: String,
    pub character: Character,
    pub exp_reward: u32,
    pub gold_reward: u32,
    pub drop_items: Vec<String>,
}

impl Enemy {
    /// Instantiate an enemy from its definition
    pub fn new(definition: &EnemyDefinition) -> Self {
        let mut character = Character::new(&definition.name, &definition.stats);
        character.level = definition.level.max(1);
        character.skills = definition.skills.clone();

        Enemy {
            id: definition.id.clone(),
            character,
            exp_reward: definition.exp_reward,
            gold_reward: definition.gold_reward,
            drop_items: definition.drop_items.clone(),
        }
    }

    /// Instantiate an enemy by id
    pub fn from_definition(
        enemy_id: &str,
        content: &impl ConfigProvider,
    ) -> Result<Self, ActionError> {
        content
            .enemy(enemy_id)
            .map(Enemy::new)
            .ok_or_else(|| ActionError::UnknownEnemy(enemy_id.to_string()))
    }

    /// Scale HP, max HP, ATK and DEF by the difficulty multiplier
    ///
    /// Values are rounded to nearest; HP stays at least 1.
    pub fn apply_difficulty(&mut self, difficulty: &Difficulty) {
        let multiplier = difficulty.enemy_strength_multiplier;
        let scale = |value: i32| (f64::from(value) * multiplier).round() as i32;

        let c = &mut self.character;
        c.max_hp = scale(c.max_hp).max(1);
        c.hp = scale(c.hp).clamp(1, c.max_hp);
        c.atk = scale(c.atk);
        c.def = scale(c.def);
    }
}

impl Combatant for Enemy {
    fn character(&self) -> &Character {
        &self.character
    }

    fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }
}
