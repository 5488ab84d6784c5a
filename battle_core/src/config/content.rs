//! Content records - classes, enemies, skills, items, difficulties,
//! chapters and shops

use super::{ConfigError, GameConstants};
use crate::quest::QuestDefinition;
use crate::types::{ItemEffect, ItemKind, SkillKind, Stat};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Read-only access to content, keyed by string id
///
/// Lookups return `None` when the record is absent; callers turn that into
/// an [`crate::error::ActionError`] or a safe default.
pub trait ConfigProvider {
    fn class(&self, id: &str) -> Option<&ClassDefinition>;
    fn enemy(&self, id: &str) -> Option<&EnemyDefinition>;
    fn skill(&self, id: &str) -> Option<&SkillDefinition>;
    fn item(&self, id: &str) -> Option<&ItemDefinition>;
    fn difficulty(&self, id: &str) -> Option<&Difficulty>;
    fn chapter(&self, id: u32) -> Option<&Chapter>;
    fn shop(&self, id: &str) -> Option<&Shop>;
    fn constants(&self) -> &GameConstants;

    /// Difficulty by id, or the neutral difficulty when absent
    fn difficulty_or_default(&self, id: &str) -> Difficulty {
        self.difficulty(id)
            .cloned()
            .unwrap_or_else(|| Difficulty::neutral(id))
    }
}

/// Starting combat stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseStats {
    pub hp: i32,
    pub mp: i32,
    pub atk: i32,
    pub matk: i32,
    #[serde(alias = "defense")]
    pub def: i32,
    pub mdef: i32,
    pub agi: i32,
}

impl Default for BaseStats {
    fn default() -> Self {
        BaseStats {
            hp: 100,
            mp: 50,
            atk: 10,
            matk: 10,
            def: 5,
            mdef: 5,
            agi: 5,
        }
    }
}

/// Playable class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub base_stats: BaseStats,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub starting_items: Vec<String>,
    #[serde(default)]
    pub starting_gold: u32,
}

/// Opponent template; stats sit at the top level of the record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyDefinition {
    pub id: String,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(flatten)]
    pub stats: BaseStats,
    #[serde(default)]
    pub exp_reward: u32,
    #[serde(default)]
    pub gold_reward: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub drop_items: Vec<String>,
}

fn default_level() -> u32 {
    1
}

/// Skill record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: SkillKind,
    #[serde(default)]
    pub power: i32,
    #[serde(default)]
    pub mp_cost: i32,
    #[serde(default)]
    pub description: String,
}

/// Item record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ItemKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effect: Option<ItemEffect>,
    #[serde(default)]
    pub value: Option<i32>,
    /// Additive bonuses applied while equipped
    #[serde(default)]
    pub stat_bonus: BTreeMap<Stat, i32>,
    #[serde(default)]
    pub price: u32,
}

/// Difficulty setting, applied once when a battle starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_multiplier")]
    pub enemy_strength_multiplier: f64,
    /// Replaces the base escape chance when set
    #[serde(default)]
    pub escape_chance: Option<u32>,
}

fn default_multiplier() -> f64 {
    1.0
}

impl Difficulty {
    /// Difficulty that leaves enemies untouched
    pub fn neutral(id: impl Into<String>) -> Self {
        let id = id.into();
        Difficulty {
            name: id.clone(),
            id,
            description: String::new(),
            enemy_strength_multiplier: 1.0,
            escape_chance: None,
        }
    }

    /// Escape chance for this difficulty, given the base chance
    pub fn escape_chance_or(&self, base: u32) -> u32 {
        self.escape_chance.unwrap_or(base).min(100)
    }
}

/// Non-player character in a chapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub dialogue: String,
    #[serde(default)]
    pub quests_available: Vec<String>,
}

/// Story chapter; quests are accepted from here
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quests: Vec<QuestDefinition>,
    #[serde(default)]
    pub npcs: Vec<Npc>,
}

impl Chapter {
    /// Find a quest offered in this chapter
    pub fn quest(&self, id: &str) -> Option<&QuestDefinition> {
        self.quests.iter().find(|q| q.id == id)
    }
}

/// Shop listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl Shop {
    pub fn sells(&self, item_id: &str) -> bool {
        self.items.iter().any(|i| i == item_id)
    }
}

/// On-disk layout of a content file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentFile {
    #[serde(default)]
    pub constants: GameConstants,
    #[serde(default)]
    pub classes: Vec<ClassDefinition>,
    #[serde(default)]
    pub enemies: Vec<EnemyDefinition>,
    #[serde(default)]
    pub skills: Vec<SkillDefinition>,
    #[serde(default)]
    pub items: Vec<ItemDefinition>,
    #[serde(default)]
    pub difficulties: Vec<Difficulty>,
    #[serde(default)]
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub shops: Vec<Shop>,
}

/// Indexed content, the standard [`ConfigProvider`]
#[derive(Debug, Clone, Default)]
pub struct GameContent {
    constants: GameConstants,
    classes: HashMap<String, ClassDefinition>,
    enemies: HashMap<String, EnemyDefinition>,
    skills: HashMap<String, SkillDefinition>,
    items: HashMap<String, ItemDefinition>,
    difficulties: HashMap<String, Difficulty>,
    chapters: BTreeMap<u32, Chapter>,
    shops: HashMap<String, Shop>,
}

impl GameContent {
    /// Create empty content with default constants
    pub fn new() -> Self {
        Self::default()
    }

    /// Load content from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file: ContentFile = super::load_toml(path)?;
        Self::from_file(file)
    }

    /// Load content from a TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let file: ContentFile = super::parse_toml(content)?;
        Self::from_file(file)
    }

    /// Index and validate a parsed content file
    pub fn from_file(file: ContentFile) -> Result<Self, ConfigError> {
        let content = GameContent {
            constants: file.constants,
            classes: index("class", file.classes, |c| c.id.clone())?,
            enemies: index("enemy", file.enemies, |e| e.id.clone())?,
            skills: index("skill", file.skills, |s| s.id.clone())?,
            items: index("item", file.items, |i| i.id.clone())?,
            difficulties: index("difficulty", file.difficulties, |d| d.id.clone())?,
            chapters: index_ordered(file.chapters)?,
            shops: index("shop", file.shops, |s| s.id.clone())?,
        };
        content.validate()?;
        Ok(content)
    }

    /// Check numeric sanity of every record
    pub fn validate(&self) -> Result<(), ConfigError> {
        let combat = &self.constants.combat;
        if combat.variance_min_percent > combat.variance_max_percent {
            return Err(ConfigError::ValidationError(format!(
                "variance_min_percent {} exceeds variance_max_percent {}",
                combat.variance_min_percent, combat.variance_max_percent
            )));
        }
        if combat.base_escape_chance > 100 {
            return Err(ConfigError::ValidationError(format!(
                "base_escape_chance {} exceeds 100",
                combat.base_escape_chance
            )));
        }

        for difficulty in self.difficulties.values() {
            let multiplier = difficulty.enemy_strength_multiplier;
            if multiplier.is_nan() || multiplier <= 0.0 {
                return Err(ConfigError::ValidationError(format!(
                    "difficulty {} has non-positive enemy_strength_multiplier",
                    difficulty.id
                )));
            }
            if difficulty.escape_chance.is_some_and(|c| c > 100) {
                return Err(ConfigError::ValidationError(format!(
                    "difficulty {} has escape_chance above 100",
                    difficulty.id
                )));
            }
        }

        for chapter in self.chapters.values() {
            for quest in &chapter.quests {
                if quest.objective.count == 0 {
                    return Err(ConfigError::ValidationError(format!(
                        "quest {} in chapter {} has a zero-count objective",
                        quest.id, chapter.id
                    )));
                }
            }
        }

        Ok(())
    }

    // === Registration ===

    pub fn set_constants(&mut self, constants: GameConstants) {
        self.constants = constants;
    }

    pub fn register_class(&mut self, class: ClassDefinition) {
        self.classes.insert(class.id.clone(), class);
    }

    pub fn register_enemy(&mut self, enemy: EnemyDefinition) {
        self.enemies.insert(enemy.id.clone(), enemy);
    }

    pub fn register_skill(&mut self, skill: SkillDefinition) {
        self.skills.insert(skill.id.clone(), skill);
    }

    pub fn register_item(&mut self, item: ItemDefinition) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn register_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulties.insert(difficulty.id.clone(), difficulty);
    }

    pub fn register_chapter(&mut self, chapter: Chapter) {
        self.chapters.insert(chapter.id, chapter);
    }

    pub fn register_shop(&mut self, shop: Shop) {
        self.shops.insert(shop.id.clone(), shop);
    }

    // === Listing ===

    /// Class ids in sorted order
    pub fn class_ids(&self) -> Vec<&str> {
        sorted_keys(&self.classes)
    }

    /// Difficulty ids in sorted order
    pub fn difficulty_ids(&self) -> Vec<&str> {
        sorted_keys(&self.difficulties)
    }

    /// Chapters in id order
    pub fn chapters(&self) -> impl Iterator<Item = &Chapter> {
        self.chapters.values()
    }
}

fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

fn index<T>(
    kind: &str,
    records: Vec<T>,
    key: impl Fn(&T) -> String,
) -> Result<HashMap<String, T>, ConfigError> {
    let mut map = HashMap::with_capacity(records.len());
    for record in records {
        let id = key(&record);
        if map.insert(id.clone(), record).is_some() {
            return Err(ConfigError::ValidationError(format!(
                "duplicate {} id: {}",
                kind, id
            )));
        }
    }
    Ok(map)
}

fn index_ordered(chapters: Vec<Chapter>) -> Result<BTreeMap<u32, Chapter>, ConfigError> {
    let mut map = BTreeMap::new();
    for chapter in chapters {
        let id = chapter.id;
        if map.insert(id, chapter).is_some() {
            return Err(ConfigError::ValidationError(format!(
                "duplicate chapter id: {}",
                id
            )));
        }
    }
    Ok(map)
}

impl ConfigProvider for GameContent {
    fn class(&self, id: &str) -> Option<&ClassDefinition> {
        self.classes.get(id)
    }

    fn enemy(&self, id: &str) -> Option<&EnemyDefinition> {
        self.enemies.get(id)
    }

    fn skill(&self, id: &str) -> Option<&SkillDefinition> {
        self.skills.get(id)
    }

    fn item(&self, id: &str) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    fn difficulty(&self, id: &str) -> Option<&Difficulty> {
        self.difficulties.get(id)
    }

    fn chapter(&self, id: u32) -> Option<&Chapter> {
        self.chapters.get(&id)
    }

    fn shop(&self, id: &str) -> Option<&Shop> {
        self.shops.get(id)
    }

    fn constants(&self) -> &GameConstants {
        &self.constants
    }
}

/// Get the bundled content set
pub fn default_content() -> GameContent {
    let toml = include_str!("../../config/content.toml");
    GameContent::parse(toml).unwrap_or_else(|_| fallback_content())
}

/// Smallest content set that can still run a battle
fn fallback_content() -> GameContent {
    let mut content = GameContent::new();
    content.register_class(ClassDefinition {
        id: "adventurer".to_string(),
        name: "Adventurer".to_string(),
        description: String::new(),
        base_stats: BaseStats::default(),
        skills: vec!["heal".to_string()],
        starting_items: Vec::new(),
        starting_gold: 0,
    });
    content.register_enemy(EnemyDefinition {
        id: "goblin".to_string(),
        name: "Goblin".to_string(),
        level: 1,
        stats: BaseStats {
            hp: 30,
            mp: 0,
            atk: 8,
            matk: 0,
            def: 2,
            mdef: 1,
            agi: 6,
        },
        exp_reward: 20,
        gold_reward: 10,
        skills: Vec::new(),
        drop_items: Vec::new(),
    });
    content.register_skill(SkillDefinition {
        id: "heal".to_string(),
        name: "Heal".to_string(),
        kind: SkillKind::Support,
        power: 30,
        mp_cost: 10,
        description: String::new(),
    });
    content.register_difficulty(Difficulty::neutral("normal"));
    content
}
