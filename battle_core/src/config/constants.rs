//! Game constants configuration

use serde::{Deserialize, Serialize};

/// Tunable game constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub combat: CombatConstants,
    #[serde(default)]
    pub progression: ProgressionConstants,
}

/// Numbers used by damage resolution and the battle loop
///
/// Every chance is a whole percent checked against a 1-100 roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatConstants {
    #[serde(default = "default_player_attack_crit")]
    pub player_attack_crit_chance: u32,
    #[serde(default = "default_enemy_attack_crit")]
    pub enemy_attack_crit_chance: u32,
    #[serde(default = "default_player_skill_crit")]
    pub player_skill_crit_chance: u32,
    #[serde(default = "default_enemy_skill_crit")]
    pub enemy_skill_crit_chance: u32,
    /// Critical hits multiply the rolled damage by this
    #[serde(default = "default_crit_multiplier")]
    pub crit_multiplier: i32,
    /// Lower bound of the damage roll as a percent of raw damage
    #[serde(default = "default_variance_min")]
    pub variance_min_percent: i32,
    /// Upper bound of the damage roll as a percent of raw damage
    #[serde(default = "default_variance_max")]
    pub variance_max_percent: i32,
    /// Chance an enemy with skills picks one instead of attacking
    #[serde(default = "default_enemy_skill_chance")]
    pub enemy_skill_chance: u32,
    /// Used when the difficulty has no override
    #[serde(default = "default_escape_chance")]
    pub base_escape_chance: u32,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            player_attack_crit_chance: 10,
            enemy_attack_crit_chance: 5,
            player_skill_crit_chance: 15,
            enemy_skill_crit_chance: 10,
            crit_multiplier: 2,
            variance_min_percent: 80,
            variance_max_percent: 120,
            enemy_skill_chance: 30,
            base_escape_chance: 70,
        }
    }
}

fn default_player_attack_crit() -> u32 {
    10
}
fn default_enemy_attack_crit() -> u32 {
    5
}
fn default_player_skill_crit() -> u32 {
    15
}
fn default_enemy_skill_crit() -> u32 {
    10
}
fn default_crit_multiplier() -> i32 {
    2
}
fn default_variance_min() -> i32 {
    80
}
fn default_variance_max() -> i32 {
    120
}
fn default_enemy_skill_chance() -> u32 {
    30
}
fn default_escape_chance() -> u32 {
    70
}

/// Experience curve and stat-point economy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// Cumulative exp needed for the next level is `exp_per_level * level`
    #[serde(default = "default_exp_per_level")]
    pub exp_per_level: u32,
    #[serde(default = "default_stat_points_per_level")]
    pub stat_points_per_level: u32,
    /// Added to both HP and max HP per allocated point
    #[serde(default = "default_hp_per_point")]
    pub hp_per_point: i32,
    /// Added to both MP and max MP per allocated point
    #[serde(default = "default_mp_per_point")]
    pub mp_per_point: i32,
    /// Every other stat
    #[serde(default = "default_other_per_point")]
    pub other_per_point: i32,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            exp_per_level: 100,
            stat_points_per_level: 5,
            hp_per_point: 5,
            mp_per_point: 3,
            other_per_point: 1,
        }
    }
}

fn default_exp_per_level() -> u32 {
    100
}
fn default_stat_points_per_level() -> u32 {
    5
}
fn default_hp_per_point() -> i32 {
    5
}
fn default_mp_per_point() -> i32 {
    3
}
fn default_other_per_point() -> i32 {
    1
}
