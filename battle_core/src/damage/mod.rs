//! Damage system - rolling basic-attack and skill damage

mod calculation;
mod roll;

pub use calculation::{
    basic_attack, crit_chance, damage_range, raw_damage, roll_damage, skill_damage,
};
pub use roll::{AttackSource, DamageRoll};
