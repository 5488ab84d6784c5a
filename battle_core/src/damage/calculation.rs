//! Damage calculation - turning stats + an attack into a DamageRoll

use super::{AttackSource, DamageRoll};
use crate::character::Character;
use crate::config::{CombatConstants, SkillDefinition};
use crate::rng::RollSource;
use crate::types::{Side, SkillKind};

/// `max(1, offense - defense / 2)`, halving with floor division
pub fn raw_damage(offense: i32, defense: i32) -> i32 {
    offense.saturating_sub(defense.div_euclid(2)).max(1)
}

/// Inclusive variance range for a raw amount
///
/// Both bounds are rounded half-up and the upper bound never falls below
/// the lower one.
pub fn damage_range(raw: i32, combat: &CombatConstants) -> (i32, i32) {
    let scale = |percent: i32| -> i32 {
        let scaled = (i64::from(raw) * i64::from(percent) + 50).div_euclid(100);
        scaled.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    };
    let low = scale(combat.variance_min_percent);
    let high = scale(combat.variance_max_percent).max(low);
    (low, high)
}

/// Critical-hit chance for a side and attack source
pub fn crit_chance(side: Side, source: AttackSource, combat: &CombatConstants) -> u32 {
    match (side, source.is_skill()) {
        (Side::Player, false) => combat.player_attack_crit_chance,
        (Side::Enemy, false) => combat.enemy_attack_crit_chance,
        (Side::Player, true) => combat.player_skill_crit_chance,
        (Side::Enemy, true) => combat.enemy_skill_crit_chance,
    }
}

/// Roll variance then crit for a raw amount
///
/// Makes exactly two draws, in that order.
pub fn roll_damage(
    raw: i32,
    source: AttackSource,
    side: Side,
    combat: &CombatConstants,
    rng: &mut impl RollSource,
) -> DamageRoll {
    let (low, high) = damage_range(raw, combat);
    let rolled = rng.roll_range(low, high);
    let is_critical = rng.chance(crit_chance(side, source, combat));
    let amount = if is_critical {
        rolled.saturating_mul(combat.crit_multiplier)
    } else {
        rolled
    };

    DamageRoll {
        source,
        raw,
        low,
        high,
        rolled,
        is_critical,
        amount,
    }
}

/// Basic attack: `atk` against `def`
pub fn basic_attack(
    attacker: &Character,
    defender: &Character,
    side: Side,
    combat: &CombatConstants,
    rng: &mut impl RollSource,
) -> DamageRoll {
    let raw = raw_damage(attacker.atk, defender.def);
    roll_damage(raw, AttackSource::BasicAttack, side, combat, rng)
}

/// Damaging skill: physical uses `atk + power` against `def`, magical uses
/// `matk + power` against `mdef`
///
/// Returns `None` for support and buff skills, without drawing.
pub fn skill_damage(
    attacker: &Character,
    defender: &Character,
    skill: &SkillDefinition,
    side: Side,
    combat: &CombatConstants,
    rng: &mut impl RollSource,
) -> Option<DamageRoll> {
    let (raw, source) = match skill.kind {
        SkillKind::Physical => (
            raw_damage(attacker.atk.saturating_add(skill.power), defender.def),
            AttackSource::PhysicalSkill,
        ),
        SkillKind::Magical => (
            raw_damage(attacker.matk.saturating_add(skill.power), defender.mdef),
            AttackSource::MagicalSkill,
        ),
        SkillKind::Support | SkillKind::Buff => return None,
    };
    Some(roll_damage(raw, source, side, combat, rng))
}
