//! Experience, level-ups and stat-point allocation

use crate::character::Player;
use crate::config::ProgressionConstants;
use crate::error::ActionError;
use crate::types::Stat;
use tracing::{debug, info};

/// Cumulative exp needed to leave `level`
pub fn exp_threshold(level: u32, rules: &ProgressionConstants) -> u32 {
    rules.exp_per_level.max(1).saturating_mul(level)
}

/// Grant experience and process every level-up it crosses
///
/// Leaving level `L` takes `exp_per_level * L` cumulative exp, so the new
/// level is settled in one step however many thresholds the grant spans.
/// Once the threshold saturates at `u32::MAX` the level is capped.
/// Returns the number of levels gained.
pub fn add_exp(player: &mut Player, amount: u32, rules: &ProgressionConstants) -> u32 {
    let c = &mut player.character;
    c.exp = c.exp.saturating_add(amount);
    if c.exp < c.exp_to_next_level || c.exp_to_next_level == u32::MAX {
        return 0;
    }

    let target = (c.exp / rules.exp_per_level.max(1))
        .saturating_add(1)
        .max(c.level.saturating_add(1));
    let gained = target - c.level;
    if gained > 0 {
        level_up(player, gained, rules);
    }
    gained
}

/// Raise the level by `levels` and award stat points for each
pub fn level_up(player: &mut Player, levels: u32, rules: &ProgressionConstants) {
    let c = &mut player.character;
    c.level = c.level.saturating_add(levels);
    c.exp_to_next_level = exp_threshold(c.level, rules);
    player.stat_points = player
        .stat_points
        .saturating_add(rules.stat_points_per_level.saturating_mul(levels));

    info!(
        player = %player.character.name,
        level = player.character.level,
        stat_points = player.stat_points,
        "Level up"
    );
}

/// How much one point raises a stat
pub fn gain_per_point(stat: Stat, rules: &ProgressionConstants) -> i32 {
    match stat {
        Stat::Hp => rules.hp_per_point,
        Stat::Mp => rules.mp_per_point,
        _ => rules.other_per_point,
    }
}

/// Spend unallocated points on a stat
///
/// HP and MP points raise both the current value and the maximum.
pub fn allocate_stat_points(
    player: &mut Player,
    stat: Stat,
    points: u32,
    rules: &ProgressionConstants,
) -> Result<(), ActionError> {
    if points == 0 {
        return Err(ActionError::ZeroPoints);
    }
    if points > player.stat_points {
        return Err(ActionError::InsufficientStatPoints {
            requested: points,
            available: player.stat_points,
        });
    }

    let points_i32 = i32::try_from(points).unwrap_or(i32::MAX);
    let gain = gain_per_point(stat, rules).saturating_mul(points_i32);

    player.stat_points -= points;
    let c = &mut player.character;
    let raised = c.stat(stat).saturating_add(gain);
    *c.stat_mut(stat) = raised;
    match stat {
        Stat::Hp => c.hp = c.hp.saturating_add(gain),
        Stat::Mp => c.mp = c.mp.saturating_add(gain),
        _ => {}
    }
    c.clamp_resources();

    debug!(stat = %stat, points, gain, "Allocated stat points");
    Ok(())
}
