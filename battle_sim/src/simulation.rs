//! Automated battle runs

use battle_core::combat::HEAL_SKILL_ID;
use battle_core::{
    ActionError, BattleState, ConfigProvider, GameSession, PlayerAction, Player, RewardGrant,
    RollSource, Side,
};
use tracing::debug;

/// Below this HP fraction the auto player heals if it can
pub const HEAL_THRESHOLD: f64 = 0.3;

/// Pick the next action for an automated player
///
/// Heal when low and affordable, otherwise the strongest affordable
/// damaging skill, otherwise a basic attack.
pub fn choose_action(player: &Player, content: &impl ConfigProvider) -> PlayerAction {
    let c = &player.character;
    let affordable = |skill_id: &str| {
        content
            .skill(skill_id)
            .filter(|skill| skill.mp_cost <= c.mp)
    };

    if c.hp_fraction() < HEAL_THRESHOLD
        && c.knows_skill(HEAL_SKILL_ID)
        && affordable(HEAL_SKILL_ID).is_some()
    {
        return PlayerAction::Skill(HEAL_SKILL_ID.to_string());
    }

    c.skills
        .iter()
        .filter_map(|id| affordable(id.as_str()))
        .filter(|skill| skill.kind.is_damaging())
        .max_by_key(|skill| skill.power)
        .map(|skill| PlayerAction::Skill(skill.id.clone()))
        .unwrap_or(PlayerAction::Attack)
}

/// Summary of one automated battle
#[derive(Debug, Clone)]
pub struct BattleSimulation {
    /// Final state; `Active` means the turn limit ran out
    pub outcome: BattleState,
    pub turns: u32,
    pub damage_dealt: i32,
    pub damage_taken: i32,
    pub hit_count: u32,
    pub crit_count: u32,
    pub rejected_count: u32,
    pub quests_completed: Vec<String>,
    pub rewards: Vec<RewardGrant>,
    /// Rendered battle log, opening lines included
    pub lines: Vec<String>,
}

impl BattleSimulation {
    /// Fight `enemy_id` with the auto player until the battle ends or
    /// `max_turns` rounds have passed
    ///
    /// The battle is left in the session so its log stays inspectable.
    pub fn run(
        session: &mut GameSession,
        enemy_id: &str,
        content: &impl ConfigProvider,
        max_turns: u32,
        rng: &mut impl RollSource,
    ) -> Result<Self, ActionError> {
        let opening = session.start_battle(enemy_id, content)?;
        let mut result = BattleSimulation {
            outcome: opening.state(),
            turns: 0,
            damage_dealt: 0,
            damage_taken: 0,
            hit_count: 0,
            crit_count: 0,
            rejected_count: 0,
            quests_completed: Vec::new(),
            rewards: Vec::new(),
            lines: opening.log().iter().map(ToString::to_string).collect(),
        };

        while result.turns < max_turns && !result.outcome.is_terminal() {
            let action = choose_action(session.player(), content);
            debug!(turn = result.turns + 1, action = %action, "Auto action");
            let outcome = session.player_action(&action, content, rng)?;

            result.turns += 1;
            result.outcome = outcome.report.state;
            if outcome.report.rejected.is_some() {
                result.rejected_count += 1;
            }
            for entry in &outcome.report.entries {
                if let Some(damage) = entry.damage() {
                    match entry.side() {
                        Some(Side::Player) => {
                            result.damage_dealt += damage;
                            result.hit_count += 1;
                            if entry.is_critical() {
                                result.crit_count += 1;
                            }
                        }
                        Some(Side::Enemy) => result.damage_taken += damage,
                        None => {}
                    }
                }
                result.lines.push(entry.to_string());
            }
            result.quests_completed.extend(outcome.quests_completed);
            result.rewards.extend(outcome.rewards);
        }

        Ok(result)
    }

    pub fn timed_out(&self) -> bool {
        !self.outcome.is_terminal()
    }

    /// Player crit rate in percent
    pub fn crit_rate(&self) -> f64 {
        if self.hit_count > 0 {
            self.crit_count as f64 / self.hit_count as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Average player damage per round
    pub fn damage_per_turn(&self) -> f64 {
        if self.turns > 0 {
            self.damage_dealt as f64 / self.turns as f64
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{default_content, ScriptedRolls};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_policy_prefers_heal_when_low() {
        let content = default_content();
        let mut session = GameSession::create("Aria", "mage", "normal", &content).unwrap();
        assert_eq!(
            choose_action(session.player(), &content),
            PlayerAction::Skill("fireball".to_string())
        );

        session.player_mut().character.hp = 10;
        assert_eq!(
            choose_action(session.player(), &content),
            PlayerAction::Skill(HEAL_SKILL_ID.to_string())
        );

        // No MP left for anything
        session.player_mut().character.mp = 0;
        assert_eq!(choose_action(session.player(), &content), PlayerAction::Attack);
    }

    #[test]
    fn test_battle_simulation() {
        let content = default_content();
        let mut session = GameSession::create("Aria", "warrior", "normal", &content).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let result = BattleSimulation::run(&mut session, "goblin", &content, 100, &mut rng).unwrap();

        assert!(result.turns > 0);
        assert!(result.damage_dealt > 0);
        assert!(result.outcome.is_terminal());
        assert_eq!(result.lines[0], "Goblin charges at you!");
    }

    #[test]
    fn test_turn_limit() {
        let content = default_content();
        let mut session = GameSession::create("Aria", "warrior", "normal", &content).unwrap();
        session.player_mut().character.atk = 1;
        session.player_mut().character.skills.clear();
        session.player_mut().character.def = 500;

        let result = BattleSimulation::run(
            &mut session,
            "goblin",
            &content,
            3,
            &mut ScriptedRolls::midpoint(),
        )
        .unwrap();
        assert_eq!(result.turns, 3);
        assert!(result.timed_out());
        assert!(session.in_battle());
    }
}
