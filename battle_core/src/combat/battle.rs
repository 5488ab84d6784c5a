//! Battle - the turn-based state machine
//!
//! A [`Battle`] owns its [`Enemy`] and borrows the [`Player`] for each call
//! to [`Battle::player_action`]. Every call runs one full round: the
//! player's action, then the enemy's if the battle is still on, then the
//! terminal-state check.

use super::{BattleLogEntry, PlayerAction};
use crate::character::{Combatant, Enemy, Player};
use crate::config::{CombatConstants, ConfigProvider, Difficulty, SkillDefinition};
use crate::damage;
use crate::error::ActionError;
use crate::progression;
use crate::rng::RollSource;
use crate::types::{Side, SkillKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Skill id that support skills must carry to restore HP
pub const HEAL_SKILL_ID: &str = "heal";

/// Where a battle stands; every state but `Active` is absorbing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleState {
    Active,
    PlayerVictory,
    PlayerDefeat,
    Escaped,
}

impl BattleState {
    pub fn is_terminal(self) -> bool {
        !matches!(self, BattleState::Active)
    }
}

/// Outcome handed to the session when a battle ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum BattleEvent {
    EnemyDefeated {
        enemy_id: String,
        enemy_name: String,
        exp: u32,
        gold: u32,
        drops: Vec<String>,
        levels_gained: u32,
    },
    PlayerDefeated,
    Escaped,
}

/// Everything one call to [`Battle::player_action`] produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// Log entries appended during this round
    pub entries: Vec<BattleLogEntry>,
    pub state: BattleState,
    /// Set when the player's action was refused; the turn was still spent
    pub rejected: Option<ActionError>,
    /// Set on the round that ended the battle
    pub event: Option<BattleEvent>,
}

/// One fight between the player and an enemy
#[derive(Debug, Clone)]
pub struct Battle {
    enemy: Enemy,
    difficulty: Difficulty,
    escape_chance: u32,
    state: BattleState,
    turn: u32,
    log: Vec<BattleLogEntry>,
}

impl Battle {
    /// Start a battle against an enemy instance
    ///
    /// The difficulty multiplier is applied to the enemy here, once.
    pub fn new(mut enemy: Enemy, difficulty: Difficulty, combat: &CombatConstants) -> Self {
        enemy.apply_difficulty(&difficulty);
        let escape_chance = difficulty.escape_chance_or(combat.base_escape_chance);

        info!(
            enemy = %enemy.id,
            difficulty = %difficulty.id,
            enemy_hp = enemy.character.hp,
            escape_chance,
            "Battle started"
        );

        let log = vec![
            BattleLogEntry::Encounter {
                enemy: enemy.character.name.clone(),
            },
            BattleLogEntry::BattleStart,
        ];

        Battle {
            enemy,
            difficulty,
            escape_chance,
            state: BattleState::Active,
            turn: 0,
            log,
        }
    }

    /// Start a battle by enemy and difficulty id
    ///
    /// An unknown difficulty falls back to the neutral one.
    pub fn start(
        enemy_id: &str,
        difficulty_id: &str,
        content: &impl ConfigProvider,
    ) -> Result<Self, ActionError> {
        let enemy = Enemy::from_definition(enemy_id, content)?;
        let difficulty = content.difficulty_or_default(difficulty_id);
        Ok(Battle::new(enemy, difficulty, &content.constants().combat))
    }

    // === Accessors ===

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn escape_chance(&self) -> u32 {
        self.escape_chance
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    /// Rounds played so far
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Full log since the encounter
    pub fn log(&self) -> &[BattleLogEntry] {
        &self.log
    }

    // === Turn resolution ===

    /// Run one round with the player's chosen action
    ///
    /// A refused action (unknown or unlearned skill, missing item, not
    /// enough MP) is logged, reported in [`TurnReport::rejected`] and still
    /// costs the turn. Only a call on a finished battle returns `Err`.
    pub fn player_action(
        &mut self,
        player: &mut Player,
        action: &PlayerAction,
        content: &impl ConfigProvider,
        rng: &mut impl RollSource,
    ) -> Result<TurnReport, ActionError> {
        if self.state.is_terminal() {
            return Err(ActionError::BattleFinished);
        }

        let first_entry = self.log.len();
        self.turn += 1;
        let combat = &content.constants().combat;
        let mut rejected = None;
        let mut event = None;

        if !player.check_alive() {
            event = Some(self.finish_defeat(player));
            return Ok(self.report(first_entry, rejected, event));
        }

        debug!(turn = self.turn, action = %action, "Player action");
        match self.resolve_player_action(player, action, content, combat, rng) {
            Ok(()) => {}
            Err(error) => {
                warn!(action = %action, error = %error, "Player action rejected");
                self.log.push(BattleLogEntry::ActionFailed {
                    user: player.character.name.clone(),
                    error: error.clone(),
                });
                rejected = Some(error);
            }
        }

        if self.state == BattleState::Escaped {
            info!(turn = self.turn, "Player escaped");
            event = Some(BattleEvent::Escaped);
        } else if !self.enemy.is_alive() {
            event = Some(self.finish_victory(player, content));
        } else {
            self.enemy_turn(player, content, combat, rng);
            if !player.check_alive() {
                event = Some(self.finish_defeat(player));
            }
        }

        Ok(self.report(first_entry, rejected, event))
    }

    fn report(
        &self,
        first_entry: usize,
        rejected: Option<ActionError>,
        event: Option<BattleEvent>,
    ) -> TurnReport {
        TurnReport {
            entries: self.log[first_entry..].to_vec(),
            state: self.state,
            rejected,
            event,
        }
    }

    fn resolve_player_action(
        &mut self,
        player: &mut Player,
        action: &PlayerAction,
        content: &impl ConfigProvider,
        combat: &CombatConstants,
        rng: &mut impl RollSource,
    ) -> Result<(), ActionError> {
        match action {
            PlayerAction::Attack => {
                let roll = damage::basic_attack(
                    &player.character,
                    &self.enemy.character,
                    Side::Player,
                    combat,
                    rng,
                );
                let dealt = self.enemy.take_damage(roll.amount);
                self.log.push(BattleLogEntry::Attack {
                    side: Side::Player,
                    attacker: player.character.name.clone(),
                    target: self.enemy.character.name.clone(),
                    damage: dealt,
                    critical: roll.is_critical,
                });
            }
            PlayerAction::Skill(skill_id) => {
                let skill = content
                    .skill(skill_id)
                    .ok_or_else(|| ActionError::UnknownSkill(skill_id.clone()))?;
                if !player.character.knows_skill(skill_id) {
                    return Err(ActionError::SkillNotLearned(skill_id.clone()));
                }
                if !player.use_mp(skill.mp_cost) {
                    return Err(ActionError::InsufficientMp {
                        required: skill.mp_cost,
                        available: player.character.mp,
                    });
                }
                perform_skill(
                    player,
                    &mut self.enemy,
                    skill,
                    Side::Player,
                    combat,
                    rng,
                    &mut self.log,
                );
            }
            PlayerAction::Item(item_id) => {
                let used = player.use_item(item_id, content)?;
                self.log.push(BattleLogEntry::ItemUsed {
                    user: player.character.name.clone(),
                    item: used.item_name,
                    effect: used.effect,
                    amount: used.amount,
                });
            }
            PlayerAction::Defend => {
                self.log.push(BattleLogEntry::Defended {
                    user: player.character.name.clone(),
                });
            }
            PlayerAction::Escape => {
                if rng.chance(self.escape_chance) {
                    self.state = BattleState::Escaped;
                    self.log.push(BattleLogEntry::Escaped);
                } else {
                    self.log.push(BattleLogEntry::EscapeFailed);
                }
            }
        }
        Ok(())
    }

    /// The enemy's half of a round
    ///
    /// With skills available the enemy first rolls against the skill
    /// chance, then picks one uniformly. A pick that is missing from
    /// content or unaffordable becomes a basic attack.
    fn enemy_turn(
        &mut self,
        player: &mut Player,
        content: &impl ConfigProvider,
        combat: &CombatConstants,
        rng: &mut impl RollSource,
    ) {
        let skills = &self.enemy.character.skills;
        let chosen: Option<&SkillDefinition> =
            if !skills.is_empty() && rng.chance(combat.enemy_skill_chance) {
                let index = rng.roll_index(skills.len());
                content.skill(&skills[index])
            } else {
                None
            };

        if let Some(skill) = chosen {
            if self.enemy.use_mp(skill.mp_cost) {
                debug!(enemy = %self.enemy.id, skill = %skill.id, "Enemy uses skill");
                perform_skill(
                    &mut self.enemy,
                    player,
                    skill,
                    Side::Enemy,
                    combat,
                    rng,
                    &mut self.log,
                );
                return;
            }
        }

        let roll = damage::basic_attack(
            &self.enemy.character,
            &player.character,
            Side::Enemy,
            combat,
            rng,
        );
        let dealt = player.take_damage(roll.amount);
        self.log.push(BattleLogEntry::Attack {
            side: Side::Enemy,
            attacker: self.enemy.character.name.clone(),
            target: player.character.name.clone(),
            damage: dealt,
            critical: roll.is_critical,
        });
    }

    fn finish_victory(&mut self, player: &mut Player, content: &impl ConfigProvider) -> BattleEvent {
        self.state = BattleState::PlayerVictory;

        let exp = self.enemy.exp_reward;
        let gold = self.enemy.gold_reward;
        let drops = self.enemy.drop_items.clone();

        let levels_gained =
            progression::add_exp(player, exp, &content.constants().progression);
        player.add_gold(gold);
        for item in &drops {
            player.character.add_item(item.clone());
        }

        self.log.push(BattleLogEntry::Victory {
            enemy: self.enemy.character.name.clone(),
            exp,
            gold,
            drops: drops.clone(),
        });
        if levels_gained > 0 {
            self.log.push(BattleLogEntry::LevelUp {
                user: player.character.name.clone(),
                level: player.character.level,
            });
        }

        info!(
            enemy = %self.enemy.id,
            turns = self.turn,
            exp,
            gold,
            "Enemy defeated"
        );

        BattleEvent::EnemyDefeated {
            enemy_id: self.enemy.id.clone(),
            enemy_name: self.enemy.character.name.clone(),
            exp,
            gold,
            drops,
            levels_gained,
        }
    }

    fn finish_defeat(&mut self, player: &Player) -> BattleEvent {
        self.state = BattleState::PlayerDefeat;
        self.log.push(BattleLogEntry::Defeat {
            user: player.character.name.clone(),
        });
        info!(enemy = %self.enemy.id, turns = self.turn, "Player defeated");
        BattleEvent::PlayerDefeated
    }
}

/// Resolve a skill whose MP has already been paid
fn perform_skill<U: Combatant, T: Combatant>(
    user: &mut U,
    target: &mut T,
    skill: &SkillDefinition,
    side: Side,
    combat: &CombatConstants,
    rng: &mut impl RollSource,
    log: &mut Vec<BattleLogEntry>,
) {
    let user_name = user.name().to_string();
    log.push(BattleLogEntry::SkillUsed {
        side,
        user: user_name.clone(),
        skill: skill.name.clone(),
    });

    match skill.kind {
        SkillKind::Physical | SkillKind::Magical => {
            if let Some(roll) =
                damage::skill_damage(user.character(), target.character(), skill, side, combat, rng)
            {
                let dealt = target.take_damage(roll.amount);
                log.push(BattleLogEntry::SkillHit {
                    side,
                    target: target.name().to_string(),
                    damage: dealt,
                    critical: roll.is_critical,
                    magical: roll.source.is_magical(),
                });
            }
        }
        SkillKind::Support if skill.id == HEAL_SKILL_ID => {
            let amount = user.heal(skill.power);
            log.push(BattleLogEntry::Healed {
                side,
                user: user_name,
                amount,
            });
        }
        SkillKind::Support => {
            log.push(BattleLogEntry::NoEffect {
                user: user_name,
                skill: skill.name.clone(),
            });
        }
        SkillKind::Buff => {
            log.push(BattleLogEntry::BuffActivated {
                side,
                user: user_name,
                skill: skill.name.clone(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BaseStats, EnemyDefinition, GameContent};
    use crate::rng::ScriptedRolls;

    fn content() -> GameContent {
        let mut content = GameContent::new();
        content.register_enemy(EnemyDefinition {
            id: "dummy".to_string(),
            name: "Dummy".to_string(),
            level: 1,
            stats: BaseStats {
                hp: 100,
                mp: 0,
                atk: 10,
                matk: 0,
                def: 4,
                mdef: 0,
                agi: 1,
            },
            exp_reward: 30,
            gold_reward: 15,
            skills: Vec::new(),
            drop_items: vec!["straw".to_string()],
        });
        content.register_skill(SkillDefinition {
            id: "heal".to_string(),
            name: "Heal".to_string(),
            kind: SkillKind::Support,
            power: 30,
            mp_cost: 10,
            description: String::new(),
        });
        content.register_enemy(EnemyDefinition {
            id: "imp".to_string(),
            name: "Imp".to_string(),
            level: 1,
            stats: BaseStats {
                hp: 100,
                mp: 10,
                atk: 10,
                matk: 0,
                def: 4,
                mdef: 0,
                agi: 1,
            },
            exp_reward: 5,
            gold_reward: 1,
            // "hex" is never registered
            skills: vec!["jab".to_string(), "hex".to_string(), "heal".to_string()],
            drop_items: Vec::new(),
        });
        content.register_skill(SkillDefinition {
            id: "jab".to_string(),
            name: "Jab".to_string(),
            kind: SkillKind::Physical,
            power: 4,
            mp_cost: 3,
            description: String::new(),
        });
        content.register_skill(SkillDefinition {
            id: "battle_hymn".to_string(),
            name: "Battle Hymn".to_string(),
            kind: SkillKind::Buff,
            power: 0,
            mp_cost: 5,
            description: String::new(),
        });
        content
    }

    fn player() -> Player {
        let mut player = Player::new(
            "Aria",
            "warrior",
            "Warrior",
            &BaseStats {
                hp: 100,
                mp: 20,
                atk: 12,
                matk: 5,
                def: 6,
                mdef: 2,
                agi: 5,
            },
        );
        player.character.skills = vec!["heal".to_string(), "battle_hymn".to_string()];
        player
    }

    #[test]
    fn test_opening_log() {
        let battle = Battle::start("dummy", "normal", &content()).unwrap();
        assert_eq!(battle.log().len(), 2);
        assert_eq!(battle.log()[0].to_string(), "Dummy charges at you!");
        assert_eq!(battle.log()[1], BattleLogEntry::BattleStart);
        assert_eq!(battle.state(), BattleState::Active);
    }

    #[test]
    fn test_unknown_enemy() {
        assert_eq!(
            Battle::start("dragon", "normal", &content()).unwrap_err(),
            ActionError::UnknownEnemy("dragon".to_string())
        );
    }

    #[test]
    fn test_attack_round_midpoint() {
        let content = content();
        let mut battle = Battle::start("dummy", "normal", &content).unwrap();
        let mut p = player();
        let mut rng = ScriptedRolls::midpoint();

        let report = battle
            .player_action(&mut p, &PlayerAction::Attack, &content, &mut rng)
            .unwrap();

        // Player: 12 atk vs 4 def, midpoint 10. Enemy: 10 atk vs 6 def, raw 7, midpoint 7.
        assert_eq!(report.entries[0].damage(), Some(10));
        assert_eq!(report.entries[1].damage(), Some(7));
        assert_eq!(battle.enemy().character.hp, 90);
        assert_eq!(p.character.hp, 93);
        assert_eq!(report.state, BattleState::Active);
        assert!(report.rejected.is_none());
        assert_eq!(battle.turn(), 1);
    }

    #[test]
    fn test_rejected_action_forfeits_turn() {
        let content = content();
        let mut battle = Battle::start("dummy", "normal", &content).unwrap();
        let mut p = player();
        let mut rng = ScriptedRolls::midpoint();

        let report = battle
            .player_action(&mut p, &PlayerAction::Skill("meteor".into()), &content, &mut rng)
            .unwrap();
        assert_eq!(report.rejected, Some(ActionError::UnknownSkill("meteor".into())));
        // Enemy still attacked
        assert_eq!(p.character.hp, 93);

        p.character.mp = 3;
        let report = battle
            .player_action(&mut p, &PlayerAction::Skill("heal".into()), &content, &mut rng)
            .unwrap();
        assert_eq!(
            report.rejected,
            Some(ActionError::InsufficientMp {
                required: 10,
                available: 3
            })
        );
        assert_eq!(p.character.mp, 3);
        assert_eq!(p.character.hp, 86);
    }

    #[test]
    fn test_heal_and_buff_skills() {
        let content = content();
        let mut battle = Battle::start("dummy", "normal", &content).unwrap();
        let mut p = player();
        p.character.hp = 50;
        let mut rng = ScriptedRolls::midpoint();

        let report = battle
            .player_action(&mut p, &PlayerAction::Skill("heal".into()), &content, &mut rng)
            .unwrap();
        assert!(matches!(report.entries[1], BattleLogEntry::Healed { amount: 30, .. }));
        assert_eq!(p.character.mp, 10);
        assert_eq!(p.character.hp, 73);

        let report = battle
            .player_action(&mut p, &PlayerAction::Skill("battle_hymn".into()), &content, &mut rng)
            .unwrap();
        assert!(matches!(report.entries[1], BattleLogEntry::BuffActivated { .. }));
        assert_eq!(p.character.mp, 5);
        assert_eq!(battle.enemy().character.hp, 100);
    }

    #[test]
    fn test_victory_grants_rewards() {
        let content = content();
        let mut battle = Battle::start("dummy", "normal", &content).unwrap();
        let mut p = player();
        p.character.atk = 500;
        let mut rng = ScriptedRolls::midpoint();

        let report = battle
            .player_action(&mut p, &PlayerAction::Attack, &content, &mut rng)
            .unwrap();
        assert_eq!(report.state, BattleState::PlayerVictory);
        assert_eq!(p.character.exp, 30);
        assert_eq!(p.gold, 15);
        assert!(p.character.has_item("straw"));
        // No enemy turn after a kill
        assert_eq!(p.character.hp, 100);
        assert!(matches!(
            report.event,
            Some(BattleEvent::EnemyDefeated { ref enemy_id, .. }) if enemy_id == "dummy"
        ));

        let again = battle.player_action(&mut p, &PlayerAction::Attack, &content, &mut rng);
        assert_eq!(again, Err(ActionError::BattleFinished));
        assert_eq!(p.gold, 15);
    }

    #[test]
    fn test_defeat_latches_player() {
        let content = content();
        let mut battle = Battle::start("dummy", "normal", &content).unwrap();
        let mut p = player();
        p.character.hp = 1;
        let mut rng = ScriptedRolls::midpoint();

        let report = battle
            .player_action(&mut p, &PlayerAction::Defend, &content, &mut rng)
            .unwrap();
        assert_eq!(report.state, BattleState::PlayerDefeat);
        assert_eq!(report.event, Some(BattleEvent::PlayerDefeated));
        assert!(p.is_dead);
        assert_eq!(p.character.hp, 0);
    }

    #[test]
    fn test_escape_skips_enemy_turn() {
        let content = content();
        let mut battle = Battle::start("dummy", "normal", &content).unwrap();
        let mut p = player();
        // Roll 1 against the 70% base chance
        let mut rng = ScriptedRolls::new([0.0]);

        let report = battle
            .player_action(&mut p, &PlayerAction::Escape, &content, &mut rng)
            .unwrap();
        assert_eq!(report.state, BattleState::Escaped);
        assert_eq!(report.entries, vec![BattleLogEntry::Escaped]);
        assert_eq!(p.character.hp, 100);
        assert_eq!(rng.draws(), 1);
    }

    // Enemy turn draws: skill-chance percent, skill index, then variance and
    // crit for a damaging pick. Defend makes no draws of its own.
    fn imp_round(battle: &mut Battle, rolls: &[f64]) -> (TurnReport, Player, usize) {
        let content = content();
        let mut p = player();
        let mut rng = ScriptedRolls::new(rolls.iter().copied());
        let report = battle
            .player_action(&mut p, &PlayerAction::Defend, &content, &mut rng)
            .unwrap();
        (report, p, rng.draws())
    }

    fn imp_battle() -> Battle {
        Battle::start("imp", "normal", &content()).unwrap()
    }

    #[test]
    fn test_enemy_skill_at_chance_boundary() {
        // Roll 30 against a 30% chance picks a skill; index 0 is jab.
        // Jab: 10 atk + 4 power vs 6 def gives raw 11, range [9, 13], midpoint 11.
        let mut battle = imp_battle();
        let (report, p, draws) = imp_round(&mut battle, &[0.295, 0.0, 0.5, 0.5]);

        assert!(matches!(
            &report.entries[1],
            BattleLogEntry::SkillUsed { side: Side::Enemy, skill, .. } if skill == "Jab"
        ));
        assert_eq!(
            report.entries[2],
            BattleLogEntry::SkillHit {
                side: Side::Enemy,
                target: "Aria".to_string(),
                damage: 11,
                critical: false,
                magical: false,
            }
        );
        assert_eq!(p.character.hp, 89);
        assert_eq!(battle.enemy().character.mp, 7);
        assert_eq!(draws, 4);
    }

    #[test]
    fn test_enemy_attacks_just_above_chance() {
        // Roll 31 is a basic attack: raw 7, range [6, 8], midpoint 7
        let mut battle = imp_battle();
        let (report, p, draws) = imp_round(&mut battle, &[0.305, 0.5, 0.5]);

        assert!(matches!(
            report.entries[1],
            BattleLogEntry::Attack { side: Side::Enemy, damage: 7, critical: false, .. }
        ));
        assert_eq!(p.character.hp, 93);
        assert_eq!(battle.enemy().character.mp, 10);
        assert_eq!(draws, 3);
    }

    #[test]
    fn test_enemy_skill_index_is_uniform() {
        let picks: Vec<usize> = [0.0, 0.34, 0.67]
            .iter()
            .map(|&u| ScriptedRolls::new([u]).roll_index(3))
            .collect();
        assert_eq!(picks, vec![0, 1, 2]);
    }

    #[test]
    fn test_enemy_unresolvable_skill_falls_back_to_attack() {
        // Index 1 is "hex", which content does not define
        let mut battle = imp_battle();
        let (report, p, _) = imp_round(&mut battle, &[0.295, 0.34, 0.5, 0.5]);

        assert_eq!(report.entries.len(), 2);
        assert!(matches!(
            report.entries[1],
            BattleLogEntry::Attack { side: Side::Enemy, damage: 7, .. }
        ));
        assert_eq!(p.character.hp, 93);
        assert_eq!(battle.enemy().character.mp, 10);
    }

    #[test]
    fn test_enemy_unaffordable_skill_falls_back_to_attack() {
        let mut battle = imp_battle();
        battle.enemy.character.mp = 2;
        let (report, p, _) = imp_round(&mut battle, &[0.295, 0.0, 0.5, 0.5]);

        assert!(matches!(
            report.entries[1],
            BattleLogEntry::Attack { side: Side::Enemy, damage: 7, .. }
        ));
        assert_eq!(p.character.hp, 93);
        assert_eq!(battle.enemy().character.mp, 2);
    }

    #[test]
    fn test_enemy_heals_itself() {
        let mut battle = imp_battle();
        battle.enemy.character.hp = 50;
        let (report, p, draws) = imp_round(&mut battle, &[0.295, 0.67]);

        assert_eq!(
            report.entries[2],
            BattleLogEntry::Healed {
                side: Side::Enemy,
                user: "Imp".to_string(),
                amount: 30,
            }
        );
        assert_eq!(battle.enemy().character.hp, 80);
        assert_eq!(battle.enemy().character.mp, 0);
        assert_eq!(p.character.hp, 100);
        assert_eq!(draws, 2);
    }

    #[test]
    fn test_enemy_skill_crit_chance_is_ten_percent() {
        // Crit roll 10 is inside the 10% enemy skill chance
        let mut battle = imp_battle();
        let (report, _, _) = imp_round(&mut battle, &[0.295, 0.0, 0.5, 0.095]);
        assert!(matches!(
            report.entries[2],
            BattleLogEntry::SkillHit { damage: 22, critical: true, .. }
        ));

        // Crit roll 11 is not
        let mut battle = imp_battle();
        let (report, _, _) = imp_round(&mut battle, &[0.295, 0.0, 0.5, 0.105]);
        assert!(matches!(
            report.entries[2],
            BattleLogEntry::SkillHit { damage: 11, critical: false, .. }
        ));
    }
}
