//! battle_sim - seeded, headless battle runs against battle_core content
//!
//! Creates a session, accepts quests, fights an enemy with the auto
//! player and prints the battle log followed by the session snapshot.
//! Set `RUST_LOG=debug` to trace every action.

mod simulation;

use anyhow::{bail, Context, Result};
use battle_core::session::DEFAULT_DIFFICULTY;
use battle_core::{default_content, GameContent, GameSession};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use simulation::BattleSimulation;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Run seeded RPG battles from the command line
#[derive(Parser)]
#[command(name = "battle_sim")]
#[command(about = "Headless battle runner", long_about = None)]
#[command(version)]
struct Cli {
    /// Content file (TOML); the built-in content is used when omitted
    #[arg(long, value_name = "PATH")]
    content: Option<PathBuf>,

    /// Player name
    #[arg(long, default_value = "Hero")]
    name: String,

    /// Class id
    #[arg(long, default_value = "warrior")]
    class: String,

    /// Enemy id to fight
    #[arg(long, default_value = "goblin")]
    enemy: String,

    /// Difficulty id
    #[arg(long, default_value = DEFAULT_DIFFICULTY)]
    difficulty: String,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Round limit per battle
    #[arg(long, default_value_t = 100)]
    max_turns: u32,

    /// Quest to accept from chapter 1 before fighting (repeatable)
    #[arg(long = "quest", value_name = "ID")]
    quests: Vec<String>,

    /// Number of battles to fight in sequence
    #[arg(long, default_value_t = 1)]
    battles: u32,
}

fn load_content(path: Option<&PathBuf>) -> Result<GameContent> {
    match path {
        Some(path) => GameContent::load(path)
            .with_context(|| format!("Failed to load content from {}", path.display())),
        None => Ok(default_content()),
    }
}

/// Filter from `RUST_LOG`-style directives; INFO when unset or invalid
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        ))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let content = load_content(cli.content.as_ref())?;
    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);

    let mut session = GameSession::create(cli.name.as_str(), &cli.class, cli.difficulty.as_str(), &content)
        .with_context(|| format!("Cannot create a {} character", cli.class))?;
    for quest_id in &cli.quests {
        session
            .accept_quest(quest_id, &content)
            .with_context(|| format!("Cannot accept quest {quest_id}"))?;
    }

    info!(seed = cli.seed, battles = cli.battles, "Starting simulation");

    for battle_no in 1..=cli.battles {
        if session.player().is_dead {
            bail!("{} has fallen and cannot fight battle {battle_no}", cli.name);
        }

        let result = BattleSimulation::run(&mut session, &cli.enemy, &content, cli.max_turns, &mut rng)
            .with_context(|| format!("Battle {battle_no} against {} failed", cli.enemy))?;

        println!("=== Battle {battle_no} ===");
        for line in &result.lines {
            println!("{line}");
        }
        for quest_id in &result.quests_completed {
            println!("Quest complete: {quest_id}");
        }
        for grant in &result.rewards {
            println!(
                "Reward for {}: {} exp, {} gold, {} item(s)",
                grant.quest_id,
                grant.reward.exp,
                grant.reward.gold,
                grant.reward.items.len()
            );
        }
        println!(
            "-- {:?} after {} turns: {} dealt, {} taken, {:.1}/turn, {:.0}% crits, {} refused",
            result.outcome,
            result.turns,
            result.damage_dealt,
            result.damage_taken,
            result.damage_per_turn(),
            result.crit_rate(),
            result.rejected_count,
        );
        if result.timed_out() {
            println!("-- Turn limit reached");
            session.end_battle();
        }
    }

    let snapshot = session.snapshot().to_json()?;
    println!("{snapshot}");
    Ok(())
}
