//! Quests - defeat objectives driven by battle outcomes
//!
//! - [`QuestDefinition`]: read-only record offered by a chapter
//! - [`Quest`]: an accepted quest with its progress
//! - [`QuestLog`]: the session's quests plus the set of rewarded ids

mod definition;
mod log;

pub use definition::{Objective, Quest, QuestDefinition, QuestReward};
pub use log::{QuestLog, RewardGrant};
