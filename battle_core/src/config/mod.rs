//! Configuration loading from TOML files
//!
//! The engine itself only ever sees parsed records through
//! [`ConfigProvider`]; this module is where those records come from.

mod constants;
mod content;

pub use constants::{CombatConstants, GameConstants, ProgressionConstants};
pub use content::{
    default_content, BaseStats, Chapter, ClassDefinition, ConfigProvider, ContentFile, Difficulty,
    EnemyDefinition, GameContent, ItemDefinition, Npc, Shop, SkillDefinition,
};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_toml(&content)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}
