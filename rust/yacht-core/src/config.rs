//! Configuration for yacht drivers (CLI, benches).
//!
//! Loaded from YAML; every field has a default so an empty document is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::chance::Roller;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Combination supplier settings.
    #[serde(default)]
    pub chance: ChanceConfig,
    /// Event log settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanceKind {
    /// Dice keyed by (seed, roll index); reproducible across runs.
    #[default]
    Deterministic,
    /// Seeded ChaCha8 stream.
    Rng,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChanceConfig {
    #[serde(default)]
    pub mode: ChanceKind,
    #[serde(default)]
    pub seed: u64,
}

impl ChanceConfig {
    pub fn roller(&self) -> Roller {
        match self.mode {
            ChanceKind::Deterministic => Roller::new_deterministic(self.seed),
            ChanceKind::Rng => Roller::new_rng(self.seed),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// NDJSON event log path. No events are written when unset.
    #[serde(default)]
    pub events_path: Option<String>,
    /// Flush the event log every N lines (0 = only on close).
    #[serde(default = "default_flush_every_lines")]
    pub flush_every_lines: u64,
}

fn default_flush_every_lines() -> u64 {
    1
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            events_path: None,
            flush_every_lines: default_flush_every_lines(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
