//! TOML configuration for the strata driver.

use std::path::Path;

use serde::Deserialize;
use strata_types::EngineConfig;

/// Top-level configuration, parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Engine geometry.
    pub engine: EngineSection,
    /// Logging configuration.
    pub log: LogSection,
}

/// `[engine]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    /// Chunk slot width in bytes.
    pub chunk_width: usize,
    /// Arena capacity in bytes.
    pub arena_capacity: usize,
}

impl Default for EngineSection {
    fn default() -> Self {
        let defaults = EngineConfig::default();
        Self {
            chunk_width: defaults.chunk_width,
            arena_capacity: defaults.arena_capacity,
        }
    }
}

/// `[log]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Log level filter (e.g. `"info"`, `"debug"`).
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl CliConfig {
    /// Load config from a TOML file, or defaults if no path given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)?;
                let config: CliConfig = toml::from_str(&content)?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Engine configuration from the `[engine]` section.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            chunk_width: self.engine.chunk_width,
            arena_capacity: self.engine.arena_capacity,
        }
    }
}
