use std::{fs, path::Path};

use anyhow::{Context, Result};
use dungeon_crawler_system_clock::ClockConfig;
use dungeon_crawler_system_generation::GenerationConfig;
use serde::Deserialize;

/// Tunables read from the optional TOML configuration file.
///
/// Both sections are optional and every key inside them falls back to its
/// default, so a file only needs to mention the values it changes:
///
/// ```toml
/// [generation]
/// width = 60
/// enemy_spawn_rate = 0.5
///
/// [clock]
/// vision_range = 8
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) generation: GenerationConfig,
    pub(crate) clock: ClockConfig,
}

impl Settings {
    /// Reads settings from `path`, or returns the defaults when no file was given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config file {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
