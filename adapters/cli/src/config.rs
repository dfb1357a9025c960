//! Combined configuration file read by the command-line adapter.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use plant_duel_presentation::PresentationConfig;
use plant_duel_world::BattleConfig;
use serde::Deserialize;

/// Contents of the optional `--config` file.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) battle: BattleConfig,
    pub(crate) presentation: PresentationConfig,
}

impl AppConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents).context("failed to parse config toml")?;
        config
            .battle
            .validate()
            .context("battle settings out of range")?;
        Ok(config)
    }
}
