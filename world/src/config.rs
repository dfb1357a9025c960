//! Tunables for a battle session, loadable from TOML.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use plant_duel_core::Unlocks;
use plant_duel_system_special::Config as SpecialConfig;
use plant_duel_system_spawning::Config as SpawningConfig;
use plant_duel_system_turn_engine::DamageTable;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seed used when the configuration does not name one.
pub const DEFAULT_SEED: u64 = 0x5eed_d0e1;

/// Complete configuration for a battle session.
///
/// Every table is optional in TOML; missing values fall back to the shipped
/// defaults.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Seed for the boss rotation, enemy picks and special rolls.
    pub seed: Option<u64>,
    /// Player tuning.
    pub player: PlayerConfig,
    /// Damage figures used by the turn engine.
    pub damage: DamageTable,
    /// Enemy progression tuning.
    pub spawning: SpawningConfig,
    /// Special attack tuning.
    pub special: SpecialConfig,
    /// Round presentation timing.
    pub timing: TimingConfig,
}

/// Player tuning.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Health the player starts every cycle with.
    pub max_health: u32,
    /// Abilities held from the start, mostly useful while testing bosses.
    pub starting_unlocks: Unlocks,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_health: 10,
            starting_unlocks: Unlocks::none(),
        }
    }
}

/// Round presentation timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Length of one countdown beat in milliseconds.
    pub beat_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self { beat_ms: 500 }
    }
}

impl TimingConfig {
    /// Length of one countdown beat.
    #[must_use]
    pub const fn beat(&self) -> Duration {
        Duration::from_millis(self.beat_ms)
    }
}

/// Errors raised while loading or validating a [`BattleConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read battle config from {path}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The configuration was not valid TOML or did not match the schema.
    #[error("failed to parse battle config")]
    Parse(#[from] toml::de::Error),
    /// A value parsed but is outside its accepted range.
    #[error("invalid battle config: `{field}` {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was refused.
        reason: &'static str,
    },
}

impl BattleConfig {
    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Seed in effect for the session.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Rejects values the battle cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player.max_health == 0 {
            return Err(invalid("player.max_health", "must be at least 1"));
        }
        if self.spawning.normal_health == 0 {
            return Err(invalid("spawning.normal_health", "must be at least 1"));
        }
        if self.spawning.boss_health == 0 {
            return Err(invalid("spawning.boss_health", "must be at least 1"));
        }
        if !is_positive(self.spawning.hp_scale_per_set) {
            return Err(invalid(
                "spawning.hp_scale_per_set",
                "must be a positive finite number",
            ));
        }
        if !is_positive(self.spawning.final_boss_hp_multiplier) {
            return Err(invalid(
                "spawning.final_boss_hp_multiplier",
                "must be a positive finite number",
            ));
        }
        if self.special.meter_max == 0 {
            return Err(invalid("special.meter_max", "must be at least 1"));
        }

        let chances = [
            ("special.base_hit_chance", self.special.base_hit_chance),
            ("special.hit_chance_per_streak", self.special.hit_chance_per_streak),
            ("special.max_hit_chance", self.special.max_hit_chance),
        ];
        for (field, chance) in chances {
            if !(0.0..=1.0).contains(&chance) {
                return Err(invalid(field, "must lie within 0.0..=1.0"));
            }
        }

        Ok(())
    }
}

fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

const fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
