//! CLI-specific configuration.
use std::env;
use std::path::PathBuf;

use tactics_core::BattleConfig;

/// Terminal driver configuration.
///
/// Values set here override the ones loaded from `config.toml`.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub tick_interval_ms: Option<u64>,
    pub seed: Option<u64>,
    /// Write HP and ammo back to `roster.ron` when the battle ends.
    pub save_roster: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            tick_interval_ms: None,
            seed: None,
            save_roster: false,
        }
    }
}

impl CliConfig {
    /// Construct CLI configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_DATA_DIR` - Directory with config.toml, weapons.ron and roster.ron (default: `data`)
    /// - `TACTICS_TICK_MS` - Tick interval override in milliseconds
    /// - `TACTICS_SEED` - Dice seed override
    /// - `TACTICS_SAVE_ROSTER` - Write the roster back after the battle (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("TACTICS_DATA_DIR") {
            config.data_dir = dir;
        }
        config.tick_interval_ms = read_env("TACTICS_TICK_MS");
        config.seed = read_env("TACTICS_SEED");
        if let Some(save) = read_env::<bool>("TACTICS_SAVE_ROSTER") {
            config.save_roster = save;
        }

        config
    }

    /// Applies the overrides on top of a loaded battle configuration.
    pub fn apply(&self, mut battle: BattleConfig) -> BattleConfig {
        if let Some(ms) = self.tick_interval_ms {
            battle.tick_interval_ms = ms;
        }
        if let Some(seed) = self.seed {
            battle.seed = seed;
        }
        battle.sanitized()
    }
}

/// Result of looking for a `.env` file at startup.
#[derive(Debug, PartialEq, Eq)]
pub enum EnvFile {
    Loaded(PathBuf),
    Missing,
    Invalid(String),
}

impl EnvFile {
    /// Loads `.env` into the process environment. Call before [`CliConfig::from_env`].
    pub fn load() -> Self {
        Self::from_result(dotenvy::dotenv())
    }

    fn from_result(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => Self::Loaded(path),
            Err(err) if err.not_found() => Self::Missing,
            Err(err) => Self::Invalid(err.to_string()),
        }
    }

    /// Logs the outcome once a subscriber is installed.
    pub fn log(&self) {
        match self {
            Self::Loaded(path) => tracing::debug!(path = %path.display(), "loaded .env"),
            Self::Missing => tracing::debug!("no .env file found"),
            Self::Invalid(err) => tracing::warn!(%err, "ignoring invalid .env file"),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
