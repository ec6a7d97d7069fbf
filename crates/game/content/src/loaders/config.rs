//! Battle configuration loader.

use std::path::Path;

use tactics_core::BattleConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for battle configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys take their defaults; unusable values are replaced with a
    /// warning (see [`BattleConfig::sanitized`]).
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing BattleConfig
    pub fn load(path: &Path) -> LoadResult<BattleConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<BattleConfig> {
        let config: BattleConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config.sanitized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            activation_threshold = 50

            [action_pool]
            minor = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.activation_threshold, 50);
        assert_eq!(config.action_pool.minor, 3);
        assert_eq!(config.action_pool.major, 1);
        assert_eq!(config.tick_interval_ms, BattleConfig::DEFAULT_TICK_INTERVAL_MS);
        assert!(config.auto_end_turn);
    }

    #[test]
    fn non_positive_threshold_falls_back() {
        let config = ConfigLoader::parse("activation_threshold = -5").unwrap();
        assert_eq!(
            config.activation_threshold,
            BattleConfig::DEFAULT_ACTIVATION_THRESHOLD
        );
    }
}
