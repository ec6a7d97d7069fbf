//! Content factory for loading a whole battle from a data directory.

use std::path::{Path, PathBuf};

use tactics_core::{BattleConfig, CharacterRecord};

use crate::loaders::{ConfigLoader, LoadResult, RosterLoader, WeaponCatalog, WeaponLoader};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── weapons.ron
/// └── roster.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load battle configuration from `config.toml`.
    ///
    /// A missing file is not an error: defaults are used with a warning.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config file missing; using defaults");
            return Ok(BattleConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load weapon catalog from `weapons.ron`.
    pub fn load_weapons(&self) -> LoadResult<WeaponCatalog> {
        let path = self.data_dir.join("weapons.ron");
        WeaponLoader::load(&path)
    }

    /// Load character records from `roster.ron`, resolving weapon names
    /// against `weapons.ron`.
    pub fn load_roster(&self) -> LoadResult<Vec<CharacterRecord>> {
        let catalog = self.load_weapons()?;
        let path = self.data_dir.join("roster.ron");
        RosterLoader::load(&path, &catalog)
    }

    /// Writes records back to `roster.ron` with weapons inline.
    pub fn save_roster(&self, records: &[CharacterRecord]) -> LoadResult<()> {
        let path = self.data_dir.join("roster.ron");
        let content = RosterLoader::to_ron(records)?;
        std::fs::write(&path, content)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
