//! Character roster loader.
//!
//! A roster is a list of character records. Weapons may be written inline in a
//! record's `loadout` or referenced by name from the weapon catalog.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::CharacterRecord;

use crate::loaders::{LoadResult, WeaponCatalog, read_file};

/// One roster line: a record plus catalog weapon names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub record: CharacterRecord,
    /// Catalog names appended to the record's loadout, in order.
    #[serde(default)]
    pub weapons: Vec<String>,
}

/// Loader for character rosters from RON files.
pub struct RosterLoader;

impl RosterLoader {
    /// Load a roster from a RON file and resolve weapon names.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing `Vec<RosterEntry>`
    /// * `catalog` - Catalog used to resolve weapon names
    ///
    /// # Returns
    ///
    /// Returns the records in file order; that order becomes unit order.
    pub fn load(path: &Path, catalog: &WeaponCatalog) -> LoadResult<Vec<CharacterRecord>> {
        let content = read_file(path)?;
        Self::parse(&content, catalog)
    }

    pub fn parse(content: &str, catalog: &WeaponCatalog) -> LoadResult<Vec<CharacterRecord>> {
        let entries: Vec<RosterEntry> = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse roster RON: {}", e))?;

        entries
            .into_iter()
            .map(|entry| Self::resolve(entry, catalog))
            .collect()
    }

    fn resolve(entry: RosterEntry, catalog: &WeaponCatalog) -> LoadResult<CharacterRecord> {
        let RosterEntry {
            mut record,
            weapons,
        } = entry;

        for name in weapons {
            let weapon = catalog.get(&name).ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown weapon '{}' for character '{}'",
                    name,
                    record.name
                )
            })?;
            record.loadout.push(weapon);
        }

        Ok(record)
    }

    /// Serializes records back into roster RON (weapons inline).
    pub fn to_ron(records: &[CharacterRecord]) -> LoadResult<String> {
        let entries: Vec<RosterEntry> = records
            .iter()
            .cloned()
            .map(|record| RosterEntry {
                record,
                weapons: Vec::new(),
            })
            .collect();

        ron::ser::to_string_pretty(&entries, ron::ser::PrettyConfig::default())
            .map_err(|e| anyhow::anyhow!("Failed to serialize roster RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_core::{Side, Weapon, WeaponProfile};

    fn catalog() -> WeaponCatalog {
        WeaponCatalog {
            weapons: vec![Weapon::melee(WeaponProfile::new("Dagger", 2, 4))],
        }
    }

    #[test]
    fn weapon_names_resolve_from_catalog() {
        let roster = r#"[
            (
                record: (name: "Vex", attributes: (strength: 3, agility: 5, endurance: 4)),
                weapons: ["dagger"],
            ),
            (
                record: (name: "Raider", side: enemy, behavior: Some(brute)),
            ),
        ]"#;

        let records = RosterLoader::parse(roster, &catalog()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].side, Side::Player);
        assert_eq!(records[0].loadout[0].name(), "Dagger");
        assert_eq!(records[1].attributes.strength, 3);
    }

    #[test]
    fn unknown_weapon_names_fail() {
        let roster = r#"[(record: (name: "Vex"), weapons: ["Railgun"])]"#;
        let err = RosterLoader::parse(roster, &catalog()).unwrap_err();
        assert!(err.to_string().contains("Railgun"));
    }

    #[test]
    fn serialized_roster_parses_back() {
        let records = RosterLoader::parse(
            r#"[(record: (name: "Vex", hp: Some(7)), weapons: ["Dagger"])]"#,
            &catalog(),
        )
        .unwrap();

        let text = RosterLoader::to_ron(&records).unwrap();
        let reloaded = RosterLoader::parse(&text, &WeaponCatalog::default()).unwrap();
        assert_eq!(reloaded, records);
    }
}
