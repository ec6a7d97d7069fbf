//! Weapon catalog loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::Weapon;

use crate::loaders::{LoadResult, read_file};

/// Weapon catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponCatalog {
    pub weapons: Vec<Weapon>,
}

impl WeaponCatalog {
    /// Finds a weapon by name, ignoring ASCII case. Returns a fresh copy.
    pub fn get(&self, name: &str) -> Option<Weapon> {
        self.weapons
            .iter()
            .find(|w| w.name().eq_ignore_ascii_case(name))
            .cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.weapons.iter().map(Weapon::name)
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}

/// Loader for weapon catalog from RON files.
pub struct WeaponLoader;

impl WeaponLoader {
    /// Load weapon catalog from a RON file.
    ///
    /// Every weapon is sanitized; duplicate names are rejected.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing WeaponCatalog
    pub fn load(path: &Path) -> LoadResult<WeaponCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<WeaponCatalog> {
        let catalog: WeaponCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon catalog RON: {}", e))?;

        let mut weapons: Vec<Weapon> = Vec::with_capacity(catalog.weapons.len());
        for weapon in catalog.weapons {
            if weapons
                .iter()
                .any(|w| w.name().eq_ignore_ascii_case(weapon.name()))
            {
                anyhow::bail!("Duplicate weapon '{}' in catalog", weapon.name());
            }
            weapons.push(weapon.sanitized());
        }

        tracing::debug!(count = weapons.len(), "loaded weapon catalog");
        Ok(WeaponCatalog { weapons })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
    (
        weapons: [
            Melee((
                name: "Dagger",
                damage_min: 2,
                damage_max: 4,
                hit_bonus: 2,
                extra_damage: 1,
                damage_kind: piercing,
            )),
            Ranged((
                profile: (
                    name: "Pistol",
                    damage_min: 2,
                    damage_max: 5,
                    damage_kind: ballistic,
                    range: (min: 1, max: 8),
                ),
                magazine: (loaded: 9, capacity: 6, reserve: 12, reserve_capacity: 24),
                burst: (max_burst: 2, base_penalty: 2),
            )),
        ],
    )
    "#;

    #[test]
    fn parses_both_variants_and_clamps_magazine() {
        let catalog = WeaponLoader::parse(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let dagger = catalog.get("dagger").unwrap();
        assert!(!dagger.is_ranged());
        assert_eq!(dagger.profile().hit_bonus, 2);
        assert_eq!(dagger.profile().size, 1);

        let pistol = catalog.get("Pistol").unwrap();
        assert_eq!(pistol.magazine().map(|m| m.loaded()), Some(6));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let content = r#"(weapons: [
            Melee((name: "Club", damage_min: 1, damage_max: 3)),
            Melee((name: "club", damage_min: 2, damage_max: 4)),
        ])"#;
        let err = WeaponLoader::parse(content).unwrap_err();
        assert!(err.to_string().contains("Duplicate weapon"));
    }
}
