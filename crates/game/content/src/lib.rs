//! Data-driven content definitions and loaders.
//!
//! This crate reads battle content from RON/TOML data files:
//! - Weapon catalogs (data-driven via RON)
//! - Character rosters (data-driven via RON)
//! - Battle configuration (data-driven via TOML)
//!
//! All loaders use tactics-core types directly with serde for RON/TOML deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, LoadResult, RosterEntry, RosterLoader, WeaponCatalog,
    WeaponLoader,
};
