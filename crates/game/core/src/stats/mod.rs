//! Combatant stat model.
//!
//! ```text
//! [ Attributes ] ──► max HP, initiative per round, attribute modifiers
//!       │
//!       ▼
//! [ ArmorClass + modifier pipeline ] ──► ArmorBreakdown (recomputed per hit)
//! ```

pub mod armor;
pub mod attributes;
pub mod health;

pub use armor::{ArmorBreakdown, ArmorClass};
pub use attributes::{AttributeKind, Attributes};
pub use health::Health;
