//! Mutually exclusive combat stances.

use super::{ModifierDeltas, ModifierSource};

/// A switchable stance. Exactly one is active per combatant.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StanceKind {
    /// No adjustments.
    #[default]
    Neutral,
    /// AC +2.
    Defensive,
    /// Damage +2, AC -1.
    Aggressive,
    /// Hit +2.
    Focused,
    /// Incoming hit values -2.
    Evasive,
}

impl ModifierSource for StanceKind {
    fn name(&self) -> &str {
        self.as_ref()
    }

    fn deltas(&self) -> ModifierDeltas {
        match self {
            StanceKind::Neutral => ModifierDeltas::ZERO,
            StanceKind::Defensive => ModifierDeltas::ac(2),
            StanceKind::Aggressive => ModifierDeltas {
                damage: 2,
                ac: -1,
                ..ModifierDeltas::ZERO
            },
            StanceKind::Focused => ModifierDeltas::hit(2),
            StanceKind::Evasive => ModifierDeltas::evasion(2),
        }
    }
}
