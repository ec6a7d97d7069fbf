//! Armor class components.
//!
//! AC is never cached: [`ArmorBreakdown`] is rebuilt from the combatant every
//! time a hit is checked so stance switches and timed buffs apply immediately.

use core::fmt;

use crate::config::BattleConfig;

/// Stored AC terms that do not come from the modifier pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorClass {
    pub base: i32,
    pub equipment: i32,
    pub temporary: i32,
    pub other: i32,
}

impl ArmorClass {
    pub const fn new() -> Self {
        Self {
            base: BattleConfig::BASE_AC,
            equipment: 0,
            temporary: 0,
            other: 0,
        }
    }

    pub const fn with_equipment(mut self, equipment: i32) -> Self {
        self.equipment = equipment;
        self
    }
}

impl Default for ArmorClass {
    fn default() -> Self {
        Self::new()
    }
}

/// Every additive AC term, as computed for one hit check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArmorBreakdown {
    pub base: i32,
    /// `agility - 3`; zero while grappled.
    pub agility: i32,
    pub stance: i32,
    pub perk: i32,
    /// Timed buffs plus stored temporary AC.
    pub temporary: i32,
    pub equipment: i32,
    pub other: i32,
}

impl ArmorBreakdown {
    pub fn total(&self) -> i32 {
        self.base
            + self.agility
            + self.stance
            + self.perk
            + self.temporary
            + self.equipment
            + self.other
    }
}

impl fmt::Display for ArmorBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AC {} (base {}, agi {:+}, stance {:+}, perk {:+}, temp {:+}, equip {:+}, other {:+})",
            self.total(),
            self.base,
            self.agility,
            self.stance,
            self.perk,
            self.temporary,
            self.equipment,
            self.other
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sums_every_term() {
        let breakdown = ArmorBreakdown {
            base: 10,
            agility: 2,
            stance: 2,
            perk: 1,
            temporary: -2,
            equipment: 3,
            other: 1,
        };
        assert_eq!(breakdown.total(), 17);
        assert!(breakdown.to_string().starts_with("AC 17"));
    }

    #[test]
    fn default_armor_uses_base_ac() {
        assert_eq!(ArmorClass::default().base, 10);
        assert_eq!(ArmorClass::new().with_equipment(2).equipment, 2);
    }
}
