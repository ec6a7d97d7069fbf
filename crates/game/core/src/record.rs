//! Persistent character records read at battle start and written back at the end.

use crate::combatant::{Combatant, Side, Target, UnitId};
use crate::engine::BehaviorKind;
use crate::modifier::PerkId;
use crate::stats::{ArmorClass, Attributes};
use crate::weapon::Weapon;

/// A character as stored between battles.
///
/// Only HP and ammunition change during a battle; everything else is read-only
/// from the core's point of view.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterRecord {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub side: Side,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: Attributes,
    /// Persisted HP; `None` means full.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub perk: Option<PerkId>,
    /// AC from worn equipment.
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment_ac: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub loadout: Vec<Weapon>,
    /// Acting capability for non-player combatants.
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior: Option<BehaviorKind>,
}

impl CharacterRecord {
    pub fn new(name: impl Into<String>, side: Side, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            side,
            attributes,
            hp: None,
            perk: None,
            equipment_ac: 0,
            loadout: Vec::new(),
            behavior: None,
        }
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = Some(hp);
        self
    }

    pub fn with_perk(mut self, perk: PerkId) -> Self {
        self.perk = Some(perk);
        self
    }

    pub fn with_equipment_ac(mut self, equipment_ac: i32) -> Self {
        self.equipment_ac = equipment_ac;
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.loadout.push(weapon);
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorKind) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Builds the battle-time combatant. Attributes and HP are clamped.
    pub fn to_combatant(&self, id: UnitId) -> Combatant {
        let combatant = Combatant::new(id, self.name.clone(), self.side, self.attributes)
            .with_armor(ArmorClass::new().with_equipment(self.equipment_ac))
            .with_perk(self.perk);

        match self.hp {
            Some(hp) => combatant.with_current_hp(hp),
            None => combatant,
        }
    }

    /// Loadout with every weapon sanitized.
    pub fn battle_loadout(&self) -> Vec<Weapon> {
        self.loadout.iter().cloned().map(Weapon::sanitized).collect()
    }

    /// Copies the state a battle is allowed to change back into the record.
    pub fn absorb(&mut self, combatant: &Combatant, loadout: &[Weapon]) {
        self.hp = Some(combatant.current_hp());
        self.loadout = loadout.to_vec();
    }
}
