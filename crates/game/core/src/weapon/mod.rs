//! Weapon model.
//!
//! Every weapon shares one immutable [`WeaponProfile`]. Melee weapons are
//! stateless; ranged weapons add a [`Magazine`] (mutable, persists across
//! turns) and a [`BurstProfile`]. Attack resolution branches on the variant
//! exactly once, when it picks the hit/damage path.

pub mod ammo;
pub mod burst;

pub use ammo::{Magazine, ReloadError};
pub use burst::BurstProfile;

use crate::stats::{AttributeKind, Attributes};

/// Damage category; decides which attribute governs hit and damage.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DamageKind {
    Blunt,
    #[default]
    Slashing,
    Piercing,
    Ballistic,
}

impl DamageKind {
    /// Strength for blunt weapons, agility for everything else.
    pub fn governing_attribute(self) -> AttributeKind {
        match self {
            DamageKind::Blunt => AttributeKind::Strength,
            _ => AttributeKind::Agility,
        }
    }
}

/// Extra effect applied to the target on a hit.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EffectTag {
    #[default]
    None,
    /// Target hit -2 for one turn.
    Stagger,
    /// Target AC -2 for two turns.
    Sunder,
    /// Target loses its agility AC term until its next turn ends.
    Grapple,
}

/// Minimum attribute needed to wield a weapon without penalty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Requirement {
    #[cfg_attr(feature = "serde", serde(default))]
    pub attribute: AttributeKind,
    pub minimum: i32,
}

impl Requirement {
    pub const NONE: Self = Self {
        attribute: AttributeKind::Strength,
        minimum: 0,
    };

    pub const fn strength(minimum: i32) -> Self {
        Self {
            attribute: AttributeKind::Strength,
            minimum,
        }
    }

    /// `max(0, minimum - attribute)`
    pub fn deficit(&self, attributes: &Attributes) -> i32 {
        (self.minimum - attributes.get(self.attribute)).max(0)
    }
}

/// Inclusive effective range in tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeBand {
    pub min: u32,
    pub max: u32,
}

impl RangeBand {
    pub const MELEE: Self = Self { min: 0, max: 1 };

    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, distance: u32) -> bool {
        (self.min..=self.max).contains(&distance)
    }
}

impl Default for RangeBand {
    fn default() -> Self {
        Self::MELEE
    }
}

/// Immutable descriptor shared by every weapon variant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponProfile {
    pub name: String,
    pub damage_min: i32,
    pub damage_max: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub hit_bonus: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub extra_damage: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage_kind: DamageKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirement: Requirement,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effect: EffectTag,
    /// Recoil multiplier for under-strength self-damage.
    #[cfg_attr(feature = "serde", serde(default = "default_size"))]
    pub size: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub range: RangeBand,
}

#[cfg(feature = "serde")]
fn default_size() -> i32 {
    1
}

impl WeaponProfile {
    pub fn new(name: impl Into<String>, damage_min: i32, damage_max: i32) -> Self {
        Self {
            name: name.into(),
            damage_min,
            damage_max,
            hit_bonus: 0,
            extra_damage: 0,
            damage_kind: DamageKind::default(),
            requirement: Requirement::NONE,
            effect: EffectTag::None,
            size: 1,
            range: RangeBand::MELEE,
        }
    }

    pub fn with_hit_bonus(mut self, hit_bonus: i32) -> Self {
        self.hit_bonus = hit_bonus;
        self
    }

    pub fn with_extra_damage(mut self, extra_damage: i32) -> Self {
        self.extra_damage = extra_damage;
        self
    }

    pub fn with_damage_kind(mut self, damage_kind: DamageKind) -> Self {
        self.damage_kind = damage_kind;
        self
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    pub fn with_effect(mut self, effect: EffectTag) -> Self {
        self.effect = effect;
        self
    }

    pub fn with_size(mut self, size: i32) -> Self {
        self.size = size;
        self
    }

    pub fn with_range(mut self, range: RangeBand) -> Self {
        self.range = range;
        self
    }

    pub fn governing_attribute(&self) -> AttributeKind {
        self.damage_kind.governing_attribute()
    }

    /// Repairs inverted ranges and negative sizes, warning about each fix.
    pub fn sanitized(mut self) -> Self {
        if self.damage_min > self.damage_max {
            tracing::warn!(weapon = %self.name, "inverted damage range; swapping bounds");
            core::mem::swap(&mut self.damage_min, &mut self.damage_max);
        }
        if self.range.min > self.range.max {
            tracing::warn!(weapon = %self.name, "inverted range band; swapping bounds");
            core::mem::swap(&mut self.range.min, &mut self.range.max);
        }
        if self.size < 0 {
            tracing::warn!(weapon = %self.name, size = self.size, "negative weapon size; using 0");
            self.size = 0;
        }
        self
    }
}

/// Ranged weapon: profile plus ammunition and burst state.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangedWeapon {
    pub profile: WeaponProfile,
    pub magazine: Magazine,
    #[cfg_attr(feature = "serde", serde(default))]
    pub burst: BurstProfile,
}

impl RangedWeapon {
    pub fn new(profile: WeaponProfile, magazine: Magazine, burst: BurstProfile) -> Self {
        Self {
            profile,
            magazine,
            burst,
        }
    }
}

/// Closed set of weapon variants.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weapon {
    Melee(WeaponProfile),
    Ranged(RangedWeapon),
}

impl Weapon {
    pub fn melee(profile: WeaponProfile) -> Self {
        Self::Melee(profile)
    }

    pub fn ranged(profile: WeaponProfile, magazine: Magazine, burst: BurstProfile) -> Self {
        Self::Ranged(RangedWeapon::new(profile, magazine, burst))
    }

    pub fn profile(&self) -> &WeaponProfile {
        match self {
            Weapon::Melee(profile) => profile,
            Weapon::Ranged(ranged) => &ranged.profile,
        }
    }

    pub fn name(&self) -> &str {
        &self.profile().name
    }

    pub fn is_ranged(&self) -> bool {
        matches!(self, Weapon::Ranged(_))
    }

    pub fn magazine(&self) -> Option<&Magazine> {
        match self {
            Weapon::Melee(_) => None,
            Weapon::Ranged(ranged) => Some(&ranged.magazine),
        }
    }

    pub fn magazine_mut(&mut self) -> Option<&mut Magazine> {
        match self {
            Weapon::Melee(_) => None,
            Weapon::Ranged(ranged) => Some(&mut ranged.magazine),
        }
    }

    /// Reloads a ranged weapon; melee weapons refuse.
    pub fn reload(&mut self) -> Result<u32, ReloadError> {
        self.magazine_mut()
            .ok_or(ReloadError::NotRanged)?
            .reload()
    }

    pub fn sanitized(self) -> Self {
        match self {
            Weapon::Melee(profile) => Weapon::Melee(profile.sanitized()),
            Weapon::Ranged(ranged) => Weapon::Ranged(RangedWeapon {
                profile: ranged.profile.sanitized(),
                magazine: ranged.magazine.sanitized(),
                burst: ranged.burst,
            }),
        }
    }
}
