//! Modifier pipeline: stances, perks and timed buffs.
//!
//! Every source exposes a bundle of numeric [`ModifierDeltas`] plus optional
//! lifecycle hooks. The [`ModifierPipeline`] owns one stance slot, at most one
//! perk and a bounded list of timed buffs; it sums their deltas into the
//! effective modifier consumed by attack resolution and AC computation, and
//! dispatches hooks in a fixed order (stance, then perk).
//!
//! Damage hooks only ever see melee damage. Ranged damage is finalized on a
//! separate path in [`crate::combat::damage`] that never touches the pipeline.

pub mod buff;
pub mod perk;
pub mod pipeline;
pub mod stance;

pub use buff::{TimedBuff, TimedBuffs};
pub use perk::PerkId;
pub use pipeline::ModifierPipeline;
pub use stance::StanceKind;

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};

use crate::stats::Health;

/// Additive adjustments contributed by one modifier source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierDeltas {
    pub hit: i32,
    pub damage: i32,
    pub ac: i32,
    pub initiative: i32,
    /// Subtracted from the hit value of attacks against the owner.
    pub evasion: i32,
}

impl ModifierDeltas {
    pub const ZERO: Self = Self {
        hit: 0,
        damage: 0,
        ac: 0,
        initiative: 0,
        evasion: 0,
    };

    pub const fn hit(hit: i32) -> Self {
        Self { hit, ..Self::ZERO }
    }

    pub const fn damage(damage: i32) -> Self {
        Self { damage, ..Self::ZERO }
    }

    pub const fn ac(ac: i32) -> Self {
        Self { ac, ..Self::ZERO }
    }

    pub const fn initiative(initiative: i32) -> Self {
        Self {
            initiative,
            ..Self::ZERO
        }
    }

    pub const fn evasion(evasion: i32) -> Self {
        Self {
            evasion,
            ..Self::ZERO
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

impl Add for ModifierDeltas {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            hit: self.hit + rhs.hit,
            damage: self.damage + rhs.damage,
            ac: self.ac + rhs.ac,
            initiative: self.initiative + rhs.initiative,
            evasion: self.evasion + rhs.evasion,
        }
    }
}

impl AddAssign for ModifierDeltas {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for ModifierDeltas {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for ModifierDeltas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hit {:+}, dmg {:+}, ac {:+}, init {:+}, eva {:+}",
            self.hit, self.damage, self.ac, self.initiative, self.evasion
        )
    }
}

/// Scratch space handed to lifecycle hooks.
///
/// Hooks cannot reach the owning combatant directly; they read its HP from the
/// context and request effects, which the combatant applies once every hook
/// has run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HookContext {
    pub current_hp: i32,
    pub max_hp: i32,
    heal: i32,
    grants: Vec<TimedBuff>,
    notes: Vec<String>,
}

impl HookContext {
    pub fn new(health: &Health) -> Self {
        Self {
            current_hp: health.current(),
            max_hp: health.maximum(),
            ..Self::default()
        }
    }

    /// Requests healing for the owner.
    pub fn heal(&mut self, amount: i32) {
        self.heal += amount.max(0);
    }

    /// Requests a timed buff for the owner.
    pub fn grant(&mut self, buff: TimedBuff) {
        self.grants.push(buff);
    }

    /// Records a log line describing what the hook did.
    pub fn note(&mut self, message: impl Into<String>) {
        self.notes.push(message.into());
    }

    pub fn requested_heal(&self) -> i32 {
        self.heal
    }

    pub fn into_parts(self) -> (i32, Vec<TimedBuff>, Vec<String>) {
        (self.heal, self.grants, self.notes)
    }
}

/// A named bundle of deltas with optional lifecycle hooks.
///
/// Every hook defaults to a no-op, so a source only overrides what it uses.
pub trait ModifierSource: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn deltas(&self) -> ModifierDeltas {
        ModifierDeltas::ZERO
    }

    fn on_battle_start(&mut self, _ctx: &mut HookContext) {}

    fn on_turn_start(&mut self, _ctx: &mut HookContext) {}

    fn on_turn_end(&mut self, _ctx: &mut HookContext) {}

    /// Adjusts outgoing melee damage after deltas are applied.
    fn on_deal_damage(&mut self, _damage: &mut i32) {}

    /// Adjusts incoming melee damage before it is applied.
    fn on_take_damage(&mut self, _damage: &mut i32) {}
}
