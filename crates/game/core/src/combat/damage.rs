//! Damage calculation.
//!
//! Melee and ranged damage are finalized by two separate functions. Only
//! [`finalize_melee_damage`] consults the modifier pipeline; ranged damage is
//! exempt from stance and perk damage deltas and hooks.

use crate::combatant::Target;
use crate::env::Dice;
use crate::modifier::ModifierPipeline;
use crate::stats::Attributes;
use crate::weapon::WeaponProfile;

/// Raw weapon damage before finalization.
///
/// # Formula
///
/// ```text
/// raw = roll(min..=max) + (governing - 3) + weapon.extra_damage
/// ```
pub fn roll_base_damage(
    profile: &WeaponProfile,
    attributes: &Attributes,
    dice: &mut dyn Dice,
) -> i32 {
    dice.roll(profile.damage_min, profile.damage_max)
        + attributes.modifier(profile.governing_attribute())
        + profile.extra_damage
}

/// Applies the attacker's damage deltas and hooks, then the target's
/// incoming-damage hooks. Never negative.
pub fn finalize_melee_damage(
    raw: i32,
    attacker: &mut ModifierPipeline,
    target: &mut dyn Target,
) -> i32 {
    let mut damage = raw + attacker.effective().damage;
    attacker.on_deal_damage(&mut damage);
    target.on_take_melee_damage(&mut damage);
    damage.max(0)
}

/// Ranged damage passes through untouched apart from the zero floor.
pub fn finalize_ranged_damage(raw: i32) -> i32 {
    raw.max(0)
}
