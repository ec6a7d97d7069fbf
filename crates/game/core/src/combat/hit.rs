//! Hit value calculation.

use crate::config::BattleConfig;
use crate::stats::Attributes;
use crate::weapon::WeaponProfile;

/// Every term of one hit value, kept for rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitBreakdown {
    /// Raw d20 result.
    pub roll: i32,
    /// `governing attribute - 3`
    pub attribute: i32,
    pub weapon: i32,
    /// Sum of active modifier hit deltas.
    pub modifiers: i32,
    /// `shot index × effective burst penalty`
    pub burst_penalty: i32,
    /// `2 × requirement deficit`
    pub strength_penalty: i32,
    /// Target evasion.
    pub evasion: i32,
}

impl HitBreakdown {
    pub fn total(&self) -> i32 {
        self.roll + self.attribute + self.weapon + self.modifiers
            - self.burst_penalty
            - self.strength_penalty
            - self.evasion
    }
}

/// Builds the hit value for one resolution.
///
/// # Formula
///
/// ```text
/// hit = roll + (governing - 3) + weapon.hit_bonus + Σ hit deltas
///       - burst_penalty - 2 × deficit - target evasion
/// ```
///
/// # Arguments
///
/// * `profile` - Weapon descriptor
/// * `attributes` - Attacker attributes
/// * `modifier_hit` - Attacker's summed hit deltas
/// * `roll` - d20 result
/// * `burst_penalty` - Penalty for this shot's position in a burst (0 for melee)
/// * `evasion` - Target evasion
pub fn calculate_hit(
    profile: &WeaponProfile,
    attributes: &Attributes,
    modifier_hit: i32,
    roll: i32,
    burst_penalty: i32,
    evasion: i32,
) -> HitBreakdown {
    HitBreakdown {
        roll,
        attribute: attributes.modifier(profile.governing_attribute()),
        weapon: profile.hit_bonus,
        modifiers: modifier_hit,
        burst_penalty,
        strength_penalty: BattleConfig::UNDER_STRENGTH_PENALTY
            * profile.requirement.deficit(attributes),
        evasion,
    }
}

/// A hit lands when the hit value meets or beats the target's current AC.
pub fn check_hit(hit_value: i32, target_ac: i32) -> bool {
    hit_value >= target_ac
}
