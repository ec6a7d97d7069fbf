//! Single and burst attack resolution.

use crate::combatant::{Combatant, Target};
use crate::env::Dice;
use crate::error::{ErrorSeverity, GameError};
use crate::weapon::{RangedWeapon, Weapon, WeaponProfile};

use super::damage::{finalize_melee_damage, finalize_ranged_damage, roll_base_damage};
use super::hit::{calculate_hit, check_hit};
use super::result::{AttackOutcome, AttackReport, ShotRecord};

/// Reasons an attack cannot start. Nothing is mutated when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackError {
    #[error("{weapon} has no rounds loaded")]
    OutOfAmmo { weapon: String },

    #[error("{target} is already down")]
    TargetDown { target: String },

    #[error("{attacker} cannot fight while down")]
    AttackerDown { attacker: String },
}

impl GameError for AttackError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfAmmo { .. } => ErrorSeverity::Recoverable,
            Self::TargetDown { .. } | Self::AttackerDown { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfAmmo { .. } => "ATTACK_OUT_OF_AMMO",
            Self::TargetDown { .. } => "ATTACK_TARGET_DOWN",
            Self::AttackerDown { .. } => "ATTACK_ATTACKER_DOWN",
        }
    }
}

/// Checks that an attack could start without touching any state.
pub fn validate_attack(
    attacker: &Combatant,
    weapon: &Weapon,
    target: &dyn Target,
) -> Result<(), AttackError> {
    if !attacker.is_alive() {
        return Err(AttackError::AttackerDown {
            attacker: attacker.name().to_string(),
        });
    }
    if !target.is_alive() {
        return Err(AttackError::TargetDown {
            target: target.name().to_string(),
        });
    }
    if weapon.magazine().is_some_and(|m| m.is_empty()) {
        return Err(AttackError::OutOfAmmo {
            weapon: weapon.name().to_string(),
        });
    }
    Ok(())
}

/// Resolves one attack activation.
///
/// Melee weapons resolve once. Ranged weapons fire
/// `min(requested, max_burst, loaded)` shots; a single-shot weapon is simply a
/// burst of one.
///
/// # Arguments
///
/// * `attacker` - Acting combatant; takes recoil damage after a ranged burst
/// * `weapon` - Weapon used; ranged ammunition is consumed per shot fired
/// * `target` - Defender
/// * `requested` - Shots requested (ignored for melee; 0 counts as 1)
/// * `dice` - Roll source
pub fn resolve_attack(
    attacker: &mut Combatant,
    weapon: &mut Weapon,
    target: &mut dyn Target,
    requested: u32,
    dice: &mut dyn Dice,
) -> Result<AttackReport, AttackError> {
    validate_attack(attacker, weapon, target)?;

    let report = match weapon {
        Weapon::Melee(profile) => resolve_melee(attacker, profile, target, dice),
        Weapon::Ranged(ranged) => resolve_burst(attacker, ranged, target, requested, dice),
    };

    tracing::debug!(
        attacker = %report.attacker,
        target = %report.target,
        weapon = %report.weapon,
        shots = report.shots_fired(),
        hits = report.hits(),
        damage = report.total_damage(),
        self_damage = report.self_damage,
        "attack resolved"
    );

    Ok(report)
}

fn resolve_melee(
    attacker: &mut Combatant,
    profile: &WeaponProfile,
    target: &mut dyn Target,
    dice: &mut dyn Dice,
) -> AttackReport {
    let attributes = *attacker.attributes();
    let roll = dice.d20();
    let hit = calculate_hit(
        profile,
        &attributes,
        attacker.modifiers().hit,
        roll,
        0,
        target.evasion(),
    );
    let target_ac = target.current_ac();

    let mut record = ShotRecord {
        index: 0,
        hit,
        target_ac,
        outcome: AttackOutcome::Miss,
        damage: None,
        effect: None,
    };

    if check_hit(hit.total(), target_ac) {
        let raw = roll_base_damage(profile, &attributes, dice);
        let damage = finalize_melee_damage(raw, attacker.pipeline_mut(), target);
        target.take_damage(damage);
        record.outcome = AttackOutcome::Hit;
        record.damage = Some(damage);
        record.effect = target.apply_effect(profile.effect);
    }

    AttackReport {
        attacker: attacker.name().to_string(),
        target: target.name().to_string(),
        weapon: profile.name.clone(),
        requested: 1,
        shots: vec![record],
        self_damage: 0,
        target_hp: target.current_hp(),
    }
}

fn resolve_burst(
    attacker: &mut Combatant,
    weapon: &mut RangedWeapon,
    target: &mut dyn Target,
    requested: u32,
    dice: &mut dyn Dice,
) -> AttackReport {
    let RangedWeapon {
        profile,
        magazine,
        burst,
    } = weapon;

    let attributes = *attacker.attributes();
    let modifier_hit = attacker.modifiers().hit;
    let shots = burst.clamp_shots(requested, magazine.loaded());
    let mut records = Vec::with_capacity(shots as usize);

    for index in 0..shots {
        if !target.is_alive() {
            break;
        }
        magazine.consume_round();

        let roll = dice.d20();
        let hit = calculate_hit(
            profile,
            &attributes,
            modifier_hit,
            roll,
            burst.penalty_for(index),
            target.evasion(),
        );
        let target_ac = target.current_ac();

        let mut record = ShotRecord {
            index,
            hit,
            target_ac,
            outcome: AttackOutcome::Miss,
            damage: None,
            effect: None,
        };

        if check_hit(hit.total(), target_ac) {
            let raw = roll_base_damage(profile, &attributes, dice);
            let damage = finalize_ranged_damage(raw);
            target.take_damage(damage);
            record.outcome = AttackOutcome::Hit;
            record.damage = Some(damage);
            record.effect = target.apply_effect(profile.effect);
        }

        tracing::trace!(shot = index, hit = hit.total(), ac = target_ac, "burst shot");
        records.push(record);
    }

    // Recoil counts every shot fired, hit or miss, and lands once after the burst.
    // Single-shot weapons only carry the hit penalty.
    let fired = records.len() as i32;
    let self_damage = if burst.is_burst_capable() {
        (profile.requirement.deficit(&attributes) * profile.size * fired).max(0)
    } else {
        0
    };
    if self_damage > 0 {
        attacker.take_damage(self_damage);
    }

    AttackReport {
        attacker: attacker.name().to_string(),
        target: target.name().to_string(),
        weapon: profile.name.clone(),
        requested: requested.max(1),
        shots: records,
        self_damage,
        target_hp: target.current_hp(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{Side, UnitId};
    use crate::env::ScriptedDice;
    use crate::stats::Attributes;
    use crate::weapon::{BurstProfile, DamageKind, Magazine, Requirement};

    fn shooter(strength: i32) -> Combatant {
        Combatant::new(UnitId(0), "Vex", Side::Player, Attributes::new(strength, 3, 5))
    }

    fn raider(hp: i32) -> Combatant {
        Combatant::new(UnitId(1), "Raider", Side::Enemy, Attributes::new(3, 3, 5))
            .with_current_hp(hp)
    }

    fn pistol(loaded: u32) -> Weapon {
        Weapon::ranged(
            WeaponProfile::new("Pistol", 2, 4).with_damage_kind(DamageKind::Ballistic),
            Magazine::new(loaded, 6, 12, 24),
            BurstProfile::new(2, 2),
        )
    }

    #[test]
    fn burst_clamps_and_escalates_penalty() {
        let mut attacker = shooter(3);
        let mut target = raider(25);
        let mut weapon = pistol(2);
        let mut dice = ScriptedDice::new([15, 2, 15, 2]);

        let report = resolve_attack(&mut attacker, &mut weapon, &mut target, 5, &mut dice)
            .expect("attack");

        assert_eq!(report.shots_fired(), 2);
        assert_eq!(report.shots[0].hit.burst_penalty, 0);
        assert_eq!(report.shots[1].hit.burst_penalty, 2);
        assert_eq!(weapon.magazine().map(|m| m.loaded()), Some(0));
    }

    #[test]
    fn burst_stops_once_target_is_down() {
        let mut attacker = shooter(3);
        let mut target = raider(2);
        let mut weapon = Weapon::ranged(
            WeaponProfile::new("Carbine", 4, 4).with_damage_kind(DamageKind::Ballistic),
            Magazine::new(5, 5, 0, 0),
            BurstProfile::new(4, 1),
        );
        let mut dice = ScriptedDice::new([20, 4, 20, 4]);

        let report = resolve_attack(&mut attacker, &mut weapon, &mut target, 4, &mut dice)
            .expect("attack");

        assert_eq!(report.shots_fired(), 1);
        assert!(report.target_defeated());
        assert_eq!(weapon.magazine().map(|m| m.loaded()), Some(4));
    }

    #[test]
    fn recoil_counts_shots_fired_not_hits() {
        let mut attacker = shooter(2);
        let mut target = raider(30);
        let mut weapon = Weapon::ranged(
            WeaponProfile::new("Hand Cannon", 3, 6)
                .with_damage_kind(DamageKind::Ballistic)
                .with_requirement(Requirement::strength(4))
                .with_size(2),
            Magazine::new(3, 3, 0, 0),
            BurstProfile::new(3, 1),
        );
        // every shot misses
        let mut dice = ScriptedDice::new([1, 1, 1]);
        let hp_before = attacker.current_hp();

        let report = resolve_attack(&mut attacker, &mut weapon, &mut target, 3, &mut dice)
            .expect("attack");

        assert_eq!(report.hits(), 0);
        assert_eq!(report.self_damage, 2 * 2 * 3);
        assert_eq!(attacker.current_hp(), hp_before - 12);
        assert!(report.shots.iter().all(|s| s.hit.strength_penalty == 4));
    }

    #[test]
    fn single_shot_weapon_has_no_recoil() {
        let mut attacker = shooter(3);
        let mut target = raider(30);
        let mut weapon = Weapon::ranged(
            WeaponProfile::new("Revolver", 3, 3)
                .with_damage_kind(DamageKind::Ballistic)
                .with_requirement(Requirement::strength(5))
                .with_size(2),
            Magazine::new(6, 6, 0, 0),
            BurstProfile::SINGLE_SHOT,
        );
        let mut dice = ScriptedDice::new([1]);
        let hp_before = attacker.current_hp();

        let report = resolve_attack(&mut attacker, &mut weapon, &mut target, 3, &mut dice)
            .expect("attack");

        assert_eq!(report.shots_fired(), 1);
        assert_eq!(report.shots[0].hit.strength_penalty, 4);
        assert_eq!(report.self_damage, 0);
        assert_eq!(attacker.current_hp(), hp_before);
    }

    #[test]
    fn empty_magazine_is_rejected_without_change() {
        let mut attacker = shooter(3);
        let mut target = raider(10);
        let mut weapon = pistol(0);
        let mut dice = ScriptedDice::new([20]);

        let err = resolve_attack(&mut attacker, &mut weapon, &mut target, 1, &mut dice)
            .expect_err("no ammo");
        assert!(matches!(err, AttackError::OutOfAmmo { .. }));
        assert_eq!(dice.remaining(), 1);
        assert_eq!(target.current_hp(), 10);
    }

    #[test]
    fn melee_hit_applies_effect() {
        let mut attacker = shooter(5);
        let mut target = raider(20);
        let mut weapon = Weapon::melee(
            WeaponProfile::new("Hook", 1, 1)
                .with_damage_kind(DamageKind::Blunt)
                .with_effect(crate::weapon::EffectTag::Grapple),
        );
        let mut dice = ScriptedDice::new([18, 1]);

        let report = resolve_attack(&mut attacker, &mut weapon, &mut target, 1, &mut dice)
            .expect("attack");

        // 1 + (5 - 3)
        assert_eq!(report.shots[0].damage, Some(3));
        assert!(target.is_grappled());
    }
}
