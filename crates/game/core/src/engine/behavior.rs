//! Acting capability for non-player combatants.
//!
//! Non-player turns bypass the action economy: the session calls
//! [`CombatBehavior::perform_action`] exactly once per activation and logs
//! whatever it returns. `None` is a no-op turn.

use core::fmt;

use crate::combat::resolve_attack;
use crate::combatant::{Combatant, Target};
use crate::env::Dice;
use crate::weapon::Weapon;

/// Everything a behavior may touch during its turn.
pub struct TurnContext<'a> {
    pub actor: &'a mut Combatant,
    pub loadout: &'a mut [Weapon],
    pub target: &'a mut dyn Target,
    pub dice: &'a mut dyn Dice,
}

pub trait CombatBehavior: fmt::Debug + Send {
    /// Initiative per tick, read once at battle start.
    fn initiative(&self, actor: &Combatant) -> i32 {
        actor.initiative_per_round()
    }

    /// Takes the unit's whole turn and returns a log line, if anything happened.
    fn perform_action(&mut self, ctx: TurnContext<'_>) -> Option<String>;
}

/// Shipped behaviors, selectable from a character record.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BehaviorKind {
    /// Swings the first melee weapon at the target.
    Brute,
    /// Bursts with the first ranged weapon, reloads when dry, falls back to melee.
    Gunner,
    /// Does nothing.
    #[default]
    Idle,
}

impl BehaviorKind {
    pub fn instantiate(self) -> Box<dyn CombatBehavior> {
        match self {
            BehaviorKind::Brute => Box::new(Brute),
            BehaviorKind::Gunner => Box::new(Gunner),
            BehaviorKind::Idle => Box::new(Idle),
        }
    }
}

#[derive(Debug)]
pub struct Brute;

impl CombatBehavior for Brute {
    fn perform_action(&mut self, ctx: TurnContext<'_>) -> Option<String> {
        swing(ctx)
    }
}

#[derive(Debug)]
pub struct Gunner;

impl CombatBehavior for Gunner {
    fn perform_action(&mut self, ctx: TurnContext<'_>) -> Option<String> {
        let Some(slot) = ctx.loadout.iter().position(Weapon::is_ranged) else {
            return swing(ctx);
        };

        let weapon = &mut ctx.loadout[slot];
        if weapon.magazine().is_some_and(|m| m.is_empty()) {
            return match weapon.reload() {
                Ok(rounds) => Some(format!(
                    "{} reloads {} (+{rounds})",
                    ctx.actor.name(),
                    weapon.name()
                )),
                Err(_) => swing(ctx),
            };
        }

        let requested = match weapon {
            Weapon::Ranged(ranged) => ranged.burst.max_burst,
            Weapon::Melee(_) => 1,
        };
        resolve_attack(ctx.actor, weapon, ctx.target, requested, ctx.dice)
            .ok()
            .map(|report| report.to_string())
    }
}

#[derive(Debug)]
pub struct Idle;

impl CombatBehavior for Idle {
    fn perform_action(&mut self, _ctx: TurnContext<'_>) -> Option<String> {
        None
    }
}

fn swing(ctx: TurnContext<'_>) -> Option<String> {
    let weapon = ctx.loadout.iter_mut().find(|w| !w.is_ranged())?;
    resolve_attack(ctx.actor, weapon, ctx.target, 1, ctx.dice)
        .ok()
        .map(|report| report.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combatant::{Side, UnitId};
    use crate::env::ScriptedDice;
    use crate::stats::Attributes;
    use crate::weapon::{BurstProfile, DamageKind, Magazine, WeaponProfile};

    fn pair() -> (Combatant, Combatant) {
        (
            Combatant::new(UnitId(1), "Raider", Side::Enemy, Attributes::new(4, 3, 3)),
            Combatant::new(UnitId(0), "Vex", Side::Player, Attributes::new(3, 3, 5)),
        )
    }

    #[test]
    fn gunner_reloads_when_dry() {
        let (mut actor, mut target) = pair();
        let mut loadout = vec![Weapon::ranged(
            WeaponProfile::new("Smg", 1, 3).with_damage_kind(DamageKind::Ballistic),
            Magazine::new(0, 8, 8, 16),
            BurstProfile::new(3, 1),
        )];
        let mut dice = ScriptedDice::new([0; 0]);

        let log = Gunner.perform_action(TurnContext {
            actor: &mut actor,
            loadout: &mut loadout,
            target: &mut target,
            dice: &mut dice,
        });

        assert_eq!(log.as_deref(), Some("Raider reloads Smg (+8)"));
        assert_eq!(loadout[0].magazine().map(|m| m.loaded()), Some(8));
    }

    #[test]
    fn brute_without_melee_weapon_is_a_no_op() {
        let (mut actor, mut target) = pair();
        let mut dice = ScriptedDice::new([20, 6]);

        let log = Brute.perform_action(TurnContext {
            actor: &mut actor,
            loadout: &mut [],
            target: &mut target,
            dice: &mut dice,
        });

        assert!(log.is_none());
        assert_eq!(dice.remaining(), 2);
    }

    #[test]
    fn brute_swings_first_melee_weapon() {
        let (mut actor, mut target) = pair();
        let mut loadout = vec![Weapon::melee(
            WeaponProfile::new("Club", 2, 2).with_damage_kind(DamageKind::Blunt),
        )];
        let mut dice = ScriptedDice::new([15, 2]);

        let log = Brute
            .perform_action(TurnContext {
                actor: &mut actor,
                loadout: &mut loadout,
                target: &mut target,
                dice: &mut dice,
            })
            .expect("attack log");

        assert!(log.starts_with("Raider attacks Vex with Club"));
        assert_eq!(target.current_hp(), 25 - 3);
    }
}
