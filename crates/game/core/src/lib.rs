//! Combat resolution core of a turn-based tactical game.
//!
//! `tactics-core` decides whose turn it is, what a turn permits, how attacks
//! resolve and how stances, perks and timed buffs alter the numbers. It renders
//! nothing: every outcome is reported as a [`BattleEvent`] or a typed result.
//! All battle state is owned by one [`BattleSession`].
pub mod combat;
pub mod combatant;
pub mod config;
pub mod economy;
pub mod engine;
pub mod env;
pub mod error;
pub mod modifier;
pub mod record;
pub mod stats;
pub mod weapon;

pub use combat::{
    AttackError, AttackOutcome, AttackReport, HitBreakdown, ShotRecord, resolve_attack,
};
pub use combatant::{Combatant, Side, Target, UnitId};
pub use config::{ActionPoolLimits, BattleConfig};
pub use economy::{ActionKind, ActionPool, EconomyError, PoolStatus};
pub use engine::{
    BattleEvent, BattleOutcome, BattleSession, BattleStatus, BehaviorKind, CombatBehavior,
    InitiativeScheduler, IntentError, Participant, SchedulerStep, TurnContext,
};
pub use env::{Dice, PcgRng, RngOracle, ScriptedDice, SeededDice};
pub use error::{ErrorSeverity, GameError};
pub use modifier::{
    HookContext, ModifierDeltas, ModifierPipeline, ModifierSource, PerkId, StanceKind, TimedBuff,
};
pub use record::CharacterRecord;
pub use stats::{ArmorBreakdown, ArmorClass, AttributeKind, Attributes, Health};
pub use weapon::{
    BurstProfile, DamageKind, EffectTag, Magazine, RangeBand, RangedWeapon, ReloadError,
    Requirement, Weapon, WeaponProfile,
};
