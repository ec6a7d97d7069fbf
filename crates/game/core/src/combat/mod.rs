//! Attack resolution.
//!
//! Composes the weapon model, the attacker's modifier pipeline and a
//! [`Target`](crate::combatant::Target) into per-shot resolution records.
//!
//! # Core Functions
//!
//! - `resolve_attack`: one activation, melee or burst
//! - `calculate_hit` / `check_hit`: hit value against current AC
//! - `finalize_melee_damage` / `finalize_ranged_damage`: two separate damage paths

pub mod damage;
pub mod hit;
pub mod resolve;
pub mod result;

pub use damage::{finalize_melee_damage, finalize_ranged_damage, roll_base_damage};
pub use hit::{HitBreakdown, calculate_hit, check_hit};
pub use resolve::{AttackError, resolve_attack, validate_attack};
pub use result::{AttackOutcome, AttackReport, ShotRecord};
