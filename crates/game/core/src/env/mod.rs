//! Randomness sources injected into a battle session.

pub mod dice;
pub mod rng;

pub use dice::{Dice, ScriptedDice, SeededDice};
pub use rng::{PcgRng, RngOracle, compute_seed};
