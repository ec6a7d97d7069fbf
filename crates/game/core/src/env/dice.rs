//! Dice consumed by attack resolution.

use std::collections::VecDeque;

use crate::config::BattleConfig;

use super::rng::{PcgRng, RngOracle, compute_seed};

/// Source of hit and damage rolls.
pub trait Dice {
    /// Roll the hit die (1..=20).
    fn d20(&mut self) -> i32;

    /// Roll a value in `[min, max]` inclusive. Returns `min` when `min >= max`.
    fn roll(&mut self, min: i32, max: i32) -> i32;
}

/// Dice backed by an [`RngOracle`], deriving one seed per roll.
#[derive(Clone, Debug)]
pub struct SeededDice<R = PcgRng> {
    rng: R,
    seed: u64,
    nonce: u64,
}

impl SeededDice<PcgRng> {
    pub fn new(seed: u64) -> Self {
        Self::with_oracle(PcgRng, seed)
    }
}

impl<R: RngOracle> SeededDice<R> {
    pub fn with_oracle(rng: R, seed: u64) -> Self {
        Self { rng, seed, nonce: 0 }
    }

    /// Number of rolls made so far.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    fn next_seed(&mut self, context: u32) -> u64 {
        let seed = compute_seed(self.seed, self.nonce, context);
        self.nonce += 1;
        seed
    }
}

impl<R: RngOracle> Dice for SeededDice<R> {
    fn d20(&mut self) -> i32 {
        let seed = self.next_seed(0);
        self.rng.roll_die(seed, BattleConfig::HIT_DIE) as i32
    }

    fn roll(&mut self, min: i32, max: i32) -> i32 {
        let seed = self.next_seed(1);
        self.rng.range(seed, min, max)
    }
}

/// Replays a recorded sequence of rolls in order.
///
/// Each value is clamped into the requested range. Once the script runs out,
/// hit rolls return 1 and ranged rolls return their minimum.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<i32>,
}

impl ScriptedDice {
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
        }
    }

    /// Appends more rolls to the end of the script.
    pub fn push(&mut self, roll: i32) {
        self.rolls.push_back(roll);
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn d20(&mut self) -> i32 {
        self.roll(1, BattleConfig::HIT_DIE as i32)
    }

    fn roll(&mut self, min: i32, max: i32) -> i32 {
        let max = max.max(min);
        self.rolls.pop_front().map_or(min, |r| r.clamp(min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_dice_replays_then_falls_back() {
        let mut dice = ScriptedDice::new([9, 30, 3]);
        assert_eq!(dice.d20(), 9);
        assert_eq!(dice.d20(), 20);
        assert_eq!(dice.roll(2, 4), 3);
        assert_eq!(dice.remaining(), 0);
        assert_eq!(dice.d20(), 1);
        assert_eq!(dice.roll(2, 4), 2);
    }

    #[test]
    fn seeded_dice_is_reproducible() {
        let mut a = SeededDice::new(99);
        let mut b = SeededDice::new(99);
        let first: Vec<i32> = (0..16).map(|_| a.d20()).collect();
        let second: Vec<i32> = (0..16).map(|_| b.d20()).collect();
        assert_eq!(first, second);
        assert_eq!(a.nonce(), 16);
    }
}
