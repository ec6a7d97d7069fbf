//! Timed buffs with a finite turn duration.
//!
//! Durations count the owner's turn ends: each turn end decrements every buff
//! once and removes the ones that reach zero.

use arrayvec::ArrayVec;

use crate::config::BattleConfig;

use super::{ModifierDeltas, ModifierSource};

/// A single buff or debuff with a remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimedBuff {
    pub name: &'static str,
    pub deltas: ModifierDeltas,
    pub remaining_turns: u32,
}

impl TimedBuff {
    pub const fn new(name: &'static str, deltas: ModifierDeltas, turns: u32) -> Self {
        Self {
            name,
            deltas,
            remaining_turns: turns,
        }
    }
}

impl ModifierSource for TimedBuff {
    fn name(&self) -> &str {
        self.name
    }

    fn deltas(&self) -> ModifierDeltas {
        self.deltas
    }
}

/// Bounded set of timed buffs on one combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimedBuffs {
    buffs: ArrayVec<TimedBuff, { BattleConfig::MAX_TIMED_BUFFS }>,
}

impl TimedBuffs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a buff, or refreshes it if one with the same name is active.
    ///
    /// Refreshing keeps the longer of the two durations. Returns `false` when
    /// the set is full and the buff was dropped.
    pub fn add(&mut self, buff: TimedBuff) -> bool {
        if buff.remaining_turns == 0 {
            return true;
        }
        if let Some(existing) = self.buffs.iter_mut().find(|b| b.name == buff.name) {
            existing.deltas = buff.deltas;
            existing.remaining_turns = existing.remaining_turns.max(buff.remaining_turns);
            return true;
        }
        self.buffs.try_push(buff).is_ok()
    }

    pub fn has(&self, name: &str) -> bool {
        self.buffs.iter().any(|b| b.name == name)
    }

    /// Decrements every buff once; returns the names of buffs that expired.
    pub fn tick_turn_end(&mut self) -> Vec<&'static str> {
        let mut expired = Vec::new();
        for buff in self.buffs.iter_mut() {
            buff.remaining_turns = buff.remaining_turns.saturating_sub(1);
            if buff.remaining_turns == 0 {
                expired.push(buff.name);
            }
        }
        self.buffs.retain(|b| b.remaining_turns > 0);
        expired
    }

    pub fn total(&self) -> ModifierDeltas {
        self.buffs.iter().map(ModifierSource::deltas).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimedBuff> {
        self.buffs.iter()
    }

    pub fn len(&self) -> usize {
        self.buffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }
}
