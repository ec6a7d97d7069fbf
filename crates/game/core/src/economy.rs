//! Per-turn action economy for the directly controlled side.

use crate::config::ActionPoolLimits;
use crate::error::{ErrorSeverity, GameError};

/// Action categories drawn from separate counters.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActionKind {
    Movement,
    /// One attack or ability.
    Major,
    /// Reload, stance switch, minor ability.
    Minor,
}

/// Pool state after a successful consumption.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolStatus {
    Remaining,
    /// Every counter is at zero.
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EconomyError {
    #[error("it is not the player's turn")]
    NotYourTurn,

    #[error("no {0} actions left this turn")]
    Depleted(ActionKind),
}

impl GameError for EconomyError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotYourTurn => "ECONOMY_NOT_YOUR_TURN",
            Self::Depleted(_) => "ECONOMY_DEPLETED",
        }
    }
}

/// Movement, major and minor counters.
///
/// Counters are unsigned and only ever decremented after a positive check, so
/// they stay within `[0, max]`. They are reset exactly once per owning turn by
/// [`ActionPool::begin_turn`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionPool {
    limits: ActionPoolLimits,
    movement: u8,
    major: u8,
    minor: u8,
    turn_active: bool,
}

impl ActionPool {
    /// Creates an empty pool; nothing can be spent until the first turn starts.
    pub fn new(limits: ActionPoolLimits) -> Self {
        Self {
            limits,
            movement: 0,
            major: 0,
            minor: 0,
            turn_active: false,
        }
    }

    pub fn limits(&self) -> ActionPoolLimits {
        self.limits
    }

    pub fn is_turn_active(&self) -> bool {
        self.turn_active
    }

    pub fn remaining(&self, kind: ActionKind) -> u8 {
        match kind {
            ActionKind::Movement => self.movement,
            ActionKind::Major => self.major,
            ActionKind::Minor => self.minor,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.movement == 0 && self.major == 0 && self.minor == 0
    }

    /// Resets every counter to its maximum and opens the turn.
    pub fn begin_turn(&mut self) {
        self.movement = self.limits.movement;
        self.major = self.limits.major;
        self.minor = self.limits.minor;
        self.turn_active = true;
    }

    /// Closes the turn. Leftover actions are forfeited at the next reset.
    pub fn end_turn(&mut self) {
        self.turn_active = false;
    }

    /// Checks that `kind` could be spent right now without spending it.
    pub fn check(&self, kind: ActionKind) -> Result<(), EconomyError> {
        if !self.turn_active {
            return Err(EconomyError::NotYourTurn);
        }
        if self.remaining(kind) == 0 {
            return Err(EconomyError::Depleted(kind));
        }
        Ok(())
    }

    /// Spends one action of `kind`.
    ///
    /// Rejected without any change when the turn is not open or the counter
    /// is already zero.
    pub fn consume(&mut self, kind: ActionKind) -> Result<PoolStatus, EconomyError> {
        self.check(kind)?;

        let counter = match kind {
            ActionKind::Movement => &mut self.movement,
            ActionKind::Major => &mut self.major,
            ActionKind::Minor => &mut self.minor,
        };
        *counter -= 1;

        Ok(if self.is_exhausted() {
            PoolStatus::Exhausted
        } else {
            PoolStatus::Remaining
        })
    }
}

impl Default for ActionPool {
    fn default() -> Self {
        Self::new(ActionPoolLimits::default())
    }
}
