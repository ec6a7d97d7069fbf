//! Magazine and reserve ammunition for ranged weapons.

use crate::error::{ErrorSeverity, GameError};

/// Loaded rounds plus carried reserve. Persists across turns within a battle.
///
/// Invariants: `loaded ∈ [0, capacity]`, `reserve ∈ [0, reserve_capacity]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Magazine {
    loaded: u32,
    capacity: u32,
    reserve: u32,
    reserve_capacity: u32,
}

impl Magazine {
    /// Creates a magazine, clamping the counts into their bounds.
    pub fn new(loaded: u32, capacity: u32, reserve: u32, reserve_capacity: u32) -> Self {
        Self {
            loaded: loaded.min(capacity),
            capacity,
            reserve: reserve.min(reserve_capacity),
            reserve_capacity,
        }
    }

    /// Full magazine and full reserve.
    pub fn full(capacity: u32, reserve_capacity: u32) -> Self {
        Self::new(capacity, capacity, reserve_capacity, reserve_capacity)
    }

    pub fn loaded(&self) -> u32 {
        self.loaded
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn reserve(&self) -> u32 {
        self.reserve
    }

    pub fn reserve_capacity(&self) -> u32 {
        self.reserve_capacity
    }

    pub fn is_empty(&self) -> bool {
        self.loaded == 0
    }

    /// Re-establishes the invariants after deserialization.
    pub fn sanitized(self) -> Self {
        Self::new(
            self.loaded,
            self.capacity,
            self.reserve,
            self.reserve_capacity,
        )
    }

    /// Removes one loaded round. Returns `false` if the magazine was empty.
    pub fn consume_round(&mut self) -> bool {
        if self.loaded == 0 {
            return false;
        }
        self.loaded -= 1;
        true
    }

    /// Moves `min(capacity - loaded, reserve)` rounds into the magazine.
    ///
    /// Returns the number of rounds moved. Fails without changing state when
    /// the magazine is full or the reserve is empty.
    pub fn reload(&mut self) -> Result<u32, ReloadError> {
        if self.loaded >= self.capacity {
            return Err(ReloadError::MagazineFull {
                capacity: self.capacity,
            });
        }
        if self.reserve == 0 {
            return Err(ReloadError::ReserveEmpty);
        }

        let moved = (self.capacity - self.loaded).min(self.reserve);
        self.loaded += moved;
        self.reserve -= moved;
        Ok(moved)
    }
}

/// Reasons a reload is refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReloadError {
    #[error("magazine already full ({capacity} rounds)")]
    MagazineFull { capacity: u32 },

    #[error("no reserve ammunition left")]
    ReserveEmpty,

    #[error("weapon does not use ammunition")]
    NotRanged,
}

impl GameError for ReloadError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MagazineFull { .. } | Self::ReserveEmpty => ErrorSeverity::Recoverable,
            Self::NotRanged => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MagazineFull { .. } => "RELOAD_MAGAZINE_FULL",
            Self::ReserveEmpty => "RELOAD_RESERVE_EMPTY",
            Self::NotRanged => "RELOAD_NOT_RANGED",
        }
    }
}
