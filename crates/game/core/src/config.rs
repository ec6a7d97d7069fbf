/// Battle configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleConfig {
    /// Gauge value at which a unit acts; subtracted from the gauge per activation.
    pub activation_threshold: i32,

    /// Logical interval between scheduler ticks, in milliseconds.
    ///
    /// The core never sleeps; drivers use this to pace `run()` calls.
    pub tick_interval_ms: u64,

    /// Per-turn maxima for the player's action pool.
    pub action_pool: ActionPoolLimits,

    /// End the player's turn automatically once every pool reaches zero.
    pub auto_end_turn: bool,

    /// Seed for [`crate::env::SeededDice`].
    pub seed: u64,
}

/// Maxima the player's action pool is reset to at each turn start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionPoolLimits {
    pub movement: u8,
    pub major: u8,
    pub minor: u8,
}

impl Default for ActionPoolLimits {
    fn default() -> Self {
        Self {
            movement: 1,
            major: 1,
            minor: 2,
        }
    }
}

impl BattleConfig {
    // ===== rule constants =====
    /// Base armor class before any term is added.
    pub const BASE_AC: i32 = 10;
    /// Attribute value that contributes a zero modifier.
    pub const ATTRIBUTE_BASELINE: i32 = 3;
    /// Replacement for non-positive attribute values.
    pub const DEFAULT_ATTRIBUTE: i32 = 3;
    /// Sides of the hit die.
    pub const HIT_DIE: u32 = 20;
    /// Hit penalty per point of requirement deficit.
    pub const UNDER_STRENGTH_PENALTY: i32 = 2;
    pub const BASE_HP: i32 = 10;
    pub const HP_PER_ENDURANCE: i32 = 3;
    pub const BASE_INITIATIVE: i32 = 10;
    pub const INITIATIVE_PER_AGILITY: i32 = 2;
    pub const MAX_TIMED_BUFFS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ACTIVATION_THRESHOLD: i32 = 100;
    pub const DEFAULT_TICK_INTERVAL_MS: u64 = 250;
    pub const DEFAULT_SEED: u64 = 0x7AC7_1C5;

    pub fn new() -> Self {
        Self {
            activation_threshold: Self::DEFAULT_ACTIVATION_THRESHOLD,
            tick_interval_ms: Self::DEFAULT_TICK_INTERVAL_MS,
            action_pool: ActionPoolLimits::default(),
            auto_end_turn: true,
            seed: Self::DEFAULT_SEED,
        }
    }

    pub fn with_activation_threshold(mut self, threshold: i32) -> Self {
        self.activation_threshold = threshold;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Replaces values the scheduler cannot run with their defaults.
    pub fn sanitized(mut self) -> Self {
        if self.activation_threshold <= 0 {
            tracing::warn!(
                threshold = self.activation_threshold,
                fallback = Self::DEFAULT_ACTIVATION_THRESHOLD,
                "non-positive activation threshold; using default"
            );
            self.activation_threshold = Self::DEFAULT_ACTIVATION_THRESHOLD;
        }
        if self.tick_interval_ms == 0 {
            tracing::warn!(
                fallback = Self::DEFAULT_TICK_INTERVAL_MS,
                "zero tick interval; using default"
            );
            self.tick_interval_ms = Self::DEFAULT_TICK_INTERVAL_MS;
        }
        self
    }
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_restores_unusable_values() {
        let config = BattleConfig {
            activation_threshold: 0,
            tick_interval_ms: 0,
            ..BattleConfig::default()
        }
        .sanitized();

        assert_eq!(
            config.activation_threshold,
            BattleConfig::DEFAULT_ACTIVATION_THRESHOLD
        );
        assert_eq!(config.tick_interval_ms, BattleConfig::DEFAULT_TICK_INTERVAL_MS);
    }

    #[test]
    fn sanitized_keeps_valid_values() {
        let config = BattleConfig::default().with_activation_threshold(50).sanitized();
        assert_eq!(config.activation_threshold, 50);
    }
}
