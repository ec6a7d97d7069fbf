//! Burst-fire parameters.

/// Burst behavior of a ranged weapon.
///
/// Shot `i` (0-based) of a burst takes a hit penalty of
/// `i × max(0, base_penalty + penalty_modifier)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BurstProfile {
    /// Maximum shots per activation; `1` means single-shot.
    pub max_burst: u32,
    pub base_penalty: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub penalty_modifier: i32,
}

impl BurstProfile {
    pub const SINGLE_SHOT: Self = Self {
        max_burst: 1,
        base_penalty: 0,
        penalty_modifier: 0,
    };

    pub const fn new(max_burst: u32, base_penalty: i32) -> Self {
        Self {
            max_burst,
            base_penalty,
            penalty_modifier: 0,
        }
    }

    pub fn is_burst_capable(&self) -> bool {
        self.max_burst > 1
    }

    pub fn effective_penalty(&self) -> i32 {
        (self.base_penalty + self.penalty_modifier).max(0)
    }

    /// Hit penalty applied to shot `index` of a burst.
    pub fn penalty_for(&self, index: u32) -> i32 {
        index as i32 * self.effective_penalty()
    }

    /// Number of shots actually fired: `min(requested, max_burst, loaded)`.
    ///
    /// A request of zero counts as a single shot.
    pub fn clamp_shots(&self, requested: u32, loaded: u32) -> u32 {
        requested.max(1).min(self.max_burst.max(1)).min(loaded)
    }
}

impl Default for BurstProfile {
    fn default() -> Self {
        Self::SINGLE_SHOT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_to_burst_and_ammo() {
        let pistol = BurstProfile::new(2, 2);
        assert_eq!(pistol.clamp_shots(5, 2), 2);
        assert_eq!(pistol.clamp_shots(5, 1), 1);
        assert_eq!(pistol.clamp_shots(0, 3), 1);
        assert_eq!(pistol.clamp_shots(3, 0), 0);
    }

    #[test]
    fn penalty_escalates_linearly_from_zero() {
        let rifle = BurstProfile::new(4, 2);
        let penalties: Vec<i32> = (0..4).map(|i| rifle.penalty_for(i)).collect();
        assert_eq!(penalties, vec![0, 2, 4, 6]);
    }

    #[test]
    fn negative_effective_penalty_floors_at_zero() {
        let braced = BurstProfile {
            max_burst: 3,
            base_penalty: 1,
            penalty_modifier: -3,
        };
        assert_eq!(braced.effective_penalty(), 0);
        assert_eq!(braced.penalty_for(2), 0);
    }
}
