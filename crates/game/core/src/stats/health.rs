/// Current and maximum hit points.
///
/// `current` always stays within `[0, maximum]`; every mutation clamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    current: i32,
    maximum: i32,
}

impl Health {
    pub fn new(current: i32, maximum: i32) -> Self {
        let maximum = maximum.max(1);
        Self {
            current: current.clamp(0, maximum),
            maximum,
        }
    }

    pub fn full(maximum: i32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Subtracts damage and returns the amount actually removed.
    ///
    /// Negative amounts are treated as zero.
    pub fn damage(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = (self.current - amount.max(0)).max(0);
        before - self.current
    }

    /// Restores HP up to the maximum and returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = (self.current + amount.max(0)).min(self.maximum);
        self.current - before
    }
}
