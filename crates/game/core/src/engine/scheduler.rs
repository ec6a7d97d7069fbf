//! Initiative gauge scheduler.
//!
//! Every tick each alive unit gains its fixed rate. A unit whose gauge reaches
//! the activation threshold acts once and the threshold is subtracted; the
//! check repeats for the same unit until its gauge falls below the threshold,
//! and only then does the scheduler move on. Units are visited in registration
//! order, never sorted by gauge.
//!
//! ```text
//! Idle -> Ticking -> (UnitActing -> Ticking)* -> BattleEnded
//! ```

use crate::combatant::UnitId;

/// Scheduler entry for one participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleUnit {
    pub id: UnitId,
    /// Initiative per tick, fixed at battle start.
    pub rate: i32,
    pub gauge: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SchedulerPhase {
    Idle,
    Ticking,
    UnitActing(UnitId),
    BattleEnded,
}

/// Result of one [`InitiativeScheduler::advance`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerStep {
    /// The unit must act, then [`InitiativeScheduler::finish_activation`] is called.
    Act(UnitId),
    /// Every unit was visited; carries the number of completed ticks.
    TickComplete(u64),
    /// Not ticking (idle, mid-activation or ended).
    Halted,
}

#[derive(Clone, Debug)]
pub struct InitiativeScheduler {
    threshold: i32,
    units: Vec<BattleUnit>,
    phase: SchedulerPhase,
    ticks: u64,
    cursor: usize,
    /// Whether the unit under the cursor already gained this tick's initiative.
    accrued: bool,
}

impl InitiativeScheduler {
    pub fn new(threshold: i32) -> Self {
        Self {
            threshold: threshold.max(1),
            units: Vec::new(),
            phase: SchedulerPhase::Idle,
            ticks: 0,
            cursor: 0,
            accrued: false,
        }
    }

    /// Registers a unit with gauge 0. Registration order is evaluation order.
    pub fn register(&mut self, id: UnitId, rate: i32) {
        self.units.push(BattleUnit {
            id,
            rate: rate.max(1),
            gauge: 0,
        });
    }

    pub fn start(&mut self) {
        if self.phase == SchedulerPhase::Idle {
            self.phase = SchedulerPhase::Ticking;
        }
    }

    pub fn end(&mut self) {
        self.phase = SchedulerPhase::BattleEnded;
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    pub fn threshold(&self) -> i32 {
        self.threshold
    }

    pub fn ticks_elapsed(&self) -> u64 {
        self.ticks
    }

    pub fn units(&self) -> &[BattleUnit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&BattleUnit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Runs the scheduler until a unit must act or the current tick completes.
    ///
    /// `is_alive` gates both accrual and activation; a dead unit keeps its
    /// gauge but is skipped.
    pub fn advance(&mut self, is_alive: impl Fn(UnitId) -> bool) -> SchedulerStep {
        if self.phase != SchedulerPhase::Ticking {
            return SchedulerStep::Halted;
        }

        while let Some(unit) = self.units.get_mut(self.cursor) {
            if !is_alive(unit.id) {
                self.cursor += 1;
                self.accrued = false;
                continue;
            }

            if !self.accrued {
                unit.gauge += unit.rate;
                self.accrued = true;
            }

            if unit.gauge >= self.threshold {
                unit.gauge -= self.threshold;
                self.phase = SchedulerPhase::UnitActing(unit.id);
                tracing::trace!(unit = %unit.id, gauge = unit.gauge, "unit activates");
                return SchedulerStep::Act(unit.id);
            }

            self.cursor += 1;
            self.accrued = false;
        }

        self.cursor = 0;
        self.accrued = false;
        self.ticks += 1;
        SchedulerStep::TickComplete(self.ticks)
    }

    /// Returns to ticking after the acting unit is done. The same unit is
    /// re-checked first on the next [`advance`](Self::advance).
    pub fn finish_activation(&mut self) {
        if matches!(self.phase, SchedulerPhase::UnitActing(_)) {
            self.phase = SchedulerPhase::Ticking;
        }
    }
}
