//! Battle session: scheduler loop, player intents and non-player turns.
//!
//! The [`BattleSession`] owns every participant, the [`InitiativeScheduler`],
//! the player's [`ActionPool`] and the dice; nothing is global. Drivers call
//! [`BattleSession::run`] once per tick interval. When it reports
//! [`BattleStatus::AwaitingInput`] the loop is suspended until a player intent
//! ends the turn (explicitly, or by exhausting the action pool).
//!
//! Battle termination is re-checked after every single action, not only at
//! tick boundaries.

mod behavior;
mod errors;
mod events;
mod scheduler;

pub use behavior::{BehaviorKind, Brute, CombatBehavior, Gunner, Idle, TurnContext};
pub use errors::IntentError;
pub use events::{BattleEvent, BattleOutcome};
pub use scheduler::{BattleUnit, InitiativeScheduler, SchedulerPhase, SchedulerStep};

use crate::combat::{AttackReport, resolve_attack, validate_attack};
use crate::combatant::{Combatant, Side, Target, UnitId};
use crate::config::BattleConfig;
use crate::economy::{ActionKind, ActionPool, PoolStatus};
use crate::env::Dice;
use crate::error::GameError;
use crate::modifier::StanceKind;
use crate::record::CharacterRecord;
use crate::weapon::Weapon;

/// Where [`BattleSession::run`] stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleStatus {
    /// A player-side unit is acting; the loop waits for intents.
    AwaitingInput(UnitId),
    /// One tick finished; call `run` again after the tick interval.
    TickElapsed(u64),
    Ended(BattleOutcome),
}

/// One combatant with its weapons and, for non-player units, its behavior.
#[derive(Debug)]
pub struct Participant {
    pub combatant: Combatant,
    pub loadout: Vec<Weapon>,
    behavior: Option<Box<dyn CombatBehavior>>,
}

impl Participant {
    pub fn new(combatant: Combatant, loadout: Vec<Weapon>) -> Self {
        Self {
            combatant,
            loadout,
            behavior: None,
        }
    }

    pub fn with_behavior(mut self, behavior: Box<dyn CombatBehavior>) -> Self {
        self.behavior = Some(behavior);
        self
    }

    pub fn is_player(&self) -> bool {
        self.combatant.side() == Side::Player
    }

    pub fn is_alive(&self) -> bool {
        self.combatant.is_alive()
    }

    fn initiative(&self) -> i32 {
        match &self.behavior {
            Some(behavior) => behavior.initiative(&self.combatant),
            None => self.combatant.initiative_per_round(),
        }
    }
}

pub struct BattleSession {
    config: BattleConfig,
    participants: Vec<Participant>,
    scheduler: InitiativeScheduler,
    economy: ActionPool,
    dice: Box<dyn Dice + Send>,
    events: Vec<BattleEvent>,
    started: bool,
    awaiting: Option<UnitId>,
    outcome: Option<BattleOutcome>,
}

impl BattleSession {
    /// Builds a session from character records. Ids follow record order.
    ///
    /// A non-player record without a behavior gets [`Idle`] with a warning.
    pub fn initialize(
        config: BattleConfig,
        records: &[CharacterRecord],
        dice: Box<dyn Dice + Send>,
    ) -> Self {
        let participants = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let combatant = record.to_combatant(UnitId(index as u32));
                let participant = Participant::new(combatant, record.battle_loadout());
                if record.side == Side::Player {
                    return participant;
                }
                let behavior = record.behavior.unwrap_or_else(|| {
                    tracing::warn!(name = %record.name, "non-player record has no behavior; idling");
                    BehaviorKind::Idle
                });
                participant.with_behavior(behavior.instantiate())
            })
            .collect();

        Self::with_participants(config, participants, dice)
    }

    /// Builds a session from already constructed participants.
    pub fn with_participants(
        config: BattleConfig,
        participants: Vec<Participant>,
        dice: Box<dyn Dice + Send>,
    ) -> Self {
        let config = config.sanitized();
        Self {
            scheduler: InitiativeScheduler::new(config.activation_threshold),
            economy: ActionPool::new(config.action_pool),
            config,
            participants,
            dice,
            events: Vec::new(),
            started: false,
            awaiting: None,
            outcome: None,
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: UnitId) -> Option<&Participant> {
        self.participants.get(id.index())
    }

    pub fn scheduler(&self) -> &InitiativeScheduler {
        &self.scheduler
    }

    pub fn economy(&self) -> &ActionPool {
        &self.economy
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_player_turn(&self) -> bool {
        self.awaiting.is_some()
    }

    /// Player-side unit currently waiting for intents.
    pub fn active_unit(&self) -> Option<UnitId> {
        self.awaiting
    }

    pub fn battle_ended(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    /// Opposing combatants still standing.
    pub fn enemy_count(&self) -> usize {
        self.participants
            .iter()
            .filter(|p| !p.is_player() && p.is_alive())
            .count()
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Takes every event emitted since the previous drain.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // Loop
    // ========================================================================

    /// Runs battle-start hooks, fixes every unit's initiative and starts ticking.
    pub fn start_battle(&mut self) {
        if self.started {
            tracing::warn!("battle already started");
            return;
        }
        self.started = true;

        for participant in &mut self.participants {
            let notes = participant.combatant.begin_battle();
            push_notes(&mut self.events, &participant.combatant, notes);
        }
        for participant in &self.participants {
            self.scheduler
                .register(participant.combatant.id(), participant.initiative());
        }

        tracing::info!(
            participants = self.participants.len(),
            threshold = self.config.activation_threshold,
            "battle started"
        );
        self.events.push(BattleEvent::BattleStarted {
            participants: self.participants.len(),
        });
        self.scheduler.start();
        self.check_termination();
    }

    /// Advances the loop until a player unit must act, a tick completes or
    /// the battle ends. Non-player turns run to completion inside this call.
    pub fn run(&mut self) -> BattleStatus {
        if !self.started {
            self.start_battle();
        }

        loop {
            if let Some(outcome) = self.outcome {
                return BattleStatus::Ended(outcome);
            }
            if let Some(unit) = self.awaiting {
                return BattleStatus::AwaitingInput(unit);
            }

            let participants = &self.participants;
            let step = self.scheduler.advance(|id| {
                participants
                    .get(id.index())
                    .is_some_and(Participant::is_alive)
            });

            match step {
                SchedulerStep::Act(unit) => self.activate(unit),
                SchedulerStep::TickComplete(tick) => {
                    self.events.push(BattleEvent::TickElapsed { tick });
                    return BattleStatus::TickElapsed(tick);
                }
                SchedulerStep::Halted => {
                    tracing::warn!(phase = ?self.scheduler.phase(), "scheduler halted unexpectedly");
                    return BattleStatus::TickElapsed(self.scheduler.ticks_elapsed());
                }
            }
        }
    }

    fn activate(&mut self, unit: UnitId) {
        let Some(participant) = self.participants.get_mut(unit.index()) else {
            self.scheduler.finish_activation();
            return;
        };

        tracing::debug!(%unit, name = %participant.combatant.name(), "turn started");
        self.events.push(BattleEvent::TurnStarted {
            unit,
            name: participant.combatant.name().to_string(),
        });
        let notes = participant.combatant.begin_turn();
        push_notes(&mut self.events, &participant.combatant, notes);

        if participant.is_player() {
            self.economy.begin_turn();
            self.awaiting = Some(unit);
            self.push_pool();
            return;
        }

        self.run_behavior(unit);
        if !self.check_termination() {
            self.finish_turn(unit);
        }
    }

    fn run_behavior(&mut self, unit: UnitId) {
        let target = self
            .participants
            .iter()
            .position(|p| p.is_player() && p.is_alive());
        let pair = target.and_then(|t| pair_mut(&mut self.participants, unit.index(), t));
        let Some((actor, target)) = pair else {
            tracing::debug!(%unit, "no target; turn skipped");
            return;
        };

        let Participant {
            combatant,
            loadout,
            behavior,
        } = actor;
        let log = match behavior {
            Some(behavior) => behavior.perform_action(TurnContext {
                actor: &mut *combatant,
                loadout: loadout.as_mut_slice(),
                target: &mut target.combatant,
                dice: self.dice.as_mut(),
            }),
            None => None,
        };

        match log {
            Some(log) => self.events.push(BattleEvent::UnitAction {
                name: combatant.name().to_string(),
                log,
            }),
            None => tracing::debug!(%unit, "behavior returned nothing; no-op turn"),
        }
    }

    /// Runs turn-end hooks and hands control back to the scheduler.
    fn finish_turn(&mut self, unit: UnitId) {
        if let Some(participant) = self.participants.get_mut(unit.index()) {
            let notes = participant.combatant.end_turn();
            push_notes(&mut self.events, &participant.combatant, notes);
            self.events.push(BattleEvent::TurnEnded {
                unit,
                name: participant.combatant.name().to_string(),
            });
        }
        if self.awaiting == Some(unit) {
            self.awaiting = None;
            self.economy.end_turn();
        }
        self.scheduler.finish_activation();
    }

    /// Ends the battle if either side is wiped out. Returns whether it ended.
    fn check_termination(&mut self) -> bool {
        if self.outcome.is_some() {
            return true;
        }

        let side_alive = |player: bool| {
            self.participants
                .iter()
                .any(|p| p.is_player() == player && p.is_alive())
        };
        let outcome = if !side_alive(true) {
            BattleOutcome::Defeat
        } else if !side_alive(false) {
            BattleOutcome::Victory
        } else {
            return false;
        };

        tracing::info!(%outcome, ticks = self.scheduler.ticks_elapsed(), "battle ended");
        self.outcome = Some(outcome);
        self.awaiting = None;
        self.economy.end_turn();
        self.scheduler.end();
        self.events.push(BattleEvent::BattleEnded { outcome });
        true
    }

    // ========================================================================
    // Player intents
    // ========================================================================

    /// Spends the movement action. Positioning itself is external.
    pub fn use_move_action(&mut self) -> Result<(), IntentError> {
        let result = self.try_move();
        self.settle(result)
    }

    /// Attacks `target` with the weapon in `slot`.
    ///
    /// `burst` is the requested shot count for ranged weapons (default 1).
    pub fn attack(
        &mut self,
        target: UnitId,
        slot: usize,
        burst: Option<u32>,
    ) -> Result<AttackReport, IntentError> {
        let result = self.try_attack(target, slot, burst.unwrap_or(1));
        self.settle(result)
    }

    /// Switches stance for one minor action. Returns the previous stance.
    pub fn switch_stance(&mut self, stance: StanceKind) -> Result<StanceKind, IntentError> {
        let result = self.try_switch_stance(stance);
        self.settle(result)
    }

    /// Reloads the weapon in `slot` for one minor action. Returns rounds moved.
    pub fn reload(&mut self, slot: usize) -> Result<u32, IntentError> {
        let result = self.try_reload(slot);
        self.settle(result)
    }

    pub fn end_turn(&mut self) -> Result<(), IntentError> {
        let result = self.player_unit().map(|unit| self.finish_turn(unit));
        self.settle(result)
    }

    fn try_move(&mut self) -> Result<(), IntentError> {
        let unit = self.player_unit()?;
        let status = self.economy.consume(ActionKind::Movement)?;
        let name = self.participants[unit.index()].combatant.name().to_string();
        self.events.push(BattleEvent::Moved { name });
        self.after_action(unit, status);
        Ok(())
    }

    fn try_attack(
        &mut self,
        target: UnitId,
        slot: usize,
        requested: u32,
    ) -> Result<AttackReport, IntentError> {
        let unit = self.player_unit()?;
        self.economy.check(ActionKind::Major)?;

        let target_side = self
            .participant(target)
            .ok_or(IntentError::UnknownUnit(target))?
            .combatant
            .side();
        let (actor, defender) = pair_mut(&mut self.participants, unit.index(), target.index())
            .ok_or_else(|| IntentError::InvalidTarget(target.to_string()))?;
        if target_side == actor.combatant.side() {
            return Err(IntentError::InvalidTarget(
                defender.combatant.name().to_string(),
            ));
        }
        let weapon = actor
            .loadout
            .get_mut(slot)
            .ok_or(IntentError::UnknownWeapon(slot))?;
        validate_attack(&actor.combatant, weapon, &defender.combatant)?;

        let status = self.economy.consume(ActionKind::Major)?;
        let report = resolve_attack(
            &mut actor.combatant,
            weapon,
            &mut defender.combatant,
            requested,
            self.dice.as_mut(),
        )?;

        self.events.push(BattleEvent::Attack(report.clone()));
        self.after_action(unit, status);
        Ok(report)
    }

    fn try_switch_stance(&mut self, stance: StanceKind) -> Result<StanceKind, IntentError> {
        let unit = self.player_unit()?;
        self.economy.check(ActionKind::Minor)?;

        let combatant = &mut self.participants[unit.index()].combatant;
        let previous = combatant
            .switch_stance(stance)
            .ok_or(IntentError::StanceUnchanged(stance))?;
        self.events.push(BattleEvent::StanceSwitched {
            name: combatant.name().to_string(),
            from: previous,
            to: stance,
        });

        let status = self.economy.consume(ActionKind::Minor)?;
        self.after_action(unit, status);
        Ok(previous)
    }

    fn try_reload(&mut self, slot: usize) -> Result<u32, IntentError> {
        let unit = self.player_unit()?;
        self.economy.check(ActionKind::Minor)?;

        let participant = &mut self.participants[unit.index()];
        let weapon = participant
            .loadout
            .get_mut(slot)
            .ok_or(IntentError::UnknownWeapon(slot))?;
        let rounds = weapon.reload()?;
        let (loaded, reserve) = weapon
            .magazine()
            .map_or((0, 0), |m| (m.loaded(), m.reserve()));
        self.events.push(BattleEvent::Reloaded {
            name: participant.combatant.name().to_string(),
            weapon: weapon.name().to_string(),
            rounds,
            loaded,
            reserve,
        });

        let status = self.economy.consume(ActionKind::Minor)?;
        self.after_action(unit, status);
        Ok(rounds)
    }

    /// The player unit whose turn is open.
    fn player_unit(&self) -> Result<UnitId, IntentError> {
        if self.outcome.is_some() {
            return Err(IntentError::BattleOver);
        }
        if !self.started {
            return Err(IntentError::NotStarted);
        }
        self.awaiting.ok_or(IntentError::NotPlayerTurn)
    }

    /// Post-action bookkeeping: termination, a downed actor, exhaustion.
    fn after_action(&mut self, unit: UnitId, status: PoolStatus) {
        self.push_pool();
        if self.check_termination() {
            return;
        }

        let actor_down = self
            .participant(unit)
            .is_some_and(|p| !p.is_alive());
        if actor_down {
            self.finish_turn(unit);
            return;
        }

        if status == PoolStatus::Exhausted {
            self.events.push(BattleEvent::ActionPoolExhausted { unit });
            if self.config.auto_end_turn {
                self.finish_turn(unit);
            }
        }
    }

    fn push_pool(&mut self) {
        self.events.push(BattleEvent::ActionPointsChanged {
            movement: self.economy.remaining(ActionKind::Movement),
            major: self.economy.remaining(ActionKind::Major),
            minor: self.economy.remaining(ActionKind::Minor),
        });
    }

    /// Logs a rejected intent and passes the result through.
    fn settle<T>(&mut self, result: Result<T, IntentError>) -> Result<T, IntentError> {
        if let Err(err) = &result {
            tracing::debug!(code = err.error_code(), severity = err.severity().as_str(), "{err}");
            self.events.push(BattleEvent::IntentRejected {
                code: err.error_code().to_string(),
                message: err.to_string(),
            });
        }
        result
    }

    // ========================================================================
    // Write-back
    // ========================================================================

    /// Copies HP and ammunition back into the records the session was built
    /// from. Records are matched by position and name. Returns how many were
    /// updated.
    pub fn write_back(&self, records: &mut [CharacterRecord]) -> usize {
        let mut updated = 0;
        for (record, participant) in records.iter_mut().zip(&self.participants) {
            if record.name != participant.combatant.name() {
                tracing::warn!(
                    record = %record.name,
                    combatant = %participant.combatant.name(),
                    "record order changed; skipping write-back"
                );
                continue;
            }
            record.absorb(&participant.combatant, &participant.loadout);
            updated += 1;
        }
        updated
    }
}

fn push_notes(events: &mut Vec<BattleEvent>, combatant: &Combatant, notes: Vec<String>) {
    events.extend(notes.into_iter().map(|note| BattleEvent::HookEffect {
        name: combatant.name().to_string(),
        note,
    }));
}

/// Two distinct mutable elements of one slice.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> Option<(&mut T, &mut T)> {
    if a == b || a >= items.len() || b >= items.len() {
        return None;
    }
    if a < b {
        let (left, right) = items.split_at_mut(b);
        Some((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = items.split_at_mut(a);
        Some((&mut right[0], &mut left[b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_mut_rejects_aliasing() {
        let mut items = [1, 2, 3];
        assert!(pair_mut(&mut items, 1, 1).is_none());
        assert!(pair_mut(&mut items, 0, 3).is_none());

        let (a, b) = pair_mut(&mut items, 2, 0).expect("distinct");
        std::mem::swap(a, b);
        assert_eq!(items, [3, 2, 1]);
    }
}
