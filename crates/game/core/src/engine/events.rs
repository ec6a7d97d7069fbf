//! Discrete battle events handed to the log sink.

use core::fmt;

use crate::combat::AttackReport;
use crate::combatant::UnitId;
use crate::modifier::StanceKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BattleOutcome {
    /// Every opposing combatant is down.
    Victory,
    /// Every player-side combatant is down.
    Defeat,
}

/// Everything the session reports. Drained by the caller after each call.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEvent {
    BattleStarted {
        participants: usize,
    },
    BattleEnded {
        outcome: BattleOutcome,
    },
    TickElapsed {
        tick: u64,
    },
    TurnStarted {
        unit: UnitId,
        name: String,
    },
    TurnEnded {
        unit: UnitId,
        name: String,
    },
    ActionPointsChanged {
        movement: u8,
        major: u8,
        minor: u8,
    },
    ActionPoolExhausted {
        unit: UnitId,
    },
    Attack(AttackReport),
    StanceSwitched {
        name: String,
        from: StanceKind,
        to: StanceKind,
    },
    Reloaded {
        name: String,
        weapon: String,
        rounds: u32,
        loaded: u32,
        reserve: u32,
    },
    Moved {
        name: String,
    },
    /// Log line returned by a non-player behavior.
    UnitAction {
        name: String,
        log: String,
    },
    /// Something a perk, buff or status did on its own.
    HookEffect {
        name: String,
        note: String,
    },
    IntentRejected {
        code: String,
        message: String,
    },
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BattleStarted { participants } => {
                write!(f, "Battle started with {participants} combatants")
            }
            Self::BattleEnded { outcome } => write!(f, "Battle over: {outcome}"),
            Self::TickElapsed { tick } => write!(f, "tick {tick}"),
            Self::TurnStarted { unit, name } => write!(f, "{name} ({unit}) starts their turn"),
            Self::TurnEnded { unit, name } => write!(f, "{name} ({unit}) ends their turn"),
            Self::ActionPointsChanged {
                movement,
                major,
                minor,
            } => write!(f, "Actions left: move {movement}, major {major}, minor {minor}"),
            Self::ActionPoolExhausted { unit } => write!(f, "{unit} has no actions left"),
            Self::Attack(report) => write!(f, "{report}"),
            Self::StanceSwitched { name, from, to } => {
                write!(f, "{name} switches stance: {from} -> {to}")
            }
            Self::Reloaded {
                name,
                weapon,
                rounds,
                loaded,
                reserve,
            } => write!(
                f,
                "{name} reloads {weapon} (+{rounds}; {loaded} loaded, {reserve} in reserve)"
            ),
            Self::Moved { name } => write!(f, "{name} moves"),
            Self::UnitAction { log, .. } => f.write_str(log),
            Self::HookEffect { name, note } => write!(f, "{name}: {note}"),
            Self::IntentRejected { message, .. } => write!(f, "Rejected: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_render_single_lines() {
        let event = BattleEvent::StanceSwitched {
            name: "Vex".into(),
            from: StanceKind::Neutral,
            to: StanceKind::Defensive,
        };
        assert_eq!(event.to_string(), "Vex switches stance: neutral -> defensive");

        let event = BattleEvent::BattleEnded {
            outcome: BattleOutcome::Victory,
        };
        assert_eq!(event.to_string(), "Battle over: victory");
    }
}
