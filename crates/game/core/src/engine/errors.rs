//! Reasons a player intent is refused.

use crate::combat::AttackError;
use crate::combatant::UnitId;
use crate::economy::EconomyError;
use crate::error::{ErrorSeverity, GameError};
use crate::modifier::StanceKind;
use crate::weapon::ReloadError;

/// Precondition failure of a player intent. The session is left unchanged.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IntentError {
    #[error("the battle has not started")]
    NotStarted,

    #[error("the battle is over")]
    BattleOver,

    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error(transparent)]
    Economy(#[from] EconomyError),

    #[error("no combatant {0}")]
    UnknownUnit(UnitId),

    #[error("{0} is not a valid target")]
    InvalidTarget(String),

    #[error("no weapon in slot {0}")]
    UnknownWeapon(usize),

    #[error(transparent)]
    Attack(#[from] AttackError),

    #[error(transparent)]
    Reload(#[from] ReloadError),

    #[error("already in {0} stance")]
    StanceUnchanged(StanceKind),
}

impl GameError for IntentError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Economy(e) => e.severity(),
            Self::Attack(e) => e.severity(),
            Self::Reload(e) => e.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotStarted => "INTENT_NOT_STARTED",
            Self::BattleOver => "INTENT_BATTLE_OVER",
            Self::NotPlayerTurn => "INTENT_NOT_PLAYER_TURN",
            Self::Economy(e) => e.error_code(),
            Self::UnknownUnit(_) => "INTENT_UNKNOWN_UNIT",
            Self::InvalidTarget(_) => "INTENT_INVALID_TARGET",
            Self::UnknownWeapon(_) => "INTENT_UNKNOWN_WEAPON",
            Self::Attack(e) => e.error_code(),
            Self::Reload(e) => e.error_code(),
            Self::StanceUnchanged(_) => "INTENT_STANCE_UNCHANGED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::ActionKind;

    #[test]
    fn wrapped_errors_keep_their_codes() {
        let err = IntentError::from(ReloadError::ReserveEmpty);
        assert_eq!(err.error_code(), "RELOAD_RESERVE_EMPTY");
        assert!(err.severity().is_recoverable());

        let err = IntentError::from(EconomyError::Depleted(ActionKind::Minor));
        assert_eq!(err.to_string(), "no minor actions left this turn");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }
}
