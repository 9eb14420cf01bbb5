//! Session request errors.

use crate::card::CardError;
use crate::env::OracleError;
use crate::error::{CombatError, ErrorSeverity};
use crate::state::{CardId, UnitId};

/// A rejected session request. Rejections never change encounter state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("encounter already started")]
    AlreadyStarted,

    #[error("encounter not started")]
    NotStarted,

    #[error("encounter is over")]
    Ended,

    #[error("an action is still resolving")]
    Busy,

    #[error("it is not a hero's turn")]
    NotHeroTurn,

    #[error("it is not an enemy's turn")]
    NotEnemyTurn,

    #[error("no skipped turn is pending")]
    NotSkippedTurn,

    #[error("{0} is not the active enemy")]
    NotActiveEnemy(UnitId),

    #[error("{0} cannot act this turn")]
    UnitCannotAct(UnitId),

    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error("{unit} does not hold card {card}")]
    CardNotInDeck { unit: UnitId, card: CardId },

    #[error("target {0} not found")]
    TargetNotFound(UnitId),

    #[error("target {0} is already defeated")]
    TargetDead(UnitId),

    #[error(transparent)]
    Card(#[from] CardError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

impl CombatError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Ended
            | Self::Busy
            | Self::NotHeroTurn
            | Self::NotEnemyTurn
            | Self::NotSkippedTurn
            | Self::UnitCannotAct(_)
            | Self::TargetDead(_) => ErrorSeverity::Recoverable,
            Self::AlreadyStarted
            | Self::NotStarted
            | Self::NotActiveEnemy(_)
            | Self::UnknownCard(_)
            | Self::CardNotInDeck { .. }
            | Self::TargetNotFound(_) => ErrorSeverity::Validation,
            Self::Card(err) => err.severity(),
            Self::Oracle(err) => err.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyStarted => "SESSION_ALREADY_STARTED",
            Self::NotStarted => "SESSION_NOT_STARTED",
            Self::Ended => "SESSION_ENDED",
            Self::Busy => "SESSION_BUSY",
            Self::NotHeroTurn => "SESSION_NOT_HERO_TURN",
            Self::NotEnemyTurn => "SESSION_NOT_ENEMY_TURN",
            Self::NotSkippedTurn => "SESSION_NOT_SKIPPED_TURN",
            Self::NotActiveEnemy(_) => "SESSION_NOT_ACTIVE_ENEMY",
            Self::UnitCannotAct(_) => "SESSION_UNIT_CANNOT_ACT",
            Self::UnknownCard(_) => "SESSION_UNKNOWN_CARD",
            Self::CardNotInDeck { .. } => "SESSION_CARD_NOT_IN_DECK",
            Self::TargetNotFound(_) => "SESSION_TARGET_NOT_FOUND",
            Self::TargetDead(_) => "SESSION_TARGET_DEAD",
            Self::Card(err) => err.error_code(),
            Self::Oracle(err) => err.error_code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_errors_keep_their_classification() {
        let err = SessionError::from(CardError::InsufficientActionPoints {
            card: CardId::from("slash"),
            required: 2,
            available: 1,
        });
        assert!(err.severity().is_recoverable());
        assert_eq!(err.error_code(), "CARD_INSUFFICIENT_ACTION_POINTS");

        let err = SessionError::from(OracleError::CardsNotAvailable);
        assert!(err.severity().is_internal());
    }
}
