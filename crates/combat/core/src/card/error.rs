//! Card play errors.

use crate::error::{CombatError, ErrorSeverity};
use crate::state::{CardId, UnitId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardError {
    #[error("card {card} has no effect")]
    EmptyCard { card: CardId },

    #[error("card {card} costs {required} action points, {available} available")]
    InsufficientActionPoints {
        card: CardId,
        required: u32,
        available: u32,
    },

    #[error("source {0} not found")]
    SourceNotFound(UnitId),

    #[error("source {0} is dead")]
    SourceDead(UnitId),

    #[error("target {0} not found")]
    TargetNotFound(UnitId),
}

impl CombatError for CardError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InsufficientActionPoints { .. } => ErrorSeverity::Recoverable,
            Self::EmptyCard { .. }
            | Self::SourceNotFound(_)
            | Self::SourceDead(_)
            | Self::TargetNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyCard { .. } => "CARD_EMPTY",
            Self::InsufficientActionPoints { .. } => "CARD_INSUFFICIENT_ACTION_POINTS",
            Self::SourceNotFound(_) => "CARD_SOURCE_NOT_FOUND",
            Self::SourceDead(_) => "CARD_SOURCE_DEAD",
            Self::TargetNotFound(_) => "CARD_TARGET_NOT_FOUND",
        }
    }
}
