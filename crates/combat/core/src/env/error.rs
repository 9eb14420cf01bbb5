//! Oracle access errors.

use crate::error::{CombatError, ErrorSeverity};

/// A required oracle was not supplied to the environment.
///
/// Missing rows inside a supplied oracle are not errors; lookups return
/// `None` and callers skip the effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("CardOracle not available")]
    CardsNotAvailable,

    #[error("AbilityOracle not available")]
    AbilitiesNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl CombatError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CardsNotAvailable => "ORACLE_CARDS_NOT_AVAILABLE",
            Self::AbilitiesNotAvailable => "ORACLE_ABILITIES_NOT_AVAILABLE",
            Self::RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
