//! Common error infrastructure for combat-core.
//!
//! Domain-specific errors (e.g. [`crate::CardError`], [`crate::SessionError`])
//! live next to the operations they validate. This module provides the shared
//! classification used by every one of them.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each component has its own error enum with specific variants
//! - **Severity Classification**: Errors are categorized so the runtime can decide
//!   between "inform the player" and "log as a bug"
//! - **Never fatal to the turn loop**: rejected requests surface as messages, the
//!   encounter keeps running

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: The request was reasonable but cannot happen right now
///   (not enough action points, target already dead)
/// - **Validation**: The request itself is malformed (unknown unit, empty card)
/// - **Internal**: Unexpected state inconsistency that should be investigated
/// - **Fatal**: The encounter cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Retry later or pick a different action.
    Recoverable,

    /// Invalid input, should not be retried unchanged.
    Validation,

    /// Unexpected state inconsistency.
    Internal,

    /// Encounter state is unusable.
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable identifiers, safe to match on in UIs and tests
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
