//! End-of-combat hooks.
//!
//! Hooks let collaborators outside the rules (reward grants, save writes,
//! analytics) react to an encounter's outcome. The worker runs every
//! registered hook exactly once, in priority order, when the session reaches
//! Victory or Defeat. An explicit exit never runs them.

mod context;
mod outcome_log;
mod registry;

pub use context::HookContext;
pub use outcome_log::OutcomeLogHook;
pub use registry::HookRegistry;

use thiserror::Error;

/// Defines how a hook failure is reported.
///
/// The encounter is already over when hooks run, so no failure can undo it;
/// criticality only decides how loudly a failure is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookCriticality {
    /// Logged at error level. Use for hooks that persist progress.
    Important,

    /// Logged at debug level. Use for cosmetic or best-effort hooks.
    Optional,
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct HookError {
    pub message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Collaborator notified when an encounter ends with an outcome.
pub trait EncounterHook: Send + Sync {
    /// Returns a human-readable name for this hook (used in logging).
    fn name(&self) -> &'static str;

    /// Lower values run first.
    fn priority(&self) -> i32 {
        0
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Important
    }

    /// Called once with the final roster.
    fn on_combat_end(&self, ctx: &HookContext<'_>) -> Result<(), HookError>;
}
