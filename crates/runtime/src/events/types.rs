//! Runtime lifecycle events.

use std::time::Duration;

use combat_core::UnitId;
use serde::{Deserialize, Serialize};

/// Events emitted by the encounter worker rather than the rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterEvent {
    /// An enemy became active; its action resolves after `delay`.
    EnemyThinking { unit: UnitId, delay: Duration },

    /// A unit that cannot act will have its turn passed after `delay`.
    TurnSkipping { unit: UnitId, delay: Duration },

    /// A deferred action was dropped because the encounter ended first.
    PendingCancelled { unit: UnitId },

    /// The encounter was left without an outcome.
    Exited { round: u32 },
}
