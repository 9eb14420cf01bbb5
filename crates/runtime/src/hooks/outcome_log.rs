//! Hook that records the outcome in the log.

use tracing::info;

use super::{EncounterHook, HookContext, HookCriticality, HookError};

/// Logs the outcome, the final round and the surviving heroes.
pub struct OutcomeLogHook;

impl EncounterHook for OutcomeLogHook {
    fn name(&self) -> &'static str {
        "outcome_log"
    }

    fn priority(&self) -> i32 {
        100
    }

    fn criticality(&self) -> HookCriticality {
        HookCriticality::Optional
    }

    fn on_combat_end(&self, ctx: &HookContext<'_>) -> Result<(), HookError> {
        let survivors: Vec<String> = ctx
            .survivors()
            .iter()
            .map(|unit| format!("{} ({}/{})", unit.name, unit.hp, unit.max_hp))
            .collect();
        info!(
            target: "runtime::hooks",
            outcome = ?ctx.outcome,
            round = ctx.round,
            survivors = %survivors.join(", "),
            "encounter resolved"
        );
        Ok(())
    }
}
