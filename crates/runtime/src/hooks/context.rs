//! Context passed to end-of-combat hooks.

use combat_core::{Outcome, Roster, Side, Unit};

/// Read-only view of a finished encounter.
pub struct HookContext<'a> {
    pub outcome: Outcome,
    /// Round in which the encounter ended.
    pub round: u32,
    pub roster: &'a Roster,
}

impl<'a> HookContext<'a> {
    pub fn new(outcome: Outcome, round: u32, roster: &'a Roster) -> Self {
        Self {
            outcome,
            round,
            roster,
        }
    }

    pub fn is_victory(&self) -> bool {
        self.outcome == Outcome::Victory
    }

    /// Heroes still standing.
    pub fn survivors(&self) -> Vec<&'a Unit> {
        self.roster.living(Side::Hero)
    }
}
