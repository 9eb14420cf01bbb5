//! Turn scheduler.
//!
//! ```text
//! Idle --start_combat--> RoundActive --(a side wiped)--> Ended
//! ```
//!
//! End conditions are evaluated before every selection. When both sides are
//! wiped at once the encounter is a defeat.

use tracing::{debug, info};

use super::{TurnOrderPolicy, TurnParticipant};
use crate::event::{CombatEvent, EventSink};
use crate::state::{Roster, Side, UnitId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SchedulerState {
    #[default]
    Idle,
    RoundActive,
    Ended,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    #[default]
    Undetermined,
    Victory,
    Defeat,
}

/// What [`TurnScheduler::advance`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// A participant became active.
    Turn(TurnParticipant),
    /// The encounter is over; no unit was activated.
    Ended(Outcome),
    /// The scheduler was never started.
    NotRunning,
}

#[derive(Clone, Debug, Default)]
pub struct TurnScheduler {
    participants: Vec<TurnParticipant>,
    round: u32,
    active: Option<usize>,
    state: SchedulerState,
    outcome: Outcome,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the participant list, opens round 1 and activates the first
    /// living participant.
    pub fn start_combat(
        &mut self,
        roster: &Roster,
        policy: &dyn TurnOrderPolicy,
        sink: &mut dyn EventSink,
    ) -> Advance {
        self.participants = policy.order(roster);
        self.round = 1;
        self.active = None;
        self.outcome = Outcome::Undetermined;
        self.state = SchedulerState::RoundActive;
        info!(
            target: "combat::scheduler",
            participants = self.participants.len(),
            "combat started"
        );
        self.advance(roster, sink)
    }

    /// Moves to the next living participant, wrapping into a new round.
    ///
    /// Once ended, further calls are no-ops that report the outcome again
    /// without emitting anything.
    pub fn advance(&mut self, roster: &Roster, sink: &mut dyn EventSink) -> Advance {
        match self.state {
            SchedulerState::Idle => return Advance::NotRunning,
            SchedulerState::Ended => return Advance::Ended(self.outcome),
            SchedulerState::RoundActive => {}
        }

        loop {
            if let Some(outcome) = self.check_end_conditions(roster) {
                self.finish(outcome);
                return Advance::Ended(outcome);
            }

            let mut next = self.active.map_or(0, |index| index + 1);
            if next >= self.participants.len() {
                next = 0;
                self.round += 1;
                debug!(target: "combat::scheduler", round = self.round, "round start");
                sink.emit(CombatEvent::RoundStart { round: self.round });
            }
            self.active = Some(next);

            let participant = self.participants[next];
            if roster.unit(participant.unit).is_none_or(|unit| unit.is_dead()) {
                debug!(target: "combat::scheduler", unit = %participant.unit, "skipping dead unit");
                continue;
            }

            debug!(
                target: "combat::scheduler",
                unit = %participant.unit,
                round = self.round,
                "turn start"
            );
            sink.emit(CombatEvent::TurnStart {
                unit: participant.unit,
                side: participant.side,
                round: self.round,
            });
            return Advance::Turn(participant);
        }
    }

    /// Marks a unit dead. Does not advance the turn.
    pub fn kill_unit(&self, roster: &mut Roster, unit: UnitId) -> bool {
        match roster.unit_mut(unit) {
            Some(target) => {
                target.kill();
                true
            }
            None => false,
        }
    }

    /// Defeat is checked before victory.
    pub fn check_end_conditions(&self, roster: &Roster) -> Option<Outcome> {
        if roster.all_dead(Side::Hero) {
            Some(Outcome::Defeat)
        } else if roster.all_dead(Side::Enemy) {
            Some(Outcome::Victory)
        } else {
            None
        }
    }

    /// Stops the scheduler with `outcome`. Idempotent.
    pub fn finish(&mut self, outcome: Outcome) {
        if self.state == SchedulerState::Ended {
            return;
        }
        self.state = SchedulerState::Ended;
        self.outcome = outcome;
        self.active = None;
        info!(target: "combat::scheduler", ?outcome, round = self.round, "combat ended");
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn active(&self) -> Option<TurnParticipant> {
        self.active.and_then(|index| self.participants.get(index).copied())
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn participants(&self) -> &[TurnParticipant] {
        &self.participants
    }
}
