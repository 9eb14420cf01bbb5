//! Turn order and round tracking.
mod order;
mod scheduler;

pub use order::{FixedSeniority, TurnOrderPolicy, TurnParticipant};
pub use scheduler::{Advance, Outcome, SchedulerState, TurnScheduler};
