//! Participant ordering.

use crate::state::{Roster, Side, UnitId};

/// A unit bound into the turn order for one encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnParticipant {
    pub unit: UnitId,
    pub side: Side,
}

/// Decides the participant order once, at encounter start.
pub trait TurnOrderPolicy: Send + Sync {
    fn order(&self, roster: &Roster) -> Vec<TurnParticipant>;
}

/// Heroes in roster order, then enemies in roster order. Speed is ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedSeniority;

impl TurnOrderPolicy for FixedSeniority {
    fn order(&self, roster: &Roster) -> Vec<TurnParticipant> {
        roster
            .units()
            .map(|unit| TurnParticipant {
                unit: unit.id,
                side: unit.side(),
            })
            .collect()
    }
}
