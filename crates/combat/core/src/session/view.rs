//! Read-only snapshot of an encounter for UIs and tests.

use super::{Awaiting, Phase};
use crate::state::{CardId, Roster, Side, StatusEffect, Unit, UnitId};
use crate::turn::Outcome;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitView {
    pub id: UnitId,
    pub name: String,
    pub side: Side,
    pub hp: u32,
    pub max_hp: u32,
    pub action_points: u32,
    pub max_action_points: u32,
    pub temporary_defense: i32,
    pub dead: bool,
    pub statuses: Vec<StatusEffect>,
    /// Empty for enemies.
    pub deck: Vec<CardId>,
}

impl From<&Unit> for UnitView {
    fn from(unit: &Unit) -> Self {
        Self {
            id: unit.id,
            name: unit.name.clone(),
            side: unit.side(),
            hp: unit.hp,
            max_hp: unit.max_hp,
            action_points: unit.action_points,
            max_action_points: unit.max_action_points,
            temporary_defense: unit.temporary_defense,
            dead: unit.is_dead(),
            statuses: unit.statuses.iter().copied().collect(),
            deck: unit.deck().map(<[CardId]>::to_vec).unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionView {
    pub round: u32,
    pub phase: Phase,
    pub outcome: Outcome,
    pub active: Option<UnitId>,
    pub awaiting: Awaiting,
    /// Heroes first, then enemies.
    pub units: Vec<UnitView>,
}

impl SessionView {
    pub(super) fn capture(
        round: u32,
        phase: Phase,
        outcome: Outcome,
        active: Option<UnitId>,
        awaiting: Awaiting,
        roster: &Roster,
    ) -> Self {
        Self {
            round,
            phase,
            outcome,
            active,
            awaiting,
            units: roster.units().map(UnitView::from).collect(),
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&UnitView> {
        self.units.iter().find(|unit| unit.id == id)
    }
}
