//! The mutable roster an encounter runs against.
//!
//! The game owns the roster between encounters; a session borrows it mutably
//! for every step and never keeps references across steps.

use super::{Inventory, Side, Unit, UnitId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roster {
    heroes: Vec<Unit>,
    enemies: Vec<Unit>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Inventory,
}

impl Roster {
    pub fn new(heroes: Vec<Unit>, enemies: Vec<Unit>) -> Self {
        Self {
            heroes,
            enemies,
            inventory: Inventory::new(),
        }
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn heroes(&self) -> &[Unit] {
        &self.heroes
    }

    pub fn enemies(&self) -> &[Unit] {
        &self.enemies
    }

    pub fn side(&self, side: Side) -> &[Unit] {
        match side {
            Side::Hero => &self.heroes,
            Side::Enemy => &self.enemies,
        }
    }

    /// All units, heroes first.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.heroes.iter().chain(self.enemies.iter())
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units().find(|unit| unit.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.heroes
            .iter_mut()
            .chain(self.enemies.iter_mut())
            .find(|unit| unit.id == id)
    }

    /// Living units of one side, in roster order.
    pub fn living(&self, side: Side) -> Vec<&Unit> {
        self.side(side).iter().filter(|unit| unit.is_alive()).collect()
    }

    /// Ids of living units on one side, in roster order.
    pub fn living_ids(&self, side: Side) -> Vec<UnitId> {
        self.side(side)
            .iter()
            .filter(|unit| unit.is_alive())
            .map(|unit| unit.id)
            .collect()
    }

    pub fn side_of(&self, id: UnitId) -> Option<Side> {
        self.unit(id).map(Unit::side)
    }

    /// True when no unit of `side` is alive. An empty side counts as wiped.
    pub fn all_dead(&self, side: Side) -> bool {
        self.side(side).iter().all(Unit::is_dead)
    }
}
