//! Encounter state: units, their statuses, and the roster they live in.
mod ids;
mod inventory;
mod roster;
mod stats;
mod status;
mod unit;

pub use ids::{AbilityId, CardId, ItemId, UnitId};
pub use inventory::{Inventory, InventoryLine};
pub use roster::Roster;
pub use stats::{Stat, UnitStats};
pub use status::{StatusEffect, StatusEffectKind, StatusEffects};
pub use unit::{EnemyProfile, EquipmentSlot, HeroProfile, Side, Unit, UnitRole};
