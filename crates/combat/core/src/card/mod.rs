//! Action cards and their resolution.
mod definition;
mod error;
mod resolver;

pub use definition::{ActionCard, CardFacets, Consumable, DamageOverTime, StatBuff, StatDelta};
pub use error::CardError;
pub use resolver::{ActionResult, CardResolver};
