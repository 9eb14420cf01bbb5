//! Status effect engine.
mod combo;
mod engine;

pub use combo::ComboRule;
pub use engine::{StatusEffectEngine, TurnStartReport};
