//! Enemy decision making.
//!
//! [`EnemyPolicy`] dispatches on an enemy's [`Archetype`] and returns an
//! [`EnemyAction`] without executing it.
mod action;
mod archetype;
mod patterns;
mod policy;

pub use action::EnemyAction;
pub use archetype::Archetype;
pub use patterns::{first_living, most_wounded, weakest};
pub use policy::EnemyPolicy;
