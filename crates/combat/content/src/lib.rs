//! Static combat content and the loaders that read it.
//!
//! Content lives in RON/TOML files and is exposed to the rules through the
//! oracle traits of `combat-core`:
//! - Card table (`cards.ron`), implements [`combat_core::CardOracle`]
//! - Enemy ability table (`abilities.ron`), implements [`combat_core::AbilityOracle`]
//! - Enemy templates (`enemies.ron`), instantiated into fresh units
//! - Hero roster and party inventory (`heroes.ron`)
//! - Combat tuning (`combat.toml`)
//!
//! Content is read-only during an encounter and never appears in session state.

pub mod tables;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use tables::{AbilityTable, CardTable, EnemyTemplate, EnemyTemplates, HeroSpec, PartySpec};

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, CardLoader, ConfigLoader, ContentBundle, ContentFactory, EnemyLoader,
    HeroLoader, LoadResult,
};
