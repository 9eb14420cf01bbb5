//! Loaders that turn RON/TOML files into content tables.

pub mod abilities;
pub mod cards;
pub mod config;
pub mod enemies;
pub mod factory;
pub mod heroes;

pub use abilities::AbilityLoader;
pub use cards::CardLoader;
pub use config::ConfigLoader;
pub use enemies::EnemyLoader;
pub use factory::{ContentBundle, ContentFactory};
pub use heroes::HeroLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
