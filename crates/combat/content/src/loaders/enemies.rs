//! Enemy template loader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::tables::{EnemyTemplate, EnemyTemplates};

/// ```ron
/// (
///     enemies: [
///         (
///             id: "goblin",
///             name: "Goblin",
///             stats: (max_hp: 30, attack: 10, defense: 5),
///             archetype: Aggressive,
///         ),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyTemplate>,
}

pub struct EnemyLoader;

impl EnemyLoader {
    pub fn load(path: &Path) -> LoadResult<EnemyTemplates> {
        let content = read_file(path)?;
        let catalog: EnemyCatalog = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;
        Ok(EnemyTemplates::new(catalog.enemies))
    }
}
