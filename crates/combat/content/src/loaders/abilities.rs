//! Enemy ability loader.

use std::path::Path;

use combat_core::Ability;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::tables::AbilityTable;

/// ```ron
/// (
///     abilities: [
///         (id: "mend", name: "Mend", kind: Heal(amount: 12)),
///         (id: "hex", name: "Hex", kind: Debuff(kind: Poison, duration: 3, magnitude: 2)),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityCatalog {
    pub abilities: Vec<Ability>,
}

pub struct AbilityLoader;

impl AbilityLoader {
    pub fn load(path: &Path) -> LoadResult<AbilityTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<AbilityTable> {
        let catalog: AbilityCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse ability catalog RON: {}", e))?;
        Ok(AbilityTable::new(catalog.abilities))
    }
}
