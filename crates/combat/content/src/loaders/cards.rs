//! Card catalog loader.

use std::path::Path;

use combat_core::ActionCard;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::tables::CardTable;

/// Card catalog structure for RON files.
///
/// ```ron
/// (
///     cards: [
///         (id: "slash", name: "Slash", cost: 1, damage: Some(15)),
///         (id: "ember", name: "Ember", cost: 2, damage: Some(6), fire_damage: Some(4)),
///     ],
/// )
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardCatalog {
    pub cards: Vec<ActionCard>,
}

pub struct CardLoader;

impl CardLoader {
    pub fn load(path: &Path) -> LoadResult<CardTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CardTable> {
        let catalog: CardCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse card catalog RON: {}", e))?;
        Ok(CardTable::new(catalog.cards))
    }
}
