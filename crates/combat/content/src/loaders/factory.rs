//! Content factory for loading every table from one directory.

use std::path::{Path, PathBuf};

use combat_core::{CombatConfig, Roster};
use tracing::info;

use crate::loaders::{
    AbilityLoader, CardLoader, ConfigLoader, EnemyLoader, HeroLoader, LoadResult,
};
use crate::tables::{AbilityTable, CardTable, EnemyTemplates, PartySpec};

/// First unit id handed to heroes; enemies start at [`ContentFactory::FIRST_ENEMY_ID`].
const FIRST_HERO_ID: u32 = 1;

/// Loads combat content from a data directory.
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── cards.ron
/// ├── abilities.ron
/// ├── enemies.ron
/// └── heroes.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

/// Every table an encounter needs.
#[derive(Clone, Debug)]
pub struct ContentBundle {
    pub config: CombatConfig,
    pub cards: CardTable,
    pub abilities: AbilityTable,
    pub enemies: EnemyTemplates,
    pub party: PartySpec,
}

impl ContentBundle {
    /// Builds a fresh roster: the party against the listed enemy templates.
    pub fn roster<'a>(&self, enemy_templates: impl IntoIterator<Item = &'a str>) -> Roster {
        Roster::new(
            self.party.heroes(FIRST_HERO_ID),
            self.enemies.spawn(enemy_templates, ContentFactory::FIRST_ENEMY_ID),
        )
        .with_inventory(self.party.inventory())
    }
}

impl ContentFactory {
    pub const FIRST_ENEMY_ID: u32 = 100;

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Loads `combat.toml`, or defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    pub fn load_cards(&self) -> LoadResult<CardTable> {
        CardLoader::load(&self.data_dir.join("cards.ron"))
    }

    pub fn load_abilities(&self) -> LoadResult<AbilityTable> {
        AbilityLoader::load(&self.data_dir.join("abilities.ron"))
    }

    pub fn load_enemies(&self) -> LoadResult<EnemyTemplates> {
        EnemyLoader::load(&self.data_dir.join("enemies.ron"))
    }

    pub fn load_party(&self) -> LoadResult<PartySpec> {
        HeroLoader::load(&self.data_dir.join("heroes.ron"))
    }

    pub fn load_all(&self) -> LoadResult<ContentBundle> {
        let bundle = ContentBundle {
            config: self.load_config()?,
            cards: self.load_cards()?,
            abilities: self.load_abilities()?,
            enemies: self.load_enemies()?,
            party: self.load_party()?,
        };
        info!(
            target: "combat::content",
            dir = %self.data_dir.display(),
            cards = bundle.cards.len(),
            abilities = bundle.abilities.len(),
            heroes = bundle.party.heroes.len(),
            "content loaded"
        );
        Ok(bundle)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let factory = ContentFactory::new(dir.path());
        assert_eq!(factory.load_config().expect("defaults"), CombatConfig::default());
    }

    #[test]
    fn missing_cards_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(ContentFactory::new(dir.path()).load_cards().is_err());
    }
}
