//! Party loader.

use std::path::Path;

use crate::loaders::{LoadResult, read_file};
use crate::tables::PartySpec;

pub struct HeroLoader;

impl HeroLoader {
    /// Loads the party from a RON file holding a [`PartySpec`].
    pub fn load(path: &Path) -> LoadResult<PartySpec> {
        let content = read_file(path)?;
        let party: PartySpec = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse party RON: {}", e))?;
        if party.heroes.is_empty() {
            anyhow::bail!("party file {} lists no heroes", path.display());
        }
        Ok(party)
    }
}
