//! Combat tuning loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads a [`CombatConfig`] from TOML. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        let config: CombatConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse combat config TOML: {}", e))?;
        if config.attack_divisor <= 0 {
            anyhow::bail!("attack_divisor must be positive, got {}", config.attack_divisor);
        }
        Ok(config)
    }
}
