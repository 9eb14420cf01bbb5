//! Content oracles shared by the encounter worker.
//!
//! The tables are immutable while an encounter runs; the manager only holds
//! shared references and builds a [`CombatEnv`] on demand.
use std::sync::Arc;

use combat_core::{AbilityOracle, CardOracle, CombatEnv, Env, PcgRng, RngOracle};

/// Bundles the card table, the ability table and the roll source.
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) cards: Arc<dyn CardOracle>,
    pub(crate) abilities: Arc<dyn AbilityOracle>,
    pub(crate) rng: Arc<dyn RngOracle>,
}

impl OracleManager {
    pub fn new(cards: Arc<dyn CardOracle>, abilities: Arc<dyn AbilityOracle>) -> Self {
        Self {
            cards,
            abilities,
            rng: Arc::new(PcgRng),
        }
    }

    /// Replaces the default PCG roll source.
    pub fn with_rng(mut self, rng: Arc<dyn RngOracle>) -> Self {
        self.rng = rng;
        self
    }

    pub fn as_combat_env(&self) -> CombatEnv<'_> {
        Env::with_all(self.cards.as_ref(), self.abilities.as_ref(), self.rng.as_ref())
    }

    pub fn cards(&self) -> &Arc<dyn CardOracle> {
        &self.cards
    }
}
