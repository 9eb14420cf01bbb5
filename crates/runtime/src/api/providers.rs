//! Asynchronous abstraction for sourcing hero intent.
//!
//! Runtime users plug in [`HeroCommandProvider`] implementations so an
//! encounter can run with human input, scripted fixtures, or a simple
//! autopilot.
use std::sync::Arc;

use async_trait::async_trait;
use combat_core::{CardId, CardOracle, SessionView, Side, UnitId};

use super::errors::Result;

/// One step of a hero's turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeroCommand {
    Play { card: CardId, target: UnitId },
    Pass,
}

/// Trait for choosing the active hero's next command.
///
/// Called repeatedly during one hero turn, with a fresh snapshot after every
/// played card, until it returns [`HeroCommand::Pass`].
#[async_trait]
pub trait HeroCommandProvider: Send + Sync {
    async fn next_command(&self, hero: UnitId, view: &SessionView) -> Result<HeroCommand>;
}

/// Plays the first affordable useful card in deck order, then passes.
///
/// Damaging cards go to the first living enemy. Healing cards go to the most
/// wounded living hero, and only when someone is wounded. Self-targeted
/// cards are played on the hero itself. Anything else is skipped.
pub struct AutopilotProvider {
    cards: Arc<dyn CardOracle>,
}

impl AutopilotProvider {
    pub fn new(cards: Arc<dyn CardOracle>) -> Self {
        Self { cards }
    }

    fn choose(&self, hero: UnitId, view: &SessionView) -> Option<HeroCommand> {
        let me = view.unit(hero)?;
        let first_enemy = view
            .units
            .iter()
            .find(|unit| unit.side == Side::Enemy && !unit.dead)?;
        let most_wounded = view
            .units
            .iter()
            .filter(|unit| unit.side == Side::Hero && !unit.dead && unit.hp < unit.max_hp)
            .min_by_key(|unit| u64::from(unit.hp) * 100 / u64::from(unit.max_hp.max(1)));

        me.deck.iter().find_map(|id| {
            let card = self.cards.card(id)?;
            if card.cost > me.action_points {
                return None;
            }
            let target = if card.damage.is_some() || card.dot.is_some() {
                first_enemy.id
            } else if card.heal.is_some() {
                most_wounded?.id
            } else if card.targets_self {
                hero
            } else {
                return None;
            };
            Some(HeroCommand::Play {
                card: id.clone(),
                target,
            })
        })
    }
}

#[async_trait]
impl HeroCommandProvider for AutopilotProvider {
    async fn next_command(&self, hero: UnitId, view: &SessionView) -> Result<HeroCommand> {
        Ok(self.choose(hero, view).unwrap_or(HeroCommand::Pass))
    }
}

/// Always passes. Useful for testing enemy behavior in isolation.
pub struct PassProvider;

#[async_trait]
impl HeroCommandProvider for PassProvider {
    async fn next_command(&self, _hero: UnitId, _view: &SessionView) -> Result<HeroCommand> {
        Ok(HeroCommand::Pass)
    }
}
