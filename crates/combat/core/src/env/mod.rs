//! Read-only content and randomness the rules consult.
//!
//! Oracles expose the card table, the enemy ability table and deterministic
//! rolls. [`Env`] bundles them so rule code can reach everything it needs
//! without depending on where the content came from.
mod abilities;
mod cards;
mod error;
mod rng;

pub use abilities::{Ability, AbilityKind, AbilityOracle};
pub use cards::CardOracle;
pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, compute_seed, roll_context};

/// Aggregates the oracles a session step may consult.
#[derive(Debug)]
pub struct Env<'a, C, A, R>
where
    C: CardOracle + ?Sized,
    A: AbilityOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    cards: Option<&'a C>,
    abilities: Option<&'a A>,
    rng: Option<&'a R>,
}

pub type CombatEnv<'a> = Env<'a, dyn CardOracle + 'a, dyn AbilityOracle + 'a, dyn RngOracle + 'a>;

// Manual impls: derives would demand `C: Clone`, which trait objects are not.
impl<C, A, R> Clone for Env<'_, C, A, R>
where
    C: CardOracle + ?Sized,
    A: AbilityOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<C, A, R> Copy for Env<'_, C, A, R>
where
    C: CardOracle + ?Sized,
    A: AbilityOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

impl<'a, C, A, R> Env<'a, C, A, R>
where
    C: CardOracle + ?Sized,
    A: AbilityOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(cards: Option<&'a C>, abilities: Option<&'a A>, rng: Option<&'a R>) -> Self {
        Self {
            cards,
            abilities,
            rng,
        }
    }

    pub fn with_all(cards: &'a C, abilities: &'a A, rng: &'a R) -> Self {
        Self::new(Some(cards), Some(abilities), Some(rng))
    }

    pub fn empty() -> Self {
        Self::new(None, None, None)
    }

    /// # Errors
    ///
    /// Returns `OracleError::CardsNotAvailable` if no card oracle was provided.
    pub fn cards(&self) -> Result<&'a C, OracleError> {
        self.cards.ok_or(OracleError::CardsNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::AbilitiesNotAvailable` if no ability oracle was provided.
    pub fn abilities(&self) -> Result<&'a A, OracleError> {
        self.abilities.ok_or(OracleError::AbilitiesNotAvailable)
    }

    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, C, A, R> Env<'a, C, A, R>
where
    C: CardOracle + 'a,
    A: AbilityOracle + 'a,
    R: RngOracle + 'a,
{
    /// Erases the concrete oracle types.
    pub fn as_combat_env(&self) -> CombatEnv<'a> {
        let cards: Option<&'a dyn CardOracle> = self.cards.map(|cards| cards as _);
        let abilities: Option<&'a dyn AbilityOracle> =
            self.abilities.map(|abilities| abilities as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(cards, abilities, rng)
    }
}
