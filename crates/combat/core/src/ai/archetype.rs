use strum::{Display, EnumIter, EnumString};

/// An enemy's fixed behavior category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Archetype {
    /// Attacks the first living hero.
    Aggressive,
    /// Attacks the hero with the lowest current hp.
    Sniper,
    /// Heals badly wounded allies, otherwise Aggressive.
    Healer,
    /// Aggressive, hitting harder as its own hp drops.
    Berserker,
    /// Aggressive while healthy, sometimes defends when wounded.
    Defensive,
    /// Uses the first usable unlocked ability, otherwise Sniper.
    Tactical,
}
