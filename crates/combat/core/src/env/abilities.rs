//! Enemy ability definitions.
//!
//! Abilities form a closed vocabulary. The Tactical archetype walks an
//! enemy's unlocked abilities in order and uses the first one whose
//! precondition holds; every other archetype ignores them except Healer,
//! which needs a heal-capable ability before it will heal.

use crate::state::{AbilityId, StatusEffectKind};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ability {
    pub id: AbilityId,
    pub name: String,
    pub kind: AbilityKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AbilityKind {
    /// Plain attack. Tactical treats it as a marker and skips it.
    BasicAttack,
    /// Attack the weakest hero for `percent`% of own attack.
    PowerStrike { percent: u32 },
    /// Restore `amount` hp to the most wounded ally.
    Heal { amount: u32 },
    /// Apply a status to a hero that does not already carry it.
    Debuff {
        kind: StatusEffectKind,
        duration: u32,
        magnitude: i32,
    },
    /// Gain temporary defense while wounded.
    Guard { bonus: i32 },
}

impl AbilityKind {
    pub const fn is_basic_attack(&self) -> bool {
        matches!(self, Self::BasicAttack)
    }

    pub const fn heal_amount(&self) -> Option<u32> {
        match self {
            Self::Heal { amount } => Some(*amount),
            _ => None,
        }
    }
}

/// Read access to the ability table.
pub trait AbilityOracle: Send + Sync {
    fn ability(&self, id: &AbilityId) -> Option<Ability>;
}
