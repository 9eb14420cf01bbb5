//! Action card definitions.
//!
//! A card is a fixed struct of optional facets. Any combination may be
//! present on one card and [`CardFacets`] reports which ones are.

use bitflags::bitflags;

use super::CardError;
use crate::state::{CardId, ItemId, Stat, StatusEffectKind};

bitflags! {
    /// Effect facets populated on a card.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct CardFacets: u8 {
        const DAMAGE     = 1 << 0;
        const HEAL       = 1 << 1;
        const RESTORE    = 1 << 2;
        const DEFENSE    = 1 << 3;
        const STAT_BUFF  = 1 << 4;
        const DOT        = 1 << 5;
        const CLEANSE    = 1 << 6;
        const CONSUMABLE = 1 << 7;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatDelta {
    pub stat: Stat,
    pub delta: i32,
}

/// Stat changes applied to the card's source.
///
/// `duration` is carried but not enforced: deltas last for the rest of the
/// encounter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBuff {
    pub deltas: Vec<StatDelta>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOverTime {
    pub amount: i32,
    pub duration: u32,
    #[cfg_attr(feature = "serde", serde(default = "default_dot_kind"))]
    pub kind: StatusEffectKind,
}

#[cfg(feature = "serde")]
fn default_dot_kind() -> StatusEffectKind {
    StatusEffectKind::Poison
}

impl DamageOverTime {
    pub fn poison(amount: i32, duration: u32) -> Self {
        Self {
            amount,
            duration,
            kind: StatusEffectKind::Poison,
        }
    }

    pub fn burn(amount: i32, duration: u32) -> Self {
        Self {
            amount,
            duration,
            kind: StatusEffectKind::Burn,
        }
    }
}

/// Marks a card as single-use. Playing it removes one copy from the deck and
/// one unit of the linked inventory item, if any.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Consumable {
    #[cfg_attr(feature = "serde", serde(default))]
    pub linked_item: Option<ItemId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionCard {
    pub id: CardId,
    pub name: String,
    /// Action points spent before resolution. Never refunded.
    pub cost: u32,

    pub damage: Option<i32>,
    /// Added to `damage` before mitigation. Ignored without `damage`.
    pub fire_damage: Option<i32>,
    /// Added to `damage` before mitigation. Ignored without `damage`.
    pub holy_damage: Option<i32>,
    pub heal: Option<u32>,
    pub restore_action_points: Option<u32>,
    pub defense_bonus: Option<i32>,
    pub stat_buff: Option<StatBuff>,
    pub dot: Option<DamageOverTime>,
    pub cleanse_all: bool,

    pub targets_self: bool,
    pub area_of_effect: bool,
    pub consumable: Option<Consumable>,
}

impl ActionCard {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: u32) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            cost,
            ..Self::default()
        }
    }

    pub fn with_damage(mut self, amount: i32) -> Self {
        self.damage = Some(amount);
        self
    }

    pub fn with_fire_damage(mut self, amount: i32) -> Self {
        self.fire_damage = Some(amount);
        self
    }

    pub fn with_holy_damage(mut self, amount: i32) -> Self {
        self.holy_damage = Some(amount);
        self
    }

    pub fn with_heal(mut self, amount: u32) -> Self {
        self.heal = Some(amount);
        self
    }

    pub fn with_restore(mut self, amount: u32) -> Self {
        self.restore_action_points = Some(amount);
        self
    }

    pub fn with_defense_bonus(mut self, bonus: i32) -> Self {
        self.defense_bonus = Some(bonus);
        self
    }

    pub fn with_stat_buff(mut self, buff: StatBuff) -> Self {
        self.stat_buff = Some(buff);
        self
    }

    pub fn with_dot(mut self, dot: DamageOverTime) -> Self {
        self.dot = Some(dot);
        self
    }

    pub fn cleansing(mut self) -> Self {
        self.cleanse_all = true;
        self
    }

    pub fn self_targeted(mut self) -> Self {
        self.targets_self = true;
        self
    }

    pub fn area(mut self) -> Self {
        self.area_of_effect = true;
        self
    }

    pub fn consumable(mut self, linked_item: Option<ItemId>) -> Self {
        self.consumable = Some(Consumable { linked_item });
        self
    }

    /// Total base damage including elemental bonuses, if the card deals damage.
    pub fn base_damage(&self) -> Option<i32> {
        self.damage.map(|damage| {
            damage
                .saturating_add(self.fire_damage.unwrap_or(0))
                .saturating_add(self.holy_damage.unwrap_or(0))
        })
    }

    pub fn facets(&self) -> CardFacets {
        let mut facets = CardFacets::empty();
        facets.set(CardFacets::DAMAGE, self.damage.is_some());
        facets.set(CardFacets::HEAL, self.heal.is_some());
        facets.set(CardFacets::RESTORE, self.restore_action_points.is_some());
        facets.set(CardFacets::DEFENSE, self.defense_bonus.is_some());
        facets.set(
            CardFacets::STAT_BUFF,
            self.stat_buff.as_ref().is_some_and(|buff| !buff.deltas.is_empty()),
        );
        facets.set(CardFacets::DOT, self.dot.is_some());
        facets.set(CardFacets::CLEANSE, self.cleanse_all);
        facets.set(CardFacets::CONSUMABLE, self.consumable.is_some());
        facets
    }

    /// # Errors
    ///
    /// Returns `CardError::EmptyCard` if no facet is populated.
    pub fn validate(&self) -> Result<(), CardError> {
        if self.facets().is_empty() {
            return Err(CardError::EmptyCard {
                card: self.id.clone(),
            });
        }
        Ok(())
    }
}
