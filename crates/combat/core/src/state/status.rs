//! Status effects carried by units.
//!
//! Status effects are timed conditions that deal periodic damage, prevent a
//! unit from acting, or modify its stats.
//!
//! # Turn-based Duration
//!
//! Each instance stores `remaining` owner turns. The counter is decremented
//! once per turn-start of the unit that carries it and the instance is dropped
//! when it reaches zero.
//!
//! # Overwrite semantics
//!
//! A unit holds at most one instance of each kind. Re-applying a kind replaces
//! both its duration and magnitude; nothing stacks.

use arrayvec::ArrayVec;
use strum::{Display, EnumCount, EnumIter, EnumString};

use crate::config::CombatConfig;

/// Types of status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    EnumCount,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusEffectKind {
    // ========================================================================
    // Damage over time
    // ========================================================================
    /// Fire damage every turn start.
    Burn,

    /// Toxic damage every turn start.
    Poison,

    // ========================================================================
    // Crowd Control (restricts actions)
    // ========================================================================
    /// Cannot act.
    Freeze,

    /// Cannot act.
    Stun,

    /// Slowed down. Informational, the fixed turn order ignores speed.
    Slow,

    // ========================================================================
    // Buffs
    // ========================================================================
    /// Blessed; magnitude is a stat delta.
    Bless,

    /// Protected; magnitude is a stat delta.
    Protect,

    /// Hidden from enemies.
    Invisible,
}

impl StatusEffectKind {
    /// Returns true if this status skips the owner's turn.
    pub const fn prevents_action(self) -> bool {
        matches!(self, Self::Freeze | Self::Stun)
    }

    /// Returns true if this status deals damage at turn start.
    pub const fn is_periodic_damage(self) -> bool {
        matches!(self, Self::Burn | Self::Poison)
    }
}

/// A single status effect instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    /// Owner turns left before expiry.
    pub remaining: u32,
    /// Damage per turn for Burn/Poison, stat delta for Bless/Protect.
    pub magnitude: i32,
}

/// Active status effects on a unit, at most one per kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

// One slot per kind is always enough.
const _: () = assert!(StatusEffectKind::COUNT <= CombatConfig::MAX_STATUS_EFFECTS);

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Inserts or overwrites the instance of `kind`.
    ///
    /// Returns the previous instance if one existed. A zero duration would
    /// expire before it is ever observed, so it is ignored.
    pub fn upsert(
        &mut self,
        kind: StatusEffectKind,
        duration: u32,
        magnitude: i32,
    ) -> Option<StatusEffect> {
        if duration == 0 {
            return None;
        }

        let effect = StatusEffect {
            kind,
            remaining: duration,
            magnitude,
        };

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == kind) {
            return Some(core::mem::replace(existing, effect));
        }

        self.effects.push(effect);
        None
    }

    /// Returns the instance of `kind`, if present.
    pub fn get(&self, kind: StatusEffectKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusEffectKind) -> bool {
        self.get(kind).is_some()
    }

    /// Removes every effect and returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let removed = self.effects.len();
        self.effects.clear();
        removed
    }

    /// Decrements every duration by one and drops the ones that reach zero.
    ///
    /// Returns the kinds that expired, in insertion order.
    pub fn tick(&mut self) -> Vec<StatusEffectKind> {
        let mut expired = Vec::new();
        for effect in self.effects.iter_mut() {
            effect.remaining = effect.remaining.saturating_sub(1);
            if effect.remaining == 0 {
                expired.push(effect.kind);
            }
        }
        self.effects.retain(|e| e.remaining > 0);
        expired
    }

    /// Returns an iterator over all active effects.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Returns true if no status effects are active.
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reapplying_overwrites_instead_of_stacking() {
        let mut effects = StatusEffects::empty();
        effects.upsert(StatusEffectKind::Burn, 3, 5);
        let previous = effects.upsert(StatusEffectKind::Burn, 2, 8);

        assert_eq!(previous.map(|e| e.magnitude), Some(5));
        assert_eq!(effects.len(), 1);
        assert_eq!(
            effects.get(StatusEffectKind::Burn),
            Some(&StatusEffect {
                kind: StatusEffectKind::Burn,
                remaining: 2,
                magnitude: 8,
            })
        );
    }

    #[test]
    fn tick_expires_exactly_after_duration() {
        let mut effects = StatusEffects::empty();
        effects.upsert(StatusEffectKind::Stun, 2, 0);

        assert!(effects.tick().is_empty());
        assert!(effects.has(StatusEffectKind::Stun));

        assert_eq!(effects.tick(), vec![StatusEffectKind::Stun]);
        assert!(effects.is_empty());
    }

    #[test]
    fn zero_duration_is_ignored() {
        let mut effects = StatusEffects::empty();
        assert_eq!(effects.upsert(StatusEffectKind::Freeze, 0, 0), None);
        assert!(effects.is_empty());
    }

    #[test]
    fn every_kind_fits() {
        use strum::IntoEnumIterator;

        let mut effects = StatusEffects::empty();
        for kind in StatusEffectKind::iter() {
            effects.upsert(kind, 1, 1);
        }
        assert_eq!(effects.len(), StatusEffectKind::COUNT);
    }
}
