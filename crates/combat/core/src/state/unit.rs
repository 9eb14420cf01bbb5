//! Units taking part in an encounter.
//!
//! A [`Unit`] carries everything the rules read or mutate: hp, combat stats,
//! the action point budget, transient defense, and status effects. Role
//! specific data (a hero's deck, an enemy's archetype) lives in [`UnitRole`].

use std::collections::BTreeMap;

use strum::{Display, EnumString};

use super::{AbilityId, CardId, ItemId, Stat, StatusEffects, UnitId, UnitStats};
use crate::ai::Archetype;

/// Which side of the encounter a unit fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Hero,
    Enemy,
}

/// Equipment slot names. Equipment decides which cards a hero owns; the
/// combat rules never read it directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroProfile {
    /// Ordered deck; the same card may appear several times.
    pub deck: Vec<CardId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: BTreeMap<EquipmentSlot, ItemId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyProfile {
    pub archetype: Archetype,
    /// Unlocked abilities, in the order the Tactical policy considers them.
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitRole {
    Hero(HeroProfile),
    Enemy(EnemyProfile),
}

/// A combat participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,

    pub hp: u32,
    pub max_hp: u32,
    pub attack: i32,
    pub defense: i32,
    pub magic: Option<i32>,
    pub crit_chance: u8,
    pub speed: i32,

    /// Consumed by the next incoming hit.
    pub temporary_defense: i32,

    pub action_points: u32,
    pub max_action_points: u32,

    pub statuses: StatusEffects,
    pub role: UnitRole,

    dead: bool,
}

impl Unit {
    /// Creates a unit at full hp and full action points.
    pub fn new(id: UnitId, name: impl Into<String>, stats: UnitStats, role: UnitRole) -> Self {
        Self {
            id,
            name: name.into(),
            hp: stats.max_hp,
            max_hp: stats.max_hp,
            attack: stats.attack,
            defense: stats.defense,
            magic: stats.magic,
            crit_chance: stats.crit_chance,
            speed: stats.speed,
            temporary_defense: 0,
            action_points: stats.max_action_points,
            max_action_points: stats.max_action_points,
            statuses: StatusEffects::empty(),
            role,
            dead: stats.max_hp == 0,
        }
    }

    pub fn hero(id: UnitId, name: impl Into<String>, stats: UnitStats, deck: Vec<CardId>) -> Self {
        Self::new(
            id,
            name,
            stats,
            UnitRole::Hero(HeroProfile {
                deck,
                equipment: BTreeMap::new(),
            }),
        )
    }

    pub fn enemy(
        id: UnitId,
        name: impl Into<String>,
        stats: UnitStats,
        archetype: Archetype,
        abilities: Vec<AbilityId>,
    ) -> Self {
        Self::new(
            id,
            name,
            stats,
            UnitRole::Enemy(EnemyProfile {
                archetype,
                abilities,
            }),
        )
    }

    /// Sets current hp (clamped to max). A unit entering at 0 hp is dead.
    pub fn with_hp(mut self, hp: u32) -> Self {
        self.hp = hp.min(self.max_hp);
        self.dead = self.hp == 0;
        self
    }

    pub fn side(&self) -> Side {
        match self.role {
            UnitRole::Hero(_) => Side::Hero,
            UnitRole::Enemy(_) => Side::Enemy,
        }
    }

    pub fn is_hero(&self) -> bool {
        self.side() == Side::Hero
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Marks the unit dead. Irreversible for the encounter.
    pub fn kill(&mut self) {
        self.dead = true;
    }

    // ========================================================================
    // Hit points
    // ========================================================================

    /// Removes up to `amount` hp (floored at zero) and returns what was lost.
    /// Reaching zero kills the unit.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.hp);
        self.hp -= actual;
        if self.hp == 0 {
            self.dead = true;
        }
        actual
    }

    /// Restores up to `amount` hp (capped at max) and returns what was gained.
    /// Dead units cannot be healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.dead {
            return 0;
        }
        let actual = amount.min(self.max_hp.saturating_sub(self.hp));
        self.hp += actual;
        actual
    }

    /// True when `hp / max_hp < percent / 100`.
    pub fn hp_below_percent(&self, percent: u32) -> bool {
        u64::from(self.hp) * 100 < u64::from(self.max_hp) * u64::from(percent)
    }

    /// True when `hp / max_hp > percent / 100`.
    pub fn hp_above_percent(&self, percent: u32) -> bool {
        u64::from(self.hp) * 100 > u64::from(self.max_hp) * u64::from(percent)
    }

    pub fn is_wounded(&self) -> bool {
        self.hp < self.max_hp
    }

    // ========================================================================
    // Action points
    // ========================================================================

    /// Refills action points at the start of the unit's own turn.
    pub fn refill_action_points(&mut self) {
        self.action_points = self.max_action_points;
    }

    /// Adds action points (capped at max) and returns what was gained.
    pub fn restore_action_points(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.max_action_points.saturating_sub(self.action_points));
        self.action_points += actual;
        actual
    }

    /// Spends `cost` action points; fails without side effects if short.
    pub fn spend_action_points(&mut self, cost: u32) -> bool {
        match self.action_points.checked_sub(cost) {
            Some(left) => {
                self.action_points = left;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Stats
    // ========================================================================

    /// Applies a permanent stat delta for the rest of the encounter.
    pub fn apply_stat_delta(&mut self, stat: Stat, delta: i32) {
        match stat {
            Stat::Attack => self.attack = self.attack.saturating_add(delta),
            Stat::Defense => self.defense = self.defense.saturating_add(delta),
            Stat::Magic => {
                let magic = self.magic.get_or_insert(0);
                *magic = magic.saturating_add(delta);
            }
            Stat::CritChance => {
                self.crit_chance = (i32::from(self.crit_chance) + delta).clamp(0, 100) as u8;
            }
            Stat::Speed => self.speed = self.speed.saturating_add(delta),
            Stat::MaxHp => {
                self.max_hp = self.max_hp.saturating_add_signed(delta);
                self.hp = self.hp.min(self.max_hp);
            }
            Stat::MaxActionPoints => {
                self.max_action_points = self.max_action_points.saturating_add_signed(delta);
                self.action_points = self.action_points.min(self.max_action_points);
            }
        }
    }

    // ========================================================================
    // Role data
    // ========================================================================

    pub fn deck(&self) -> Option<&[CardId]> {
        match &self.role {
            UnitRole::Hero(profile) => Some(&profile.deck),
            UnitRole::Enemy(_) => None,
        }
    }

    pub fn deck_mut(&mut self) -> Option<&mut Vec<CardId>> {
        match &mut self.role {
            UnitRole::Hero(profile) => Some(&mut profile.deck),
            UnitRole::Enemy(_) => None,
        }
    }

    /// Returns true if the unit's deck holds at least one copy of `card`.
    pub fn holds_card(&self, card: &CardId) -> bool {
        self.deck().is_some_and(|deck| deck.contains(card))
    }

    pub fn archetype(&self) -> Option<Archetype> {
        match &self.role {
            UnitRole::Enemy(profile) => Some(profile.archetype),
            UnitRole::Hero(_) => None,
        }
    }

    pub fn abilities(&self) -> &[AbilityId] {
        match &self.role {
            UnitRole::Enemy(profile) => &profile.abilities,
            UnitRole::Hero(_) => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knight() -> Unit {
        Unit::hero(UnitId(1), "Knight", UnitStats::new(40, 20, 5), Vec::new())
    }

    #[test]
    fn damage_floors_at_zero_and_kills() {
        let mut unit = knight();
        assert_eq!(unit.take_damage(55), 40);
        assert_eq!(unit.hp, 0);
        assert!(unit.is_dead());
    }

    #[test]
    fn dead_units_stay_dead() {
        let mut unit = knight();
        unit.take_damage(40);
        assert_eq!(unit.heal(10), 0);
        assert!(unit.is_dead());
    }

    #[test]
    fn heal_caps_at_max() {
        let mut unit = knight().with_hp(35);
        assert_eq!(unit.heal(20), 5);
        assert_eq!(unit.hp, 40);
    }

    #[test]
    fn hp_thresholds_are_strict() {
        let unit = knight().with_hp(20);
        assert!(!unit.hp_below_percent(50));
        assert!(!unit.hp_above_percent(50));
        assert!(unit.hp_below_percent(51));
    }

    #[test]
    fn spending_more_than_available_is_rejected() {
        let mut unit = knight();
        assert!(!unit.spend_action_points(4));
        assert_eq!(unit.action_points, 3);
        assert!(unit.spend_action_points(3));
        assert_eq!(unit.action_points, 0);
    }

    #[test]
    fn lowering_max_hp_clamps_current() {
        let mut unit = knight();
        unit.apply_stat_delta(Stat::MaxHp, -15);
        assert_eq!(unit.max_hp, 25);
        assert_eq!(unit.hp, 25);
    }
}
