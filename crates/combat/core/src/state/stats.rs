//! Unit stat vocabulary.

use strum::{Display, EnumIter, EnumString};

/// A stat that card buffs can modify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Stat {
    Attack,
    Defense,
    Magic,
    CritChance,
    Speed,
    MaxHp,
    MaxActionPoints,
}

/// Starting stat block used to build a [`crate::Unit`].
///
/// Units always enter an encounter at full hp and full action points unless
/// the roster says otherwise (see [`crate::Unit::with_hp`]).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitStats {
    pub max_hp: u32,
    pub attack: i32,
    pub defense: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub magic: Option<i32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub crit_chance: u8,
    /// Carried for content parity; the scheduler never reads it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: i32,
    #[cfg_attr(feature = "serde", serde(default = "default_action_points"))]
    pub max_action_points: u32,
}

#[cfg(feature = "serde")]
fn default_action_points() -> u32 {
    UnitStats::DEFAULT_ACTION_POINTS
}

impl UnitStats {
    pub const DEFAULT_ACTION_POINTS: u32 = 3;

    pub fn new(max_hp: u32, attack: i32, defense: i32) -> Self {
        Self {
            max_hp,
            attack,
            defense,
            magic: None,
            crit_chance: 0,
            speed: 0,
            max_action_points: Self::DEFAULT_ACTION_POINTS,
        }
    }

    pub fn with_action_points(mut self, max_action_points: u32) -> Self {
        self.max_action_points = max_action_points;
        self
    }

    pub fn with_magic(mut self, magic: i32) -> Self {
        self.magic = Some(magic);
        self
    }
}
