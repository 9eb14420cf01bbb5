use crate::state::{StatusEffectKind, UnitId};

/// A decided enemy action. Deciding never mutates; the session applies it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnemyAction {
    /// `damage` is the base amount before the target's defense.
    Attack {
        source: UnitId,
        target: UnitId,
        damage: i32,
    },
    Heal {
        source: UnitId,
        target: UnitId,
        amount: u32,
    },
    Debuff {
        source: UnitId,
        target: UnitId,
        kind: StatusEffectKind,
        duration: u32,
        magnitude: i32,
    },
    /// Gain temporary defense.
    Defend { source: UnitId, bonus: i32 },
}

impl EnemyAction {
    pub const fn source(&self) -> UnitId {
        match self {
            Self::Attack { source, .. }
            | Self::Heal { source, .. }
            | Self::Debuff { source, .. }
            | Self::Defend { source, .. } => *source,
        }
    }

    /// The unit the action lands on. Defend lands on its source.
    pub const fn target(&self) -> UnitId {
        match self {
            Self::Attack { target, .. }
            | Self::Heal { target, .. }
            | Self::Debuff { target, .. } => *target,
            Self::Defend { source, .. } => *source,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Attack { .. } => "attack",
            Self::Heal { .. } => "heal",
            Self::Debuff { .. } => "debuff",
            Self::Defend { .. } => "defend",
        }
    }
}
