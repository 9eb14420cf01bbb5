//! Combat notifications and the sink they are emitted into.
//!
//! Notifications are emitted synchronously with the mutation that caused
//! them. Rule code never owns a channel; it receives a `&mut dyn EventSink`
//! for the duration of one step and the caller decides where events go.

use strum::Display;

use crate::state::{CardId, Side, StatusEffectKind, UnitId};

/// Presentation hint carried by [`CombatEvent::ShowMessage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Danger,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    /// The scheduler wrapped around and a new round began.
    RoundStart { round: u32 },

    /// A participant became active.
    TurnStart { unit: UnitId, side: Side, round: u32 },

    /// Emitted after every hp mutation. Heals carry a negative amount.
    DamageTaken {
        target: UnitId,
        amount: i32,
        current_hp: u32,
    },

    /// Action points restored by a card.
    ResourceRestored {
        unit: UnitId,
        amount: u32,
        current: u32,
    },

    StatusApplied {
        unit: UnitId,
        kind: StatusEffectKind,
        duration: u32,
        magnitude: i32,
    },

    StatusExpired {
        unit: UnitId,
        kind: StatusEffectKind,
    },

    /// Every status on the unit was removed at once.
    StatusCleared { unit: UnitId, removed: usize },

    /// A card is about to resolve.
    CardPlayed {
        card: CardId,
        source: UnitId,
        target: UnitId,
    },

    UnitDefeated { unit: UnitId },

    /// Terminal notification, emitted once per encounter.
    CombatEnd { victory: bool },

    /// Human-readable narration; informational only.
    ShowMessage { text: String, kind: MessageKind },
}

impl CombatEvent {
    pub fn message(text: impl Into<String>, kind: MessageKind) -> Self {
        Self::ShowMessage {
            text: text.into(),
            kind,
        }
    }

    /// Short stable name, used as a log field.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RoundStart { .. } => "round_start",
            Self::TurnStart { .. } => "turn_start",
            Self::DamageTaken { .. } => "damage_taken",
            Self::ResourceRestored { .. } => "resource_restored",
            Self::StatusApplied { .. } => "status_applied",
            Self::StatusExpired { .. } => "status_expired",
            Self::StatusCleared { .. } => "status_cleared",
            Self::CardPlayed { .. } => "card_played",
            Self::UnitDefeated { .. } => "unit_defeated",
            Self::CombatEnd { .. } => "combat_end",
            Self::ShowMessage { .. } => "show_message",
        }
    }
}

/// Receiver of combat notifications.
pub trait EventSink {
    fn emit(&mut self, event: CombatEvent);
}

/// Collects events in emission order.
impl EventSink for Vec<CombatEvent> {
    fn emit(&mut self, event: CombatEvent) {
        self.push(event);
    }
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: CombatEvent) {}
}
