//! Topic-based event bus implementation.

use std::sync::Arc;

use combat_core::{CombatEvent, EventSink};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::EncounterEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Round and turn starts
    Turn,
    /// Rule outcomes: damage, statuses, cards, defeats, combat end
    Combat,
    /// Human-readable `ShowMessage` narration
    Narration,
    /// Worker lifecycle: deferred actions, cancellation, exit
    Lifecycle,
}

impl Topic {
    pub const ALL: [Topic; 4] = [Topic::Turn, Topic::Combat, Topic::Narration, Topic::Lifecycle];

    const fn index(self) -> usize {
        match self {
            Topic::Turn => 0,
            Topic::Combat => 1,
            Topic::Narration => 2,
            Topic::Lifecycle => 3,
        }
    }
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Combat(CombatEvent),
    Encounter(EncounterEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Combat(CombatEvent::RoundStart { .. } | CombatEvent::TurnStart { .. }) => {
                Topic::Turn
            }
            Event::Combat(CombatEvent::ShowMessage { .. }) => Topic::Narration,
            Event::Combat(_) => Topic::Combat,
            Event::Encounter(_) => Topic::Lifecycle,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; slow subscribers lag.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<[broadcast::Sender<Event>; 4]>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Topic::ALL.map(|_| broadcast::channel(capacity).0)),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels[topic.index()].send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels[topic.index()].subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// The session emits straight onto the bus.
impl EventSink for EventBus {
    fn emit(&mut self, event: CombatEvent) {
        self.publish(Event::Combat(event));
    }
}
