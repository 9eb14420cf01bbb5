//! Topic-based event bus for encounter notifications.
//!
//! Combat notifications come straight from the session; the runtime adds a
//! few lifecycle events of its own (an enemy starting to "think", a pending
//! action being cancelled, an explicit exit). Consumers subscribe only to
//! the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::EncounterEvent;
