use crate::event::EventSink;
use crate::state::{StatusEffectKind, Unit};

/// Reaction to a status landing on a unit that already carries others
/// (e.g. Burn on a Frozen unit). Rules run in registration order after every
/// successful application.
pub trait ComboRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn on_apply(&self, unit: &mut Unit, applied: StatusEffectKind, sink: &mut dyn EventSink);
}
