//! Turn-start processing and application of status effects.

use core::fmt;

use tracing::debug;

use super::ComboRule;
use crate::event::{CombatEvent, EventSink};
use crate::state::{Roster, StatusEffectKind, UnitId};

/// Result of processing one unit's turn start.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnStartReport {
    /// False when a Freeze or Stun was active at the start of the turn.
    pub can_act: bool,
    /// Summed Burn/Poison magnitudes. The caller applies it.
    pub periodic_damage: u32,
    /// Kinds that expired during this turn start.
    pub expired: Vec<StatusEffectKind>,
}

/// Applies, ticks and clears status effects on roster units.
///
/// Operations on unknown units or units without statuses are no-ops.
#[derive(Default)]
pub struct StatusEffectEngine {
    combos: Vec<Box<dyn ComboRule>>,
}

impl fmt::Debug for StatusEffectEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusEffectEngine")
            .field("combos", &self.combos.iter().map(|rule| rule.name()).collect::<Vec<_>>())
            .finish()
    }
}

impl StatusEffectEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_combo(mut self, rule: Box<dyn ComboRule>) -> Self {
        self.combos.push(rule);
        self
    }

    pub fn register_combo(&mut self, rule: Box<dyn ComboRule>) {
        self.combos.push(rule);
    }

    /// Upserts `kind` on the unit, overwriting any existing instance.
    ///
    /// Returns false if the unit is unknown or `duration` is zero.
    pub fn apply(
        &self,
        roster: &mut Roster,
        unit: UnitId,
        kind: StatusEffectKind,
        duration: u32,
        magnitude: i32,
        sink: &mut dyn EventSink,
    ) -> bool {
        let Some(target) = roster.unit_mut(unit) else {
            return false;
        };
        if duration == 0 {
            return false;
        }

        let previous = target.statuses.upsert(kind, duration, magnitude);
        debug!(
            target: "combat::status",
            %unit,
            %kind,
            duration,
            magnitude,
            overwritten = previous.is_some(),
            "status applied"
        );
        sink.emit(CombatEvent::StatusApplied {
            unit,
            kind,
            duration,
            magnitude,
        });

        for rule in &self.combos {
            rule.on_apply(target, kind, sink);
        }
        true
    }

    /// Evaluates every active status, then ticks durations.
    ///
    /// Must run exactly once per unit turn start, before the unit chooses an
    /// action.
    pub fn process_turn_start(
        &self,
        roster: &mut Roster,
        unit: UnitId,
        sink: &mut dyn EventSink,
    ) -> TurnStartReport {
        let mut report = TurnStartReport {
            can_act: true,
            ..TurnStartReport::default()
        };
        let Some(target) = roster.unit_mut(unit) else {
            return report;
        };

        for effect in target.statuses.iter() {
            if effect.kind.prevents_action() {
                report.can_act = false;
            }
            if effect.kind.is_periodic_damage() {
                report.periodic_damage += effect.magnitude.max(0).unsigned_abs();
            }
        }

        report.expired = target.statuses.tick();
        for &kind in &report.expired {
            sink.emit(CombatEvent::StatusExpired { unit, kind });
        }
        report
    }

    /// Removes every status from the unit and returns how many were removed.
    pub fn clear(&self, roster: &mut Roster, unit: UnitId, sink: &mut dyn EventSink) -> usize {
        let Some(target) = roster.unit_mut(unit) else {
            return 0;
        };
        let removed = target.statuses.clear();
        if removed > 0 {
            sink.emit(CombatEvent::StatusCleared { unit, removed });
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::event::NullSink;
    use crate::state::{Unit, UnitStats};

    fn roster() -> Roster {
        Roster::new(
            vec![Unit::hero(UnitId(1), "Mage", UnitStats::new(30, 5, 1), Vec::new())],
            Vec::new(),
        )
    }

    #[test]
    fn status_disappears_after_exactly_duration_turn_starts() {
        let engine = StatusEffectEngine::new();
        let mut roster = roster();
        let mut events: Vec<CombatEvent> = Vec::new();
        engine.apply(&mut roster, UnitId(1), StatusEffectKind::Poison, 3, 2, &mut events);

        for _ in 0..2 {
            let report = engine.process_turn_start(&mut roster, UnitId(1), &mut events);
            assert!(report.expired.is_empty());
        }
        let report = engine.process_turn_start(&mut roster, UnitId(1), &mut events);
        assert_eq!(report.expired, vec![StatusEffectKind::Poison]);
        assert_eq!(report.periodic_damage, 2);
        assert!(roster.unit(UnitId(1)).is_some_and(|u| u.statuses.is_empty()));
    }

    #[test]
    fn stun_blocks_the_turn_it_expires_on() {
        let engine = StatusEffectEngine::new();
        let mut roster = roster();
        engine.apply(&mut roster, UnitId(1), StatusEffectKind::Stun, 1, 0, &mut NullSink);

        let report = engine.process_turn_start(&mut roster, UnitId(1), &mut NullSink);
        assert!(!report.can_act);
        assert_eq!(report.expired, vec![StatusEffectKind::Stun]);

        let report = engine.process_turn_start(&mut roster, UnitId(1), &mut NullSink);
        assert!(report.can_act);
    }

    #[test]
    fn burn_and_poison_add_up() {
        let engine = StatusEffectEngine::new();
        let mut roster = roster();
        let mut events: Vec<CombatEvent> = Vec::new();
        engine.apply(&mut roster, UnitId(1), StatusEffectKind::Burn, 2, 4, &mut events);
        engine.apply(&mut roster, UnitId(1), StatusEffectKind::Poison, 2, 3, &mut events);

        let report = engine.process_turn_start(&mut roster, UnitId(1), &mut events);
        assert_eq!(report.periodic_damage, 7);
    }

    #[test]
    fn unknown_unit_is_a_no_op() {
        let engine = StatusEffectEngine::new();
        let mut roster = roster();
        let mut events: Vec<CombatEvent> = Vec::new();

        assert!(!engine.apply(&mut roster, UnitId(9), StatusEffectKind::Burn, 2, 1, &mut events));
        assert_eq!(engine.clear(&mut roster, UnitId(9), &mut events), 0);
        assert!(engine.process_turn_start(&mut roster, UnitId(9), &mut events).can_act);
        assert!(events.is_empty());
    }

    #[test]
    fn combo_rules_see_every_application() {
        struct Counter(Arc<AtomicUsize>);
        impl ComboRule for Counter {
            fn name(&self) -> &'static str {
                "counter"
            }
            fn on_apply(&self, _: &mut Unit, _: StatusEffectKind, _: &mut dyn EventSink) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let hits = Arc::new(AtomicUsize::new(0));
        let engine = StatusEffectEngine::new().with_combo(Box::new(Counter(hits.clone())));
        let mut roster = roster();
        let mut events: Vec<CombatEvent> = Vec::new();
        engine.apply(&mut roster, UnitId(1), StatusEffectKind::Freeze, 1, 0, &mut events);
        engine.apply(&mut roster, UnitId(1), StatusEffectKind::Burn, 0, 5, &mut events);

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
