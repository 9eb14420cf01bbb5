//! Application of decided enemy actions.

use tracing::debug;

use super::{Awaiting, CombatSession, Phase, SessionError};
use crate::ai::EnemyAction;
use crate::event::{CombatEvent, EventSink, MessageKind};
use crate::state::{Roster, Unit, UnitId};

impl CombatSession {
    /// Applies an enemy action and ends that enemy's turn.
    ///
    /// Checks the phase before mutating anything: an action that arrives after
    /// the encounter ended is dropped.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotActiveEnemy` if `action` does not come from
    /// the enemy whose action is awaited.
    pub fn apply_enemy_action(
        &mut self,
        action: EnemyAction,
        roster: &mut Roster,
        sink: &mut dyn EventSink,
    ) -> Result<Awaiting, SessionError> {
        match self.phase {
            Phase::Ended => {
                debug!(
                    target: "combat::session",
                    source = %action.source(),
                    "stale enemy action dropped"
                );
                return Ok(Awaiting::Nothing);
            }
            Phase::Setup => return Err(SessionError::NotStarted),
            Phase::Resolving => return Err(SessionError::Busy),
            Phase::ActiveTurn => {}
        }
        if self.awaiting != Awaiting::EnemyAction(action.source()) {
            return Err(SessionError::NotActiveEnemy(action.source()));
        }

        self.phase = Phase::Resolving;
        self.resolve_enemy_action(action, roster, sink);
        self.phase = Phase::ActiveTurn;

        if let Some(outcome) = self.scheduler.check_end_conditions(roster) {
            self.finish(outcome, sink);
            return Ok(Awaiting::Nothing);
        }
        Ok(self.end_turn(roster, sink))
    }

    fn resolve_enemy_action(
        &self,
        action: EnemyAction,
        roster: &mut Roster,
        sink: &mut dyn EventSink,
    ) {
        let source_name = roster
            .unit(action.source())
            .map(|unit| unit.name.clone())
            .unwrap_or_default();

        match action {
            EnemyAction::Attack { target, damage, .. } => {
                let Some(victim) = living(roster, target) else {
                    return narrate_missing(&source_name, sink);
                };
                // `damage` already scales with the attacker's attack.
                let amount = self.damage.resolve(damage, 0, victim);
                let dealt = victim.take_damage(amount);
                sink.emit(CombatEvent::DamageTaken {
                    target,
                    amount: dealt as i32,
                    current_hp: victim.hp,
                });
                sink.emit(CombatEvent::message(
                    format!("{source_name} attacks {} for {dealt} damage", victim.name),
                    MessageKind::Danger,
                ));
                if victim.is_dead() {
                    sink.emit(CombatEvent::UnitDefeated { unit: target });
                    sink.emit(CombatEvent::message(
                        format!("{} is defeated", victim.name),
                        MessageKind::Danger,
                    ));
                }
            }
            EnemyAction::Heal { target, amount, .. } => {
                let Some(ally) = living(roster, target) else {
                    return narrate_missing(&source_name, sink);
                };
                let healed = ally.heal(amount);
                sink.emit(CombatEvent::DamageTaken {
                    target,
                    amount: -(healed as i32),
                    current_hp: ally.hp,
                });
                sink.emit(CombatEvent::message(
                    format!("{source_name} heals {} for {healed}", ally.name),
                    MessageKind::Info,
                ));
            }
            EnemyAction::Debuff {
                target,
                kind,
                duration,
                magnitude,
                ..
            } => {
                let Some(victim) = living(roster, target) else {
                    return narrate_missing(&source_name, sink);
                };
                let victim_name = victim.name.clone();
                if self.status.apply(roster, target, kind, duration, magnitude, sink) {
                    sink.emit(CombatEvent::message(
                        format!("{source_name} inflicts {kind} on {victim_name}"),
                        MessageKind::Warning,
                    ));
                }
            }
            EnemyAction::Defend { source, bonus } => {
                if let Some(unit) = roster.unit_mut(source) {
                    unit.temporary_defense = unit.temporary_defense.saturating_add(bonus);
                }
                sink.emit(CombatEvent::message(
                    format!("{source_name} takes a defensive stance"),
                    MessageKind::Info,
                ));
            }
        }
    }
}

fn living(roster: &mut Roster, id: UnitId) -> Option<&mut Unit> {
    roster.unit_mut(id).filter(|unit| unit.is_alive())
}

fn narrate_missing(source_name: &str, sink: &mut dyn EventSink) {
    sink.emit(CombatEvent::message(
        format!("{source_name} finds no target"),
        MessageKind::Info,
    ));
}
