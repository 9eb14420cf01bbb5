//! Card resolution.
//!
//! Facets resolve in a fixed order and every populated facet runs; there is
//! no early return:
//!
//! 1. effective target (source when `targets_self`)
//! 2. damage against the chosen target (its whole side for area cards)
//! 3. heal on the effective target
//! 4. action point restore on the source
//! 5. temporary defense on the source (stacks)
//! 6. stat deltas on the source
//! 7. damage over time on the effective target (its whole side for area cards)
//! 8. cleanse on the effective target
//! 9. consumable removal from the source's deck and the inventory
//!
//! Cost is not paid here. [`CardResolver::pay_cost`] is a checked
//! precondition the caller runs first; [`CardResolver::play`] does both.

use tracing::debug;

use super::{ActionCard, CardError};
use crate::damage::DamageResolver;
use crate::event::{CombatEvent, EventSink, MessageKind};
use crate::state::{Roster, Unit, UnitId};
use crate::status::StatusEffectEngine;

/// Outcome of one card resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionResult {
    /// False when no facet found a valid recipient.
    pub success: bool,
    pub log_text: String,
    pub damage_dealt: u32,
    pub healed: u32,
    /// Units killed by this card, in the order they fell.
    pub defeated: Vec<UnitId>,
}

#[derive(Clone, Copy, Debug)]
pub struct CardResolver<'a> {
    damage: &'a DamageResolver,
    status: &'a StatusEffectEngine,
}

impl<'a> CardResolver<'a> {
    pub fn new(damage: &'a DamageResolver, status: &'a StatusEffectEngine) -> Self {
        Self { damage, status }
    }

    /// True iff the source can afford the card. Pure.
    pub fn can_play(card: &ActionCard, source: &Unit) -> bool {
        source.action_points >= card.cost
    }

    /// Deducts the card cost from the source.
    ///
    /// # Errors
    ///
    /// Fails without side effects if the source is unknown, dead or short on
    /// action points.
    pub fn pay_cost(
        &self,
        card: &ActionCard,
        source: UnitId,
        roster: &mut Roster,
    ) -> Result<(), CardError> {
        let unit = roster
            .unit_mut(source)
            .ok_or(CardError::SourceNotFound(source))?;
        if unit.is_dead() {
            return Err(CardError::SourceDead(source));
        }
        if !unit.spend_action_points(card.cost) {
            return Err(CardError::InsufficientActionPoints {
                card: card.id.clone(),
                required: card.cost,
                available: unit.action_points,
            });
        }
        Ok(())
    }

    /// Validates, pays and executes a card.
    ///
    /// # Errors
    ///
    /// See [`ActionCard::validate`], [`Self::pay_cost`] and [`Self::execute`].
    pub fn play(
        &self,
        card: &ActionCard,
        source: UnitId,
        target: UnitId,
        roster: &mut Roster,
        sink: &mut dyn EventSink,
    ) -> Result<ActionResult, CardError> {
        card.validate()?;
        if roster.unit(target).is_none() {
            return Err(CardError::TargetNotFound(target));
        }
        self.pay_cost(card, source, roster)?;
        self.execute(card, source, target, roster, sink)
    }

    /// Resolves every facet of an already paid card.
    ///
    /// # Errors
    ///
    /// Returns an error only if `source` or `target` is not in the roster.
    pub fn execute(
        &self,
        card: &ActionCard,
        source: UnitId,
        target: UnitId,
        roster: &mut Roster,
        sink: &mut dyn EventSink,
    ) -> Result<ActionResult, CardError> {
        let source_unit = roster.unit(source).ok_or(CardError::SourceNotFound(source))?;
        let attack = source_unit.attack;
        let source_name = source_unit.name.clone();
        let target_side = roster
            .side_of(target)
            .ok_or(CardError::TargetNotFound(target))?;

        sink.emit(CombatEvent::CardPlayed {
            card: card.id.clone(),
            source,
            target,
        });

        let effective = if card.targets_self { source } else { target };
        let effective_side = if card.targets_self {
            roster.side_of(source).unwrap_or(target_side)
        } else {
            target_side
        };

        let mut result = ActionResult::default();
        let mut notes: Vec<String> = Vec::new();

        // 2. damage
        if let Some(base) = card.base_damage() {
            let victims = if card.area_of_effect {
                roster.living_ids(target_side)
            } else {
                vec![target]
            };
            for victim in victims {
                let Some(unit) = roster.unit_mut(victim) else {
                    continue;
                };
                if unit.is_dead() {
                    continue;
                }
                let amount = self.damage.resolve(base, attack, unit);
                let dealt = unit.take_damage(amount);
                result.damage_dealt += dealt;
                result.success = true;
                notes.push(format!("{} takes {} damage", unit.name, dealt));
                sink.emit(CombatEvent::DamageTaken {
                    target: victim,
                    amount: dealt as i32,
                    current_hp: unit.hp,
                });
                if unit.is_dead() {
                    notes.push(format!("{} is defeated", unit.name));
                    result.defeated.push(victim);
                    sink.emit(CombatEvent::UnitDefeated { unit: victim });
                }
            }
        }

        // 3. heal
        if let Some(amount) = card.heal
            && let Some(unit) = roster.unit_mut(effective)
            && unit.is_alive()
        {
            let healed = unit.heal(amount);
            result.healed += healed;
            result.success = true;
            notes.push(format!("{} recovers {} hp", unit.name, healed));
            sink.emit(CombatEvent::DamageTaken {
                target: effective,
                amount: -(healed as i32),
                current_hp: unit.hp,
            });
        }

        // 4. restore
        if let Some(amount) = card.restore_action_points
            && let Some(unit) = roster.unit_mut(source)
        {
            let restored = unit.restore_action_points(amount);
            result.success = true;
            sink.emit(CombatEvent::ResourceRestored {
                unit: source,
                amount: restored,
                current: unit.action_points,
            });
        }

        // 5. temporary defense
        if let Some(bonus) = card.defense_bonus
            && let Some(unit) = roster.unit_mut(source)
        {
            unit.temporary_defense = unit.temporary_defense.saturating_add(bonus);
            result.success = true;
            notes.push(format!("{} braces (+{} defense)", unit.name, bonus));
        }

        // 6. stat buff
        if let Some(buff) = &card.stat_buff
            && let Some(unit) = roster.unit_mut(source)
        {
            for delta in &buff.deltas {
                unit.apply_stat_delta(delta.stat, delta.delta);
            }
            if let Some(duration) = buff.duration {
                debug!(
                    target: "combat::card",
                    card = %card.id,
                    duration,
                    "timed stat buff applied as permanent"
                );
            }
            result.success |= !buff.deltas.is_empty();
        }

        // 7. damage over time
        if let Some(dot) = card.dot {
            let victims = if card.area_of_effect {
                roster.living_ids(effective_side)
            } else {
                vec![effective]
            };
            for victim in victims {
                if roster.unit(victim).is_some_and(|unit| unit.is_alive()) {
                    result.success |= self.status.apply(
                        roster,
                        victim,
                        dot.kind,
                        dot.duration,
                        dot.amount,
                        sink,
                    );
                }
            }
        }

        // 8. cleanse
        if card.cleanse_all {
            self.status.clear(roster, effective, sink);
            result.success = true;
        }

        // 9. consumable
        if let Some(consumable) = &card.consumable {
            if let Some(deck) = roster.unit_mut(source).and_then(|unit| unit.deck_mut())
                && let Some(index) = deck.iter().position(|id| id == &card.id)
            {
                deck.remove(index);
            }
            if let Some(item) = &consumable.linked_item {
                roster.inventory.consume_one(item);
            }
            result.success = true;
        }

        result.log_text = if notes.is_empty() {
            format!("{source_name} plays {}", card.name)
        } else {
            format!("{source_name} plays {}: {}", card.name, notes.join(", "))
        };
        let kind = if result.defeated.is_empty() {
            MessageKind::Info
        } else {
            MessageKind::Success
        };
        sink.emit(CombatEvent::message(result.log_text.clone(), kind));

        debug!(
            target: "combat::card",
            card = %card.id,
            %source,
            %target,
            damage = result.damage_dealt,
            healed = result.healed,
            "card resolved"
        );
        Ok(result)
    }
}
