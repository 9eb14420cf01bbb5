//! Encounter controller.
//!
//! [`CombatSession`] owns the lifecycle of one encounter and composes the
//! scheduler, the status engine, the card resolver and the enemy policy. It
//! never owns units: every step borrows the roster mutably and returns before
//! anything else may touch it.
//!
//! ```text
//! Setup --start--> ActiveTurn <--> Resolving
//!                      |
//!                      +--(side wiped | exit)--> Ended
//! ```
//!
//! Each step reports what the encounter is waiting for next through
//! [`Awaiting`]. Hero turns wait for cards and an explicit pass; enemy turns
//! wait for the driver to decide and apply an action, after whatever delay it
//! wants; skipped turns wait for the driver to close them.
mod apply;
mod error;
mod view;

pub use error::SessionError;
pub use view::{SessionView, UnitView};

use tracing::{debug, info, warn};

use crate::ai::{EnemyAction, EnemyPolicy};
use crate::card::{ActionResult, CardResolver};
use crate::config::CombatConfig;
use crate::damage::DamageResolver;
use crate::env::CombatEnv;
use crate::event::{CombatEvent, EventSink, MessageKind};
use crate::state::{CardId, Roster, Side, UnitId};
use crate::status::{ComboRule, StatusEffectEngine};
use crate::turn::{Advance, FixedSeniority, Outcome, TurnParticipant, TurnScheduler};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    #[default]
    Setup,
    ActiveTurn,
    Resolving,
    Ended,
}

/// What the encounter needs before it can move on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Awaiting {
    /// Not started, or over.
    #[default]
    Nothing,
    /// A hero may play cards, then passes.
    HeroInput(UnitId),
    /// An enemy's action should be decided and applied.
    EnemyAction(UnitId),
    /// The active unit cannot act; the turn should be passed.
    SkippedTurn(UnitId),
}

impl Awaiting {
    pub const fn unit(&self) -> Option<UnitId> {
        match self {
            Self::Nothing => None,
            Self::HeroInput(unit) | Self::EnemyAction(unit) | Self::SkippedTurn(unit) => {
                Some(*unit)
            }
        }
    }
}

pub struct CombatSession {
    config: CombatConfig,
    phase: Phase,
    awaiting: Awaiting,
    scheduler: TurnScheduler,
    status: StatusEffectEngine,
    damage: DamageResolver,
    policy: EnemyPolicy,
    end_emitted: bool,
}

impl core::fmt::Debug for CombatSession {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatSession")
            .field("phase", &self.phase)
            .field("awaiting", &self.awaiting)
            .field("scheduler", &self.scheduler)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl Default for CombatSession {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}

impl CombatSession {
    pub fn new(config: CombatConfig) -> Self {
        Self {
            damage: DamageResolver::from_config(&config),
            policy: EnemyPolicy::new(config.clone()),
            config,
            phase: Phase::Setup,
            awaiting: Awaiting::Nothing,
            scheduler: TurnScheduler::new(),
            status: StatusEffectEngine::new(),
            end_emitted: false,
        }
    }

    pub fn with_combo(mut self, rule: Box<dyn ComboRule>) -> Self {
        self.status.register_combo(rule);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.scheduler.outcome()
    }

    pub fn awaiting(&self) -> Awaiting {
        self.awaiting
    }

    pub fn round(&self) -> u32 {
        self.scheduler.round()
    }

    pub fn active(&self) -> Option<TurnParticipant> {
        self.scheduler.active()
    }

    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    pub fn status_engine(&self) -> &StatusEffectEngine {
        &self.status
    }

    pub fn view(&self, roster: &Roster) -> SessionView {
        SessionView::capture(
            self.round(),
            self.phase,
            self.outcome(),
            self.active().map(|participant| participant.unit),
            self.awaiting,
            roster,
        )
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Builds the turn order and opens the first turn.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::AlreadyStarted` unless the session is in setup.
    pub fn start(
        &mut self,
        roster: &mut Roster,
        sink: &mut dyn EventSink,
    ) -> Result<Awaiting, SessionError> {
        if self.phase != Phase::Setup {
            return Err(SessionError::AlreadyStarted);
        }
        info!(
            target: "combat::session",
            heroes = roster.heroes().len(),
            enemies = roster.enemies().len(),
            seed = self.config.seed,
            "encounter started"
        );
        self.phase = Phase::ActiveTurn;
        let advance = self.scheduler.start_combat(roster, &FixedSeniority, sink);
        Ok(self.settle(advance, roster, sink))
    }

    /// Ends the active turn and opens the next one.
    ///
    /// Valid during a hero turn or a hero's skipped turn. After the encounter
    /// ended this is a logged no-op.
    ///
    /// # Errors
    ///
    /// Rejects the request if the session has not started or is resolving.
    /// Rejects with `SessionError::NotHeroTurn` while an enemy holds the turn,
    /// including a stunned enemy.
    pub fn pass_turn(
        &mut self,
        roster: &mut Roster,
        sink: &mut dyn EventSink,
    ) -> Result<Awaiting, SessionError> {
        match self.phase {
            Phase::Ended => {
                debug!(target: "combat::session", "pass after encounter end ignored");
                return Ok(Awaiting::Nothing);
            }
            Phase::Setup => return Err(SessionError::NotStarted),
            Phase::Resolving => return Err(SessionError::Busy),
            Phase::ActiveTurn => {}
        }
        match self.awaiting {
            Awaiting::HeroInput(_) => {}
            Awaiting::SkippedTurn(unit) if roster.side_of(unit) == Some(Side::Hero) => {}
            _ => return Err(self.reject(SessionError::NotHeroTurn, sink)),
        }
        Ok(self.end_turn(roster, sink))
    }

    /// Closes a turn the active unit cannot act in, for either side.
    ///
    /// This is the driver's counterpart to `pass_turn`: the host calls it
    /// once the skip delay elapsed. After the encounter ended this is a
    /// logged no-op.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotSkippedTurn` unless the session awaits a
    /// skipped turn.
    pub fn end_skipped_turn(
        &mut self,
        roster: &mut Roster,
        sink: &mut dyn EventSink,
    ) -> Result<Awaiting, SessionError> {
        match self.phase {
            Phase::Ended => {
                debug!(target: "combat::session", "skipped turn after encounter end ignored");
                return Ok(Awaiting::Nothing);
            }
            Phase::Setup => return Err(SessionError::NotStarted),
            Phase::Resolving => return Err(SessionError::Busy),
            Phase::ActiveTurn => {}
        }
        let Awaiting::SkippedTurn(unit) = self.awaiting else {
            return Err(SessionError::NotSkippedTurn);
        };
        debug!(target: "combat::session", unit = %unit, "closing skipped turn");
        Ok(self.end_turn(roster, sink))
    }

    /// Ends the encounter without an outcome. Emits no `CombatEnd`.
    /// Idempotent.
    pub fn exit(&mut self) {
        if self.phase == Phase::Ended {
            return;
        }
        info!(target: "combat::session", round = self.round(), "encounter exited");
        self.phase = Phase::Ended;
        self.awaiting = Awaiting::Nothing;
        self.end_emitted = true;
        self.scheduler.finish(Outcome::Undetermined);
    }

    // ========================================================================
    // Hero input
    // ========================================================================

    /// Plays a card from the active hero's deck against `target`.
    ///
    /// # Errors
    ///
    /// Every rejection leaves the encounter untouched and, except for
    /// `SessionError::Ended`, is narrated as a warning message.
    pub fn play_card(
        &mut self,
        card_id: &CardId,
        target: UnitId,
        roster: &mut Roster,
        env: &CombatEnv<'_>,
        sink: &mut dyn EventSink,
    ) -> Result<ActionResult, SessionError> {
        match self.phase {
            Phase::Ended => {
                debug!(
                    target: "combat::session",
                    card = %card_id,
                    "card after encounter end ignored"
                );
                return Err(SessionError::Ended);
            }
            Phase::Setup => return Err(SessionError::NotStarted),
            Phase::Resolving => return Err(SessionError::Busy),
            Phase::ActiveTurn => {}
        }

        let source = match self.awaiting {
            Awaiting::HeroInput(hero) => hero,
            Awaiting::SkippedTurn(unit) if roster.side_of(unit) == Some(Side::Hero) => {
                return Err(self.reject(SessionError::UnitCannotAct(unit), sink));
            }
            _ => return Err(self.reject(SessionError::NotHeroTurn, sink)),
        };

        let cards = match env.cards() {
            Ok(cards) => cards,
            Err(err) => return Err(self.reject(err.into(), sink)),
        };
        let card = match cards.card(card_id) {
            Some(card) => card,
            None => {
                warn!(target: "combat::session", card = %card_id, "card missing from table");
                return Err(self.reject(SessionError::UnknownCard(card_id.clone()), sink));
            }
        };
        if !roster.unit(source).is_some_and(|unit| unit.holds_card(card_id)) {
            return Err(self.reject(
                SessionError::CardNotInDeck {
                    unit: source,
                    card: card_id.clone(),
                },
                sink,
            ));
        }
        match roster.unit(target) {
            None => return Err(self.reject(SessionError::TargetNotFound(target), sink)),
            Some(unit) if unit.is_dead() => {
                return Err(self.reject(SessionError::TargetDead(target), sink));
            }
            Some(_) => {}
        }

        self.phase = Phase::Resolving;
        let resolver = CardResolver::new(&self.damage, &self.status);
        let played = resolver.play(&card, source, target, roster, sink);
        self.phase = Phase::ActiveTurn;
        let result = match played {
            Ok(result) => result,
            Err(err) => return Err(self.reject(err.into(), sink)),
        };

        if let Some(outcome) = self.scheduler.check_end_conditions(roster) {
            self.finish(outcome, sink);
        } else if roster.unit(source).is_none_or(|unit| unit.is_dead()) {
            self.end_turn(roster, sink);
        }
        Ok(result)
    }

    // ========================================================================
    // Enemy turns
    // ========================================================================

    /// Decides the active enemy's action without applying it.
    ///
    /// Returns `None` when no enemy action is awaited or no hero is alive.
    pub fn decide_enemy_action(&self, roster: &Roster, env: &CombatEnv<'_>) -> Option<EnemyAction> {
        if self.phase != Phase::ActiveTurn {
            return None;
        }
        let Awaiting::EnemyAction(id) = self.awaiting else {
            return None;
        };
        let enemy = roster.unit(id)?;
        let heroes = roster.living(Side::Hero);
        let allies = roster.living(Side::Enemy);
        self.policy.decide(enemy, &heroes, &allies, env, self.round())
    }

    /// Decides and applies the active enemy's action in one step.
    ///
    /// # Errors
    ///
    /// See [`Self::apply_enemy_action`].
    pub fn take_enemy_turn(
        &mut self,
        roster: &mut Roster,
        env: &CombatEnv<'_>,
        sink: &mut dyn EventSink,
    ) -> Result<Awaiting, SessionError> {
        match self.phase {
            Phase::Ended => {
                debug!(target: "combat::session", "enemy turn after encounter end ignored");
                return Ok(Awaiting::Nothing);
            }
            Phase::Setup => return Err(SessionError::NotStarted),
            Phase::Resolving => return Err(SessionError::Busy),
            Phase::ActiveTurn => {}
        }
        if !matches!(self.awaiting, Awaiting::EnemyAction(_)) {
            return Err(SessionError::NotEnemyTurn);
        }
        match self.decide_enemy_action(roster, env) {
            Some(action) => self.apply_enemy_action(action, roster, sink),
            None => Ok(self.end_turn(roster, sink)),
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Advances past the active unit and opens the next turn.
    fn end_turn(&mut self, roster: &mut Roster, sink: &mut dyn EventSink) -> Awaiting {
        let advance = self.scheduler.advance(roster, sink);
        self.settle(advance, roster, sink)
    }

    /// Follows scheduler advances until a unit can be handed control or the
    /// encounter ends.
    fn settle(
        &mut self,
        mut advance: Advance,
        roster: &mut Roster,
        sink: &mut dyn EventSink,
    ) -> Awaiting {
        loop {
            match advance {
                Advance::Turn(participant) => match self.open_turn(participant, roster, sink) {
                    Some(awaiting) => {
                        self.awaiting = awaiting;
                        return awaiting;
                    }
                    None => {
                        if let Some(outcome) = self.scheduler.check_end_conditions(roster) {
                            self.finish(outcome, sink);
                            return Awaiting::Nothing;
                        }
                        advance = self.scheduler.advance(roster, sink);
                    }
                },
                Advance::Ended(outcome) => {
                    self.finish(outcome, sink);
                    return Awaiting::Nothing;
                }
                Advance::NotRunning => {
                    self.awaiting = Awaiting::Nothing;
                    return Awaiting::Nothing;
                }
            }
        }
    }

    /// Turn-start processing: refill action points, tick statuses, apply
    /// periodic damage. Returns `None` if the unit died before acting.
    fn open_turn(
        &self,
        participant: TurnParticipant,
        roster: &mut Roster,
        sink: &mut dyn EventSink,
    ) -> Option<Awaiting> {
        let id = participant.unit;
        if let Some(unit) = roster.unit_mut(id) {
            unit.refill_action_points();
        }

        let report = self.status.process_turn_start(roster, id, sink);
        let unit = roster.unit_mut(id)?;

        if report.periodic_damage > 0 {
            let dealt = unit.take_damage(report.periodic_damage);
            sink.emit(CombatEvent::DamageTaken {
                target: id,
                amount: dealt as i32,
                current_hp: unit.hp,
            });
            sink.emit(CombatEvent::message(
                format!("{} suffers {} damage from lingering effects", unit.name, dealt),
                MessageKind::Danger,
            ));
            if unit.is_dead() {
                sink.emit(CombatEvent::UnitDefeated { unit: id });
                sink.emit(CombatEvent::message(
                    format!("{} is defeated", unit.name),
                    MessageKind::Danger,
                ));
                return None;
            }
        }

        if !report.can_act {
            debug!(target: "combat::session", unit = %id, "turn skipped");
            sink.emit(CombatEvent::message(
                format!("{} cannot act this turn", unit.name),
                MessageKind::Warning,
            ));
            return Some(Awaiting::SkippedTurn(id));
        }

        Some(match participant.side {
            Side::Hero => Awaiting::HeroInput(id),
            Side::Enemy => Awaiting::EnemyAction(id),
        })
    }

    /// Transitions to `Ended` and emits `CombatEnd` once.
    fn finish(&mut self, outcome: Outcome, sink: &mut dyn EventSink) {
        self.scheduler.finish(outcome);
        self.phase = Phase::Ended;
        self.awaiting = Awaiting::Nothing;
        if self.end_emitted {
            return;
        }
        self.end_emitted = true;

        let victory = outcome == Outcome::Victory;
        info!(target: "combat::session", ?outcome, round = self.round(), "encounter resolved");
        sink.emit(CombatEvent::CombatEnd { victory });
        let (text, kind) = if victory {
            ("Victory!", MessageKind::Success)
        } else {
            ("Defeat...", MessageKind::Danger)
        };
        sink.emit(CombatEvent::message(text, kind));
    }

    /// Narrates a rejected request and hands the error back.
    fn reject(&self, err: SessionError, sink: &mut dyn EventSink) -> SessionError {
        debug!(target: "combat::session", error = %err, "request rejected");
        sink.emit(CombatEvent::message(err.to_string(), MessageKind::Warning));
        err
    }
}
