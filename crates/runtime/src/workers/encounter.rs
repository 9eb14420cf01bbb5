//! Encounter worker that owns the authoritative [`CombatSession`] and roster.
//!
//! Receives commands from [`crate::EncounterHandle`], drives the session, and
//! publishes every notification to the [`EventBus`]. Enemy actions and
//! skipped turns are deferred: the worker records a deadline and resolves
//! the action when it fires, unless the encounter ended first.

use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, error, info};

use combat_core::{
    ActionResult, Awaiting, CardId, CombatSession, Outcome, Phase, Roster, SessionError,
    SessionView, UnitId,
};

use crate::api::Result;
use crate::config::RuntimeConfig;
use crate::events::{EncounterEvent, Event, EventBus};
use crate::hooks::{HookContext, HookRegistry};
use crate::oracle::OracleManager;
use crate::runtime::EncounterSummary;

/// Commands that can be sent to the encounter worker
pub(crate) enum Command {
    /// Play a card from the active hero's deck.
    PlayCard {
        card: CardId,
        target: UnitId,
        reply: oneshot::Sender<Result<ActionResult>>,
    },
    /// End the active hero's (or a skipped unit's) turn.
    PassTurn {
        reply: oneshot::Sender<Result<Awaiting>>,
    },
    /// Query the current encounter state (read-only).
    Snapshot { reply: oneshot::Sender<SessionView> },
    /// Leave the encounter without an outcome.
    Exit { reply: oneshot::Sender<SessionView> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Deferred {
    EnemyAction(UnitId),
    PassSkipped(UnitId),
}

impl Deferred {
    fn unit(self) -> UnitId {
        match self {
            Self::EnemyAction(unit) | Self::PassSkipped(unit) => unit,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Pending {
    action: Deferred,
    deadline: Instant,
}

/// Background task that serializes every mutation of one encounter.
///
/// At most one deferred action exists at a time, and the session never
/// advances while one is pending: the only way past an enemy turn is the
/// deadline firing.
pub(crate) struct EncounterWorker {
    session: CombatSession,
    roster: Roster,
    oracles: OracleManager,
    command_rx: mpsc::Receiver<Command>,
    bus: EventBus,
    hooks: HookRegistry,
    config: RuntimeConfig,
    pending: Option<Pending>,
    hooks_ran: bool,
}

impl EncounterWorker {
    pub(crate) fn new(
        session: CombatSession,
        roster: Roster,
        oracles: OracleManager,
        command_rx: mpsc::Receiver<Command>,
        bus: EventBus,
        hooks: HookRegistry,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            session,
            roster,
            oracles,
            command_rx,
            bus,
            hooks,
            config,
            pending: None,
            hooks_ran: false,
        }
    }

    /// Main worker loop. Runs until every handle is dropped.
    pub(crate) async fn run(mut self, opening: Awaiting) -> EncounterSummary {
        self.settle(opening);

        loop {
            let deadline = self.pending.map(|pending| pending.deadline);
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd),
                    None => break,
                },
                () = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)),
                    if deadline.is_some() =>
                {
                    self.fire_pending();
                }
            }
        }

        debug!(target: "runtime::encounter", "all handles dropped, worker stopping");
        EncounterSummary {
            outcome: self.session.outcome(),
            rounds: self.session.round(),
            roster: self.roster,
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::PlayCard {
                card,
                target,
                reply,
            } => {
                let env = self.oracles.as_combat_env();
                let result =
                    self.session
                        .play_card(&card, target, &mut self.roster, &env, &mut self.bus);
                if result.is_ok() {
                    self.settle(self.session.awaiting());
                }
                if reply.send(result.map_err(Into::into)).is_err() {
                    debug!("PlayCard reply channel closed (caller dropped)");
                }
            }
            Command::PassTurn { reply } => {
                let result = self.session.pass_turn(&mut self.roster, &mut self.bus);
                if let Ok(awaiting) = result {
                    self.settle(awaiting);
                }
                if reply.send(result.map_err(Into::into)).is_err() {
                    debug!("PassTurn reply channel closed (caller dropped)");
                }
            }
            Command::Snapshot { reply } => {
                if reply.send(self.session.view(&self.roster)).is_err() {
                    debug!("Snapshot reply channel closed (caller dropped)");
                }
            }
            Command::Exit { reply } => {
                self.exit();
                if reply.send(self.session.view(&self.roster)).is_err() {
                    debug!("Exit reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// Resolves the deferred action whose deadline fired.
    fn fire_pending(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        let result = match pending.action {
            Deferred::EnemyAction(unit) => {
                if !self.still_awaiting(Awaiting::EnemyAction(unit)) {
                    debug!(target: "runtime::encounter", %unit, "stale enemy action dropped");
                    return;
                }
                let env = self.oracles.as_combat_env();
                self.session.take_enemy_turn(&mut self.roster, &env, &mut self.bus)
            }
            Deferred::PassSkipped(unit) => {
                if !self.still_awaiting(Awaiting::SkippedTurn(unit)) {
                    debug!(target: "runtime::encounter", %unit, "stale skip dropped");
                    return;
                }
                self.session.end_skipped_turn(&mut self.roster, &mut self.bus)
            }
        };

        match result {
            Ok(awaiting) => self.settle(awaiting),
            Err(err) => self.deferred_failed(pending.action, &err),
        }
    }

    fn still_awaiting(&self, awaiting: Awaiting) -> bool {
        self.session.phase() == Phase::ActiveTurn && self.session.awaiting() == awaiting
    }

    /// Schedules whatever the session now waits for, or wraps up the encounter.
    fn settle(&mut self, awaiting: Awaiting) {
        if self.session.is_ended() {
            self.cancel_pending();
            self.run_end_hooks();
            return;
        }

        let (action, delay) = match awaiting {
            Awaiting::EnemyAction(unit) => {
                let delay = self.config.enemy_think_delay;
                self.bus
                    .publish(Event::Encounter(EncounterEvent::EnemyThinking { unit, delay }));
                (Deferred::EnemyAction(unit), delay)
            }
            Awaiting::SkippedTurn(unit) => {
                let delay = self.config.skip_turn_delay;
                self.bus
                    .publish(Event::Encounter(EncounterEvent::TurnSkipping { unit, delay }));
                (Deferred::PassSkipped(unit), delay)
            }
            Awaiting::HeroInput(_) | Awaiting::Nothing => {
                self.pending = None;
                return;
            }
        };

        debug!(target: "runtime::encounter", ?action, ?delay, "action deferred");
        self.pending = Some(Pending {
            action,
            deadline: Instant::now() + delay,
        });
    }

    fn exit(&mut self) {
        if self.session.is_ended() {
            debug!(target: "runtime::encounter", "exit after encounter end ignored");
            return;
        }
        self.session.exit();
        self.cancel_pending();
        self.bus.publish(Event::Encounter(EncounterEvent::Exited {
            round: self.session.round(),
        }));
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            let unit = pending.action.unit();
            debug!(target: "runtime::encounter", %unit, "pending action cancelled");
            self.bus
                .publish(Event::Encounter(EncounterEvent::PendingCancelled { unit }));
        }
    }

    fn run_end_hooks(&mut self) {
        let outcome = self.session.outcome();
        if self.hooks_ran || outcome == Outcome::Undetermined {
            return;
        }
        self.hooks_ran = true;
        info!(
            target: "runtime::encounter",
            ?outcome,
            round = self.session.round(),
            hooks = self.hooks.len(),
            "running end-of-combat hooks"
        );
        self.hooks
            .run(&HookContext::new(outcome, self.session.round(), &self.roster));
    }

    /// A deferred step the session refused. Nothing is rescheduled; the
    /// encounter waits for a client command such as exit.
    fn deferred_failed(&self, action: Deferred, err: &SessionError) {
        error!(
            target: "runtime::encounter",
            ?action,
            error = %err,
            "deferred action rejected"
        );
    }
}
