//! Cloneable façade for issuing commands to an encounter.
//!
//! [`EncounterHandle`] hides channel plumbing and offers async helpers for
//! playing cards, passing turns, or streaming events from specific topics.
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::debug;

use combat_core::{ActionResult, Awaiting, CardId, Phase, SessionView, UnitId};

use super::errors::{Result, RuntimeError};
use super::providers::{HeroCommand, HeroCommandProvider};
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Cards a driver may play in one hero turn before passing regardless.
const MAX_PLAYS_PER_TURN: usize = 16;

/// Client-facing handle to interact with a running encounter
#[derive(Clone)]
pub struct EncounterHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl EncounterHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Play `card` from the active hero's deck against `target`.
    ///
    /// Rejections come back as [`RuntimeError::Session`] and are also
    /// narrated as a warning on [`Topic::Narration`].
    pub async fn play_card(&self, card: impl Into<CardId>, target: UnitId) -> Result<ActionResult> {
        let card = card.into();
        self.request(|reply| Command::PlayCard {
            card,
            target,
            reply,
        })
        .await?
    }

    /// End the active hero's turn (or a stunned hero's skipped turn).
    pub async fn pass_turn(&self) -> Result<Awaiting> {
        self.request(|reply| Command::PassTurn { reply }).await?
    }

    /// Query the current encounter state (read-only snapshot)
    pub async fn snapshot(&self) -> Result<SessionView> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Leave the encounter without an outcome. Cancels any pending enemy
    /// action; no `CombatEnd` is emitted and no hook runs. Idempotent.
    pub async fn exit(&self) -> Result<SessionView> {
        self.request(|reply| Command::Exit { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Turn` - Round and turn starts
    /// - `Topic::Combat` - Damage, statuses, cards, defeats, combat end
    /// - `Topic::Narration` - Human-readable messages
    /// - `Topic::Lifecycle` - Deferred actions and exit
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use combat_runtime::Topic;
    ///
    /// let mut narration = handle.subscribe(Topic::Narration);
    /// while let Ok(event) = narration.recv().await {
    ///     // Show the message
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Drives every hero turn with `provider` until the encounter ends.
    ///
    /// Enemy turns and skipped turns are left to the worker. Returns the
    /// final snapshot.
    pub async fn drive_heroes(&self, provider: &dyn HeroCommandProvider) -> Result<SessionView> {
        let mut turns = self.subscribe(Topic::Turn);
        let mut combat = self.subscribe(Topic::Combat);
        let mut lifecycle = self.subscribe(Topic::Lifecycle);

        loop {
            let view = self.snapshot().await?;
            if view.phase == Phase::Ended {
                return Ok(view);
            }
            if let Awaiting::HeroInput(hero) = view.awaiting {
                self.drive_turn(hero, view, provider).await?;
                continue;
            }

            // Something else is happening; wait until it does.
            tokio::select! {
                event = turns.recv() => Self::check_stream(event)?,
                event = combat.recv() => Self::check_stream(event)?,
                event = lifecycle.recv() => Self::check_stream(event)?,
            }
        }
    }

    async fn drive_turn(
        &self,
        hero: UnitId,
        mut view: SessionView,
        provider: &dyn HeroCommandProvider,
    ) -> Result<()> {
        for _ in 0..MAX_PLAYS_PER_TURN {
            match provider.next_command(hero, &view).await? {
                HeroCommand::Pass => break,
                HeroCommand::Play { card, target } => match self.play_card(card, target).await {
                    Ok(_) => {}
                    Err(RuntimeError::Session(err)) => {
                        debug!(
                            target: "runtime::encounter",
                            %hero,
                            error = %err,
                            "provider command rejected, passing"
                        );
                        break;
                    }
                    Err(err) => return Err(err),
                },
            }
            view = self.snapshot().await?;
            if view.awaiting != Awaiting::HeroInput(hero) {
                return Ok(());
            }
        }
        self.pass_turn().await.map(|_| ())
    }

    fn check_stream(event: std::result::Result<Event, broadcast::error::RecvError>) -> Result<()> {
        match event {
            Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => Ok(()),
            Err(broadcast::error::RecvError::Closed) => Err(RuntimeError::EventStreamClosed),
        }
    }

    async fn request<T>(&self, command: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }
}
