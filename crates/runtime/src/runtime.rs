//! Encounter builder and orchestrator.
//!
//! The builder wires up the session, the command channel and the event bus,
//! opens the first turn, and spawns the worker that owns the encounter from
//! then on.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use combat_core::{CombatConfig, CombatSession, ComboRule, Outcome, Roster};

use crate::api::{EncounterHandle, Result, RuntimeError};
use crate::config::RuntimeConfig;
use crate::events::{Event, EventBus, Topic};
use crate::hooks::{EncounterHook, HookRegistry};
use crate::oracle::OracleManager;
use crate::workers::{Command, EncounterWorker};

/// What the worker hands back once every handle is dropped.
#[derive(Clone, Debug)]
pub struct EncounterSummary {
    pub outcome: Outcome,
    pub rounds: u32,
    /// The roster as the encounter left it, for the save layer.
    pub roster: Roster,
}

/// A running encounter: a handle for clients plus the worker task.
pub struct Encounter {
    handle: EncounterHandle,
    worker: JoinHandle<EncounterSummary>,
}

impl Encounter {
    /// Create a new encounter builder
    pub fn builder() -> EncounterBuilder {
        EncounterBuilder::new()
    }

    /// Get a cloneable handle to this encounter
    pub fn handle(&self) -> EncounterHandle {
        self.handle.clone()
    }

    /// Splits the encounter into its handle and the worker's join handle.
    pub fn into_parts(self) -> (EncounterHandle, JoinHandle<EncounterSummary>) {
        (self.handle, self.worker)
    }

    /// Drops this handle and waits for the worker. Other clones keep the
    /// worker alive until they are dropped too.
    pub async fn shutdown(self) -> Result<EncounterSummary> {
        drop(self.handle);
        self.worker.await.map_err(RuntimeError::WorkerJoin)
    }
}

/// Builder for [`Encounter`] with flexible configuration.
pub struct EncounterBuilder {
    config: RuntimeConfig,
    combat: CombatConfig,
    oracles: Option<OracleManager>,
    roster: Option<Roster>,
    hooks: HookRegistry,
    combos: Vec<Box<dyn ComboRule>>,
    bus: Option<EventBus>,
}

impl EncounterBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            combat: CombatConfig::default(),
            oracles: None,
            roster: None,
            hooks: HookRegistry::default(),
            combos: Vec::new(),
            bus: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override combat tuning
    pub fn combat_config(mut self, combat: CombatConfig) -> Self {
        self.combat = combat;
        self
    }

    /// Set required content oracles
    pub fn content(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set the participants. The roster is moved into the worker and handed
    /// back in [`EncounterSummary`].
    pub fn roster(mut self, roster: Roster) -> Self {
        self.roster = Some(roster);
        self
    }

    /// Adds an end-of-combat hook to the registry.
    pub fn hook(mut self, hook: Arc<dyn EncounterHook>) -> Self {
        self.hooks = self.hooks.with(hook);
        self
    }

    /// Replaces the hook registry entirely.
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    /// Registers a status combo rule on the session's status engine.
    pub fn combo(mut self, rule: Box<dyn ComboRule>) -> Self {
        self.combos.push(rule);
        self
    }

    /// Subscribe before the encounter starts, so the opening turn's
    /// notifications are not missed.
    pub fn subscribe(&mut self, topic: Topic) -> broadcast::Receiver<Event> {
        let capacity = self.config.event_buffer_size;
        self.bus
            .get_or_insert_with(|| EventBus::with_capacity(capacity))
            .subscribe(topic)
    }

    /// Open the first turn and spawn the worker.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(self) -> Result<Encounter> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingContent)?;
        let mut roster = self.roster.ok_or(RuntimeError::MissingRoster)?;
        let mut bus = self
            .bus
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size));

        let mut session = self
            .combos
            .into_iter()
            .fold(CombatSession::new(self.combat), CombatSession::with_combo);
        let opening = session.start(&mut roster, &mut bus)?;

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let handle = EncounterHandle::new(command_tx, bus.clone());

        let worker = EncounterWorker::new(
            session,
            roster,
            oracles,
            command_rx,
            bus,
            self.hooks,
            self.config,
        );
        let worker = tokio::spawn(worker.run(opening));

        Ok(Encounter { handle, worker })
    }
}
