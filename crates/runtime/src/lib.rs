//! Async orchestration for a single combat encounter.
//!
//! The rules in `combat-core` are synchronous and step driven. This crate
//! runs one [`combat_core::CombatSession`] inside a worker task, feeds it
//! commands from cloneable [`EncounterHandle`]s, gives enemies an
//! artificial "thinking" delay, and fans out notifications over a
//! topic-based [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the encounter builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`hooks`] runs end-of-combat collaborators such as reward grants
//! - [`config`] reads runtime tuning from the environment
//! - [`oracle`] bundles the content tables the session consults
pub mod api;
pub mod config;
pub mod events;
pub mod hooks;
pub mod oracle;
pub mod runtime;

mod workers;

pub use api::{
    AutopilotProvider, EncounterHandle, HeroCommand, HeroCommandProvider, PassProvider, Result,
    RuntimeError,
};
pub use config::RuntimeConfig;
pub use events::{EncounterEvent, Event, EventBus, Topic};
pub use hooks::{
    EncounterHook, HookContext, HookCriticality, HookError, HookRegistry, OutcomeLogHook,
};
pub use oracle::OracleManager;
pub use runtime::{Encounter, EncounterBuilder, EncounterSummary};
