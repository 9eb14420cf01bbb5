//! Deterministic rules for turn-based party combat.
//!
//! `combat-core` holds the encounter rules: the unit model, status effects,
//! damage, action cards, enemy decisions and the turn scheduler, composed by
//! [`session::CombatSession`]. Nothing here performs I/O or spawns tasks;
//! the runtime drives a session step by step and decides where emitted
//! [`event::CombatEvent`]s go.
pub mod ai;
pub mod card;
pub mod config;
pub mod damage;
pub mod env;
pub mod error;
pub mod event;
pub mod session;
pub mod state;
pub mod status;
pub mod turn;

pub use ai::{Archetype, EnemyAction, EnemyPolicy};
pub use card::{ActionCard, ActionResult, CardError, CardFacets, CardResolver};
pub use config::CombatConfig;
pub use damage::DamageResolver;
pub use env::{
    Ability, AbilityKind, AbilityOracle, CardOracle, CombatEnv, Env, OracleError, PcgRng,
    RngOracle,
};
pub use error::{CombatError, ErrorSeverity};
pub use event::{CombatEvent, EventSink, MessageKind, NullSink};
pub use session::{Awaiting, CombatSession, Phase, SessionError, SessionView, UnitView};
pub use state::{
    AbilityId, CardId, Inventory, ItemId, Roster, Side, Stat, StatusEffect, StatusEffectKind,
    Unit, UnitId, UnitStats,
};
pub use status::{ComboRule, StatusEffectEngine, TurnStartReport};
pub use turn::{Advance, FixedSeniority, Outcome, TurnOrderPolicy, TurnParticipant, TurnScheduler};
