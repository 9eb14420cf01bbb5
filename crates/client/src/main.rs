//! Skirmish: a headless encounter runner.
//!
//! This binary is the composition root that assembles:
//! 1. Content (cards, abilities, enemies, party, tuning) from `CONTENT_DIR`
//! 2. An encounter via the runtime's `EncounterBuilder`
//! 3. An autopilot that plays the heroes
//!
//! Narration is printed to stdout, logs go to stderr.
//!
//! # Environment
//!
//! - `CONTENT_DIR` - content directory (default: `data`)
//! - `ENCOUNTER_ENEMIES` - comma-separated enemy template ids
//!   (default: `goblin,shaman,witch`)
//! - `RUST_LOG` - log filter (default: `info`)
//! - runtime timing, see `RuntimeConfig::from_env`
//!
//! ```bash
//! ENEMY_THINK_DELAY_MS=0 cargo run -p combat-client
//! ```

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use combat_content::ContentFactory;
use combat_core::{CombatEvent, Side};
use combat_runtime::{
    AutopilotProvider, Encounter, Event, OracleManager, RuntimeConfig, Topic,
};
use tokio::sync::broadcast;

const DEFAULT_CONTENT_DIR: &str = "data";
const DEFAULT_ENEMIES: &str = "goblin,shaman,witch";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let runtime_config = RuntimeConfig::from_env();
    let content_dir = env::var("CONTENT_DIR").unwrap_or_else(|_| DEFAULT_CONTENT_DIR.to_owned());
    let enemies = env::var("ENCOUNTER_ENEMIES").unwrap_or_else(|_| DEFAULT_ENEMIES.to_owned());

    let bundle = ContentFactory::new(&content_dir)
        .load_all()
        .with_context(|| format!("loading content from {content_dir}"))?;

    let roster = bundle.roster(enemies.split(',').map(str::trim).filter(|id| !id.is_empty()));
    if roster.enemies().is_empty() {
        anyhow::bail!("no known enemy templates in ENCOUNTER_ENEMIES={enemies}");
    }

    let cards = Arc::new(bundle.cards.clone());
    let oracles = OracleManager::new(cards.clone(), Arc::new(bundle.abilities.clone()));

    let mut builder = Encounter::builder()
        .config(runtime_config)
        .combat_config(bundle.config.clone())
        .content(oracles)
        .roster(roster);
    let narration = builder.subscribe(Topic::Narration);
    let narrator = tokio::spawn(narrate(narration));

    let encounter = builder.start()?;
    tracing::info!(content = %content_dir, enemies = %enemies, "encounter started");

    let handle = encounter.handle();
    let view = handle.drive_heroes(&AutopilotProvider::new(cards)).await?;
    drop(handle);

    let summary = encounter.shutdown().await?;
    narrator.await.context("narrator task failed")?;

    println!();
    println!("Outcome: {:?} after {} round(s)", view.outcome, summary.rounds);
    for unit in summary.roster.living(Side::Hero) {
        println!("  {} {}/{} hp", unit.name, unit.hp, unit.max_hp);
    }

    Ok(())
}

/// Prints narration until the encounter's bus closes.
async fn narrate(mut rx: broadcast::Receiver<Event>) {
    loop {
        match rx.recv().await {
            Ok(Event::Combat(CombatEvent::ShowMessage { text, kind })) => {
                println!("[{kind}] {text}");
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "narration lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
