//! Runtime tuning read from the environment.
use std::env;
use std::time::Duration;

/// Timing and channel sizing for an encounter worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Delay between an enemy becoming active and its action resolving.
    pub enemy_think_delay: Duration,
    /// Delay before a unit that cannot act has its turn passed.
    pub skip_turn_delay: Duration,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl RuntimeConfig {
    pub const DEFAULT_ENEMY_THINK_DELAY_MS: u64 = 600;
    pub const DEFAULT_SKIP_TURN_DELAY_MS: u64 = 400;

    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `ENEMY_THINK_DELAY_MS` (default: 600)
    /// - `SKIP_TURN_DELAY_MS` (default: 400)
    /// - `EVENT_BUFFER_SIZE` per topic (default: 256, minimum 1)
    /// - `COMMAND_BUFFER_SIZE` (default: 32, minimum 1)
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(ms) = read_env::<u64>("ENEMY_THINK_DELAY_MS") {
            config.enemy_think_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = read_env::<u64>("SKIP_TURN_DELAY_MS") {
            config.skip_turn_delay = Duration::from_millis(ms);
        }
        if let Some(size) = read_env::<usize>("EVENT_BUFFER_SIZE") {
            config.event_buffer_size = size.max(1);
        }
        if let Some(size) = read_env::<usize>("COMMAND_BUFFER_SIZE") {
            config.command_buffer_size = size.max(1);
        }

        config
    }

    /// No artificial delays. Useful for tests and headless simulations.
    pub fn immediate() -> Self {
        Self {
            enemy_think_delay: Duration::ZERO,
            skip_turn_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            enemy_think_delay: Duration::from_millis(Self::DEFAULT_ENEMY_THINK_DELAY_MS),
            skip_turn_delay: Duration::from_millis(Self::DEFAULT_SKIP_TURN_DELAY_MS),
            event_buffer_size: 256,
            command_buffer_size: 32,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
