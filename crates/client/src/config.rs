//! Client configuration structures and loaders.
use std::env;

use delve_runtime::SessionConfig;

/// Configuration for one headless run.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub session: SessionConfig,
    /// Commands the autopilot submits before giving up.
    pub max_turns: u32,
    /// Messages printed from the end of the log once the run stops.
    pub log_tail: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            max_turns: 2_000,
            log_tail: 30,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables (on top of those read by [`SessionConfig::from_env`]):
    /// - `DELVE_MAX_TURNS` - Commands to submit before stopping (default: 2000)
    /// - `DELVE_LOG_TAIL` - Messages printed at the end (default: 30)
    pub fn from_env() -> Self {
        let mut config = Self {
            session: SessionConfig::from_env(),
            ..Self::default()
        };

        if let Some(turns) = read_env::<u32>("DELVE_MAX_TURNS") {
            config.max_turns = turns.max(1);
        }

        if let Some(tail) = read_env::<usize>("DELVE_LOG_TAIL") {
            config.log_tail = tail;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
