//! Runtime configuration for the Grepolis stats server.

use once_cell::sync::Lazy;
use std::env;

#[derive(Debug)]
pub struct Settings {
    /// Grepolis world whose data files are polled (e.g. "br137").
    pub game_world: String,
    /// Seconds between two data refresh cycles.
    pub refresh_interval: u64,
    /// Seconds an issued JWT stays valid.
    pub token_ttl: u64,
}

impl Settings {
    fn from_env() -> Self {
        let game_world = env::var("GAME_WORLD").unwrap_or_else(|_| "br137".into());

        let refresh_interval = env::var("REFRESH_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(3600); // upstream regenerates the files hourly

        let token_ttl = env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(3600);

        Settings {
            game_world,
            refresh_interval,
            token_ttl,
        }
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}
