use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::models::Timeframe;
use crate::strategies::MIN_LOOKBACK;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Exchange credentials
    pub api_key: String,
    pub api_secret: String,

    // Entry-search loop
    pub symbol: String,
    pub quantity: f64,
    pub entry_timeframe: Timeframe,
    pub entry_lookback: usize,
    pub poll_interval: Duration,

    // Hourly-change watcher
    pub watch_symbol: String,
    pub watch_timeframe: Timeframe,
    pub watch_lookback: usize,
    pub watch_interval: Duration,

    // Fetch retry
    pub retry_cooldown: Duration,

    // Orders stay inert unless explicitly enabled
    pub live_orders: bool,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        Config {
            api_key: env("API_KEY", ""),
            api_secret: env("SECRET", ""),
            symbol: env("SYMBOL", "ETHBTC"),
            quantity: env("QUANTITY", "0").parse().unwrap_or(0.0),
            entry_timeframe: Timeframe::from_str_loose(&env("ENTRY_INTERVAL", "1m"))
                .unwrap_or(Timeframe::M1),
            entry_lookback: env("ENTRY_LOOKBACK", "40").parse().unwrap_or(40),
            poll_interval: Duration::from_secs(
                env("POLL_SECS", "5").parse().unwrap_or(5),
            ),
            watch_symbol: env("WATCH_SYMBOL", "ETHUSDT"),
            watch_timeframe: Timeframe::H1,
            watch_lookback: env("WATCH_LOOKBACK", "3").parse().unwrap_or(3),
            watch_interval: Duration::from_secs(
                env("WATCH_SECS", "60").parse().unwrap_or(60),
            ),
            retry_cooldown: Duration::from_secs(
                env("RETRY_COOLDOWN_SECS", "60").parse().unwrap_or(60),
            ),
            live_orders: env("LIVE_ORDERS", "false").to_lowercase() == "true",
            log_level: env("LOG_LEVEL", "info"),
        }
    }

    /// Startup errors are fatal: bad credentials or a lookback too short
    /// for the oscillator warm-up must abort before either loop starts.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() || self.api_secret.is_empty() {
            bail!("API_KEY and SECRET must be set");
        }
        if self.entry_lookback < MIN_LOOKBACK {
            bail!(
                "ENTRY_LOOKBACK {} is below the oscillator warm-up of {} bars",
                self.entry_lookback,
                MIN_LOOKBACK
            );
        }
        if self.watch_lookback < 2 {
            bail!("WATCH_LOOKBACK must be at least 2 bars");
        }
        Ok(())
    }
}
