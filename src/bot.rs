use anyhow::Result;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

use kamtor::config::Config;
use kamtor::exchange::{DataFetcher, MarketData};
use kamtor::trading::{ChangeWatcher, EntrySearch};

const BANNER: &str = r"
 K   A   M   T   O   R
";

/// Wires the two loops together: spawns them as supervised tasks, waits
/// for Ctrl+C, and flips a shared shutdown signal that stops both at
/// their next suspension point.
pub struct KamtorBot {
    config: Config,
    market: Arc<dyn MarketData>,
}

impl KamtorBot {
    pub fn new(config: Config, market: Arc<dyn MarketData>) -> Self {
        info!("{}", BANNER);
        info!("{}", "=".repeat(60));
        info!("Kamtor bot starting up");
        info!("Symbol: {} (quantity {})", config.symbol, config.quantity);
        info!(
            "Entry scan: {} x {} bars, every {:?}",
            config.entry_timeframe, config.entry_lookback, config.poll_interval
        );
        info!(
            "Watcher: {} hourly, every {:?}",
            config.watch_symbol, config.watch_interval
        );
        info!(
            "Orders: {}",
            if config.live_orders { "LIVE" } else { "inert" }
        );
        info!("{}", "=".repeat(60));

        Self { config, market }
    }

    pub async fn run(self) -> Result<()> {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let fetcher = DataFetcher::new(self.market.clone(), self.config.retry_cooldown);

        let search = EntrySearch::new(&self.config);
        let search_handle = tokio::spawn(search.run(
            fetcher.clone(),
            self.market.clone(),
            shutdown_rx.clone(),
        ));

        let watcher = ChangeWatcher::new(&self.config);
        let watcher_handle = tokio::spawn(watcher.run(fetcher, shutdown_rx));

        info!("Bot is now running. Press Ctrl+C to stop.");

        tokio::signal::ctrl_c().await?;
        info!("Shutting down...");
        let _ = shutdown_tx.send(true);

        let _ = search_handle.await;
        let _ = watcher_handle.await;

        info!("Bot stopped.");
        Ok(())
    }
}
