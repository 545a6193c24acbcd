mod bot;

use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

use kamtor::config::Config;
use kamtor::exchange::BinanceClient;

use crate::bot::KamtorBot;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    cfg.validate()?;

    let market = Arc::new(BinanceClient::new(&cfg));

    let bot = KamtorBot::new(cfg, market);
    bot.run().await?;

    Ok(())
}
