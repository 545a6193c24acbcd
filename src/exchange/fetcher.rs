use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::exchange::MarketData;
use crate::models::{CandleSeries, Timeframe};

/// Wraps the provider with a blocking-retry policy: a failed request is
/// logged, the calling loop sleeps out the cooldown, and the identical
/// request is reissued until it succeeds. Callers never see a provider
/// error, only latency.
#[derive(Clone)]
pub struct DataFetcher {
    market: Arc<dyn MarketData>,
    cooldown: Duration,
}

impl DataFetcher {
    pub fn new(market: Arc<dyn MarketData>, cooldown: Duration) -> Self {
        Self { market, cooldown }
    }

    pub async fn fetch(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> CandleSeries {
        loop {
            match self.market.fetch_klines(symbol, timeframe, limit).await {
                Ok(series) => return series,
                Err(e) => {
                    warn!(
                        %symbol,
                        %timeframe,
                        cooldown_secs = self.cooldown.as_secs(),
                        "kline fetch failed, retrying after cooldown: {e}"
                    );
                    tokio::time::sleep(self.cooldown).await;
                }
            }
        }
    }
}
