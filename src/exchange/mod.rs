pub mod binance;
pub mod fetcher;

pub use binance::BinanceClient;
pub use fetcher::DataFetcher;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::models::{CandleSeries, Timeframe};

/// Provider failures. All of these are treated as transient by the
/// fetch layer and answered with a cooldown and a retry.
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed kline response: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch the most recent `limit` candles for `symbol`, oldest first.
    async fn fetch_klines(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries, MarketError>;

    /// Submit a market order. Only called when live orders are enabled.
    async fn place_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: f64,
    ) -> Result<(), MarketError>;
}
