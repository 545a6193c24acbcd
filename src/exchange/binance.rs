use async_trait::async_trait;
use chrono::DateTime;
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde_json::Value;
use sha2::Sha256;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::Config;
use crate::exchange::{MarketData, MarketError, OrderSide};
use crate::models::{Candle, CandleSeries, Timeframe};

const BASE_URL: &str = "https://api.binance.com";
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(100);

type HmacSha256 = Hmac<Sha256>;

pub struct BinanceClient {
    client: Client,
    api_key: String,
    api_secret: String,
    base_url: String,
    last_request: Mutex<Option<Instant>>,
}

impl BinanceClient {
    pub fn new(cfg: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: cfg.api_key.clone(),
            api_secret: cfg.api_secret.clone(),
            base_url: BASE_URL.to_string(),
            last_request: Mutex::new(None),
        }
    }

    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < MIN_REQUEST_INTERVAL {
                tokio::time::sleep(MIN_REQUEST_INTERVAL - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn timestamp_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn sign(&self, query: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.api_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(query.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// One kline row is a mixed JSON array:
    /// [openTime, "open", "high", "low", "close", "volume", closeTime, ...].
    /// Only the first six columns are kept.
    fn parse_kline(row: &[Value]) -> Option<Candle> {
        let ts_ms = row.first()?.as_i64()?;
        let timestamp = DateTime::from_timestamp_millis(ts_ms)?;
        let field = |i: usize| -> Option<f64> { row.get(i)?.as_str()?.parse::<f64>().ok() };
        Some(Candle {
            timestamp,
            open: field(1)?,
            high: field(2)?,
            low: field(3)?,
            close: field(4)?,
            volume: field(5)?,
        })
    }
}

#[async_trait]
impl MarketData for BinanceClient {
    async fn fetch_klines(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<CandleSeries, MarketError> {
        self.rate_limit().await;

        let resp = self
            .client
            .get(format!("{}/api/v3/klines", self.base_url))
            .query(&[
                ("symbol", symbol.to_string()),
                ("interval", timeframe.binance_interval().to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MarketError::Api { status, body });
        }

        let rows: Vec<Vec<Value>> = resp.json().await?;
        let mut candles = Vec::with_capacity(rows.len());
        for row in &rows {
            match Self::parse_kline(row) {
                Some(c) => candles.push(c),
                None => {
                    return Err(MarketError::Malformed(format!(
                        "unparseable kline row for {symbol}"
                    )))
                }
            }
        }

        // Binance returns oldest first already; sort defends the provider contract.
        candles.sort_by_key(|c| c.timestamp);

        Ok(CandleSeries::new(candles))
    }

    async fn place_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: f64,
    ) -> Result<(), MarketError> {
        self.rate_limit().await;

        let params = format!(
            "symbol={}&side={}&type=MARKET&quantity={}&timestamp={}",
            symbol,
            side,
            quantity,
            Self::timestamp_ms()
        );
        let signature = self.sign(&params);
        let body = format!("{params}&signature={signature}");

        debug!(%symbol, %side, quantity, "submitting market order");

        let resp = self
            .client
            .post(format!("{}/api/v3/order", self.base_url))
            .header("X-MBX-APIKEY", &self.api_key)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(MarketError::Api { status, body });
        }

        Ok(())
    }
}
