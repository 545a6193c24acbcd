use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::VecDeque;
use std::sync::Mutex;

use kamtor::exchange::{MarketData, MarketError, OrderSide};
use kamtor::models::{Candle, CandleSeries, Timeframe};

/// Flat candles driven purely by a close-price sequence.
pub fn candles_from_closes(closes: &[f64]) -> CandleSeries {
    let base = DateTime::parse_from_rfc3339("2024-01-15T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    let candles: Vec<Candle> = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| Candle {
            timestamp: base + Duration::minutes(i as i64),
            open: c,
            high: c + 1.0,
            low: c - 1.0,
            close: c,
            volume: 100.0,
        })
        .collect();
    CandleSeries::new(candles)
}

/// One scripted provider response: a series, or a transient failure.
pub enum Scripted {
    Ok(CandleSeries),
    Fail,
}

/// A provider stub that plays back a script of responses and records
/// every order it is asked to place. Once the script is exhausted it
/// keeps returning `fallback`.
pub struct MockMarket {
    script: Mutex<VecDeque<Scripted>>,
    fallback: CandleSeries,
    pub calls: Mutex<usize>,
    pub orders: Mutex<Vec<(String, String, f64)>>,
}

impl MockMarket {
    pub fn new(script: Vec<Scripted>, fallback: CandleSeries) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: Mutex::new(0),
            orders: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    pub fn placed_orders(&self) -> Vec<(String, String, f64)> {
        self.orders.lock().unwrap().clone()
    }
}

#[async_trait]
impl MarketData for MockMarket {
    async fn fetch_klines(
        &self,
        _symbol: &str,
        _timeframe: Timeframe,
        _limit: usize,
    ) -> Result<CandleSeries, MarketError> {
        *self.calls.lock().unwrap() += 1;
        match self.script.lock().unwrap().pop_front() {
            Some(Scripted::Ok(series)) => Ok(series),
            Some(Scripted::Fail) => Err(MarketError::Malformed("scripted failure".into())),
            None => Ok(self.fallback.clone()),
        }
    }

    async fn place_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: f64,
    ) -> Result<(), MarketError> {
        self.orders
            .lock()
            .unwrap()
            .push((symbol.to_string(), side.to_string(), quantity));
        Ok(())
    }
}
