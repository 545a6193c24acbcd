use chrono::{DateTime, Duration, Utc};

use crate::config::Config;
use crate::models::{Candle, CandleSeries, Timeframe};

fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-15T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Create candles from (open, high, low, close) tuples with auto-incrementing
/// 1m timestamps.
pub fn make_candles(data: &[(f64, f64, f64, f64)]) -> CandleSeries {
    let base = base_time();
    let candles: Vec<Candle> = data
        .iter()
        .enumerate()
        .map(|(i, &(o, h, l, c))| Candle {
            timestamp: base + Duration::minutes(i as i64),
            open: o,
            high: h,
            low: l,
            close: c,
            volume: 100.0,
        })
        .collect();
    CandleSeries::new(candles)
}

/// Flat candles driven purely by a close-price sequence, for signal tests.
pub fn candles_from_closes(closes: &[f64]) -> CandleSeries {
    let base = base_time();
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

/// A Config suitable for testing: dummy credentials, inert orders, short sleeps.
pub fn default_test_config() -> Config {
    Config {
        api_key: "test-key".to_string(),
        api_secret: "test-secret".to_string(),
        symbol: "ETHBTC".to_string(),
        quantity: 0.0,
        entry_timeframe: Timeframe::M1,
        entry_lookback: 40,
        poll_interval: std::time::Duration::from_secs(5),
        watch_symbol: "ETHUSDT".to_string(),
        watch_timeframe: Timeframe::H1,
        watch_lookback: 3,
        watch_interval: std::time::Duration::from_secs(60),
        retry_cooldown: std::time::Duration::from_secs(60),
        live_orders: false,
        log_level: "error".to_string(),
    }
}
