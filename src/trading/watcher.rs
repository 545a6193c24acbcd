use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

use crate::config::Config;
use crate::exchange::DataFetcher;
use crate::models::{CandleSeries, Timeframe};

/// Alert when the last full hourly bar moved at least this much, in percent.
pub const ALERT_THRESHOLD_PCT: f64 = 1.0;

/// Percent move of the most recently closed full bar. The final bar in a
/// fetched batch is still forming, so the second-to-last one is used.
pub fn hourly_move(series: &CandleSeries) -> Option<f64> {
    if series.len() < 2 {
        return None;
    }
    let bar = series.get(series.len() - 2)?;
    Some((bar.close - bar.open) * 100.0 / bar.open)
}

/// Independent loop reporting large swings on a reference symbol. Shares
/// nothing with the entry-search loop beyond the provider itself.
pub struct ChangeWatcher {
    symbol: String,
    timeframe: Timeframe,
    lookback: usize,
    interval: Duration,
}

impl ChangeWatcher {
    pub fn new(cfg: &Config) -> Self {
        Self {
            symbol: cfg.watch_symbol.clone(),
            timeframe: cfg.watch_timeframe,
            lookback: cfg.watch_lookback,
            interval: cfg.watch_interval,
        }
    }

    pub async fn run(self, fetcher: DataFetcher, mut shutdown: watch::Receiver<bool>) {
        loop {
            let series = tokio::select! {
                s = fetcher.fetch(&self.symbol, self.timeframe, self.lookback) => s,
                _ = shutdown.changed() => return,
            };

            if let Some(pct) = hourly_move(&series) {
                if pct.abs() >= ALERT_THRESHOLD_PCT {
                    info!("{} moved {:.2}% over the last hour", self.symbol, pct);
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = shutdown.changed() => return,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::make_candles;

    #[test]
    fn large_move_crosses_threshold() {
        // Closed bar: open 2000 -> close 2030 (+1.5%). Last bar still forming.
        let series = make_candles(&[
            (1990.0, 2005.0, 1985.0, 2000.0),
            (2000.0, 2035.0, 1998.0, 2030.0),
            (2030.0, 2032.0, 2029.0, 2031.0),
        ]);
        let pct = hourly_move(&series).unwrap();
        assert!((pct - 1.5).abs() < 1e-9);
        assert!(pct.abs() >= ALERT_THRESHOLD_PCT);
    }

    #[test]
    fn small_move_stays_quiet() {
        let series = make_candles(&[
            (2000.0, 2010.0, 1995.0, 2005.0),
            (2005.0, 2006.0, 2004.0, 2005.5),
        ]);
        let pct = hourly_move(&series).unwrap();
        assert!((pct - 0.25).abs() < 1e-9);
        assert!(pct.abs() < ALERT_THRESHOLD_PCT);
    }

    #[test]
    fn negative_move_uses_absolute_value() {
        let series = make_candles(&[
            (2000.0, 2001.0, 1960.0, 1970.0),
            (1970.0, 1971.0, 1969.0, 1970.5),
        ]);
        let pct = hourly_move(&series).unwrap();
        assert!((pct + 1.5).abs() < 1e-9);
        assert!(pct.abs() >= ALERT_THRESHOLD_PCT);
    }

    #[test]
    fn too_short_series_yields_nothing() {
        let series = make_candles(&[(2000.0, 2010.0, 1990.0, 2005.0)]);
        assert!(hourly_move(&series).is_none());
        assert!(hourly_move(&make_candles(&[])).is_none());
    }
}
