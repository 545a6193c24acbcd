use crate::models::CandleSeries;

pub const FAST_PERIOD: usize = 12;
pub const SLOW_PERIOD: usize = 26;
pub const SIGNAL_PERIOD: usize = 9;

/// Bars of history needed before the oscillator has settled enough to
/// trust a crossover. Configurations requesting less are rejected.
pub const MIN_LOOKBACK: usize = SLOW_PERIOD + 1;

/// Recursive EMA over the whole input, seeded with the first value.
/// One output per input.
fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    let alpha = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = match values.first() {
        Some(&v) => v,
        None => return out,
    };
    out.push(ema);
    for &v in &values[1..] {
        ema = alpha * v + (1.0 - alpha) * ema;
        out.push(ema);
    }
    out
}

/// MACD histogram: EMA(12) - EMA(26), minus the EMA(9) of that
/// difference. One scalar per close.
pub fn macd_diff(closes: &[f64]) -> Vec<f64> {
    let fast = ema_series(closes, FAST_PERIOD);
    let slow = ema_series(closes, SLOW_PERIOD);
    let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
    let signal = ema_series(&macd, SIGNAL_PERIOD);
    macd.iter().zip(&signal).map(|(m, s)| m - s).collect()
}

/// Oscillator crossed from non-positive to positive on the latest bar.
pub fn is_entry_signal(series: &CandleSeries) -> bool {
    crossed(series, |prev, last| last > 0.0 && prev <= 0.0)
}

/// Oscillator crossed from non-negative to negative on the latest bar.
pub fn is_exit_signal(series: &CandleSeries) -> bool {
    crossed(series, |prev, last| last < 0.0 && prev >= 0.0)
}

fn crossed(series: &CandleSeries, edge: impl Fn(f64, f64) -> bool) -> bool {
    if series.len() < 2 {
        return false;
    }
    let diff = macd_diff(&series.closes());
    edge(diff[diff.len() - 2], diff[diff.len() - 1])
}
