pub mod macd;

pub use macd::{is_entry_signal, is_exit_signal, macd_diff, MIN_LOOKBACK};
