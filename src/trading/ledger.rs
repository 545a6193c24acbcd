use serde::{Deserialize, Serialize};

/// One completed round trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeRecord {
    pub entry_price: f64,
    pub exit_price: f64,
    pub percent_change: f64,
}

/// Derived statistics over the ledger, computed on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerStats {
    pub cumulative_percent: f64,
    pub trade_count: usize,
    pub profitable_count: usize,
}

/// Append-only record of completed trades, insertion order chronological.
/// Owned exclusively by the entry-search loop; nothing else writes to it.
#[derive(Debug, Default)]
pub struct TradeLedger {
    records: Vec<TradeRecord>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: TradeRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }

    pub fn stats(&self) -> LedgerStats {
        LedgerStats {
            cumulative_percent: self.records.iter().map(|r| r.percent_change).sum(),
            trade_count: self.records.len(),
            // Intentionally the raw price difference, not the sign of
            // percent_change.
            profitable_count: self
                .records
                .iter()
                .filter(|r| r.exit_price - r.entry_price >= 0.0)
                .count(),
        }
    }
}

/// Percentage gained over a round trip, in the source's formulation.
pub fn percent_change(entry_price: f64, exit_price: f64) -> f64 {
    100.0 - (100.0 * entry_price) / exit_price
}
