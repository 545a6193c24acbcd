use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::exchange::{DataFetcher, MarketData, OrderSide};
use crate::models::{CandleSeries, Timeframe};
use crate::strategies::{is_entry_signal, is_exit_signal};
use crate::trading::ledger::{percent_change, LedgerStats, TradeLedger, TradeRecord};

/// What the loop is currently hunting for. Exactly one side is active;
/// the machine alternates on confirmed crossovers and never terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    AwaitingEntry,
    AwaitingExit,
}

/// Exists only between a buy signal and the matching sell signal.
#[derive(Debug, Clone, Copy)]
pub struct OpenPosition {
    pub entry_price: f64,
}

#[derive(Debug, Clone)]
pub enum TradeEvent {
    Entered {
        price: f64,
    },
    Exited {
        record: TradeRecord,
        stats: LedgerStats,
    },
}

/// The alternating buy/sell search over freshly fetched candles.
/// Owns the open position and the trade ledger.
pub struct EntrySearch {
    symbol: String,
    quantity: f64,
    timeframe: Timeframe,
    lookback: usize,
    poll_interval: Duration,
    live_orders: bool,
    state: SignalState,
    position: Option<OpenPosition>,
    ledger: TradeLedger,
}

impl EntrySearch {
    pub fn new(cfg: &Config) -> Self {
        Self {
            symbol: cfg.symbol.clone(),
            quantity: cfg.quantity,
            timeframe: cfg.entry_timeframe,
            lookback: cfg.entry_lookback,
            poll_interval: cfg.poll_interval,
            live_orders: cfg.live_orders,
            state: SignalState::AwaitingEntry,
            position: None,
            ledger: TradeLedger::new(),
        }
    }

    pub fn state(&self) -> SignalState {
        self.state
    }

    pub fn position(&self) -> Option<&OpenPosition> {
        self.position.as_ref()
    }

    pub fn ledger(&self) -> &TradeLedger {
        &self.ledger
    }

    /// One evaluation of the state machine against a fetched series.
    /// Entry and exit both act on the close of the latest candle.
    pub fn step(&mut self, series: &CandleSeries) -> Option<TradeEvent> {
        if series.len() < 2 {
            warn!(
                symbol = %self.symbol,
                bars = series.len(),
                "series too short for signal evaluation, skipping"
            );
            return None;
        }

        match self.state {
            SignalState::AwaitingEntry => {
                if !is_entry_signal(series) {
                    return None;
                }
                let price = series.last()?.close;
                self.position = Some(OpenPosition { entry_price: price });
                self.state = SignalState::AwaitingExit;
                Some(TradeEvent::Entered { price })
            }
            SignalState::AwaitingExit => {
                if !is_exit_signal(series) {
                    return None;
                }
                let exit_price = series.last()?.close;
                let position = self.position.take()?;
                let record = TradeRecord {
                    entry_price: position.entry_price,
                    exit_price,
                    percent_change: percent_change(position.entry_price, exit_price),
                };
                self.ledger.append(record.clone());
                self.state = SignalState::AwaitingEntry;
                Some(TradeEvent::Exited {
                    record,
                    stats: self.ledger.stats(),
                })
            }
        }
    }

    /// Fetch, evaluate, report, sleep; forever. Stops at the next
    /// suspension point once the shutdown signal flips.
    pub async fn run(
        mut self,
        fetcher: DataFetcher,
        market: Arc<dyn MarketData>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        loop {
            let series = tokio::select! {
                s = fetcher.fetch(&self.symbol, self.timeframe, self.lookback) => s,
                _ = shutdown.changed() => return,
            };

            if let Some(event) = self.step(&series) {
                self.report(&event, market.as_ref()).await;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = shutdown.changed() => return,
            }
        }
    }

    async fn report(&self, event: &TradeEvent, market: &dyn MarketData) {
        match event {
            TradeEvent::Entered { price } => {
                info!(
                    "Buy signal. New market order. Price: {} Quantity: {}",
                    price, self.quantity
                );
                self.place_order(market, OrderSide::Buy).await;
            }
            TradeEvent::Exited { record, stats } => {
                info!(
                    "Sell signal. New market order. Price: {} Quantity: {}",
                    record.exit_price, self.quantity
                );
                info!(
                    "Sum all orders: {:.4}% | Count orders: {} | Positive orders: {}",
                    stats.cumulative_percent, stats.trade_count, stats.profitable_count
                );
                self.place_order(market, OrderSide::Sell).await;
            }
        }
    }

    async fn place_order(&self, market: &dyn MarketData, side: OrderSide) {
        if !self.live_orders {
            return;
        }
        if let Err(e) = market
            .place_market_order(&self.symbol, side, self.quantity)
            .await
        {
            error!(symbol = %self.symbol, %side, "order placement failed: {e}");
        }
    }
}
