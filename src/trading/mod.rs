pub mod entry_search;
pub mod ledger;
pub mod watcher;

pub use entry_search::{EntrySearch, OpenPosition, SignalState, TradeEvent};
pub use ledger::{LedgerStats, TradeLedger, TradeRecord};
pub use watcher::ChangeWatcher;
