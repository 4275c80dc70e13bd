//! Market data access

pub mod fetcher;
pub mod yahoo;

pub use fetcher::{DataFetcher, HISTORY_INTERVAL, HISTORY_RANGE, normalize_symbol};
pub use yahoo::YahooFinanceClient;

use crate::error::Result;
use crate::models::PriceBar;
use async_trait::async_trait;

/// Source of daily OHLCV history
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Raw bars for `symbol`, e.g. `interval = "1d"`, `range = "6mo"`.
    ///
    /// Rows may be unsorted or contain gaps; the caller normalizes them.
    async fn daily_history(&self, symbol: &str, interval: &str, range: &str)
    -> Result<Vec<PriceBar>>;
}
