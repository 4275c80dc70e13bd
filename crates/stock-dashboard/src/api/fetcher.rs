//! Six-month daily history fetch with empty-result collapse

use crate::api::PriceProvider;
use crate::error::{DashboardError, Result};
use crate::models::PriceSeries;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Fixed lookback requested from the provider
pub const HISTORY_RANGE: &str = "6mo";
/// Fixed bar resolution requested from the provider
pub const HISTORY_INTERVAL: &str = "1d";

/// Trim and upper-case a ticker, rejecting blanks and embedded whitespace.
pub fn normalize_symbol(ticker: &str) -> Result<String> {
    let symbol = ticker.trim();
    if symbol.is_empty() {
        return Err(DashboardError::InvalidSymbol(
            "ticker must not be empty".to_string(),
        ));
    }
    if symbol.chars().any(char::is_whitespace) {
        return Err(DashboardError::InvalidSymbol(symbol.to_string()));
    }
    Ok(symbol.to_uppercase())
}

/// Turns a ticker into a [`PriceSeries`] or [`DashboardError::EmptyData`]
#[derive(Clone)]
pub struct DataFetcher {
    provider: Arc<dyn PriceProvider>,
    timeout: Duration,
}

impl DataFetcher {
    pub fn new(provider: Arc<dyn PriceProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Fetch the trailing six months of daily bars.
    ///
    /// Provider errors, timeouts and empty responses all become
    /// `EmptyData`; the underlying cause is kept in its `reason`.
    pub async fn fetch(&self, ticker: &str) -> Result<PriceSeries> {
        let symbol = normalize_symbol(ticker)?;

        let request = self
            .provider
            .daily_history(&symbol, HISTORY_INTERVAL, HISTORY_RANGE);
        let bars = match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(bars)) => bars,
            Ok(Err(e)) => {
                warn!(symbol = %symbol, error = %e, "price fetch failed");
                return Err(DashboardError::EmptyData {
                    symbol,
                    reason: e.to_string(),
                });
            }
            Err(_) => {
                warn!(symbol = %symbol, timeout = ?self.timeout, "price fetch timed out");
                return Err(DashboardError::EmptyData {
                    symbol,
                    reason: format!("request timed out after {:?}", self.timeout),
                });
            }
        };

        let series = PriceSeries::from_bars(symbol.clone(), bars);
        if series.is_empty() {
            warn!(symbol = %symbol, "provider returned no usable rows");
            return Err(DashboardError::EmptyData {
                symbol,
                reason: "no price rows returned".to_string(),
            });
        }

        info!(
            symbol = %symbol,
            rows = series.len(),
            first = ?series.bars().first().map(|b| b.date),
            last = ?series.last_date(),
            "fetched price history"
        );
        Ok(series)
    }
}
