//! Yahoo Finance API client

use crate::api::PriceProvider;
use crate::error::{DashboardError, Result};
use crate::models::PriceBar;
use async_trait::async_trait;
use chrono::DateTime;
use yahoo_finance_api as yahoo;

/// Yahoo Finance API client
#[derive(Debug, Clone, Default)]
pub struct YahooFinanceClient {}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }

    /// Get quotes for a symbol over a named range ("1mo", "6mo", "1y", ...)
    pub async fn get_quote_range(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<PriceBar>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| DashboardError::ProviderError(e.to_string()))?;

        let response = provider
            .get_quote_range(symbol, interval, range)
            .await
            .map_err(|e| DashboardError::ProviderError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| DashboardError::ProviderError(e.to_string()))?;

        Ok(quotes
            .iter()
            .filter_map(|q| {
                let date = DateTime::from_timestamp(q.timestamp as i64, 0)?.date_naive();
                Some(PriceBar {
                    date,
                    open: q.open,
                    high: q.high,
                    low: q.low,
                    close: q.close,
                    volume: q.volume,
                })
            })
            .collect())
    }
}

#[async_trait]
impl PriceProvider for YahooFinanceClient {
    async fn daily_history(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<PriceBar>> {
        self.get_quote_range(symbol, interval, range).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceSeries;

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_six_month_history() {
        let client = YahooFinanceClient::new();
        let bars = client.get_quote_range("AAPL", "1d", "6mo").await.unwrap();
        let series = PriceSeries::from_bars("AAPL", bars);

        assert!(series.len() >= 30);
        assert!(series.dates().windows(2).all(|w| w[0] < w[1]));
        assert!(series.bars().iter().all(PriceBar::is_valid));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_unknown_symbol() {
        let client = YahooFinanceClient::new();
        let result = client.get_quote_range("INVALID_SYMBOL_12345", "1d", "6mo").await;
        assert!(result.map(|bars| bars.is_empty()).unwrap_or(true));
    }
}
