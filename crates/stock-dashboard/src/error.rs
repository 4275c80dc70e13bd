//! Error types for dashboard operations

use thiserror::Error;

/// Failure to compose or deliver an emailed report
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to send email: {reason}")]
pub struct DeliveryError {
    /// Underlying cause, shown to the user verbatim
    pub reason: String,
}

impl DeliveryError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Dashboard specific errors
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Provider returned no rows for the ticker
    #[error("Failed to fetch data for {symbol}: {reason}. Please check the stock ticker and try again.")]
    EmptyData {
        symbol: String,
        reason: String,
    },

    /// A forecasting strategy could not be fitted
    #[error("{strategy} model failed to fit: {reason}")]
    ModelFit {
        strategy: String,
        reason: String,
    },

    /// Report could not be composed or delivered
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// Market data provider failed; the fetcher reports this as empty data
    #[error("Market data provider error: {0}")]
    ProviderError(String),

    /// Invalid stock symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Forecast horizon outside the supported range
    #[error("Horizon must be between {min} and {max} business days, got {value}")]
    InvalidHorizon {
        value: i64,
        min: u32,
        max: u32,
    },

    /// Strategy name not recognised
    #[error("Unknown prediction method: {0}")]
    UnknownStrategy(String),

    /// Command parsing error
    #[error("Command error: {0}")]
    CommandError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DashboardError {
    /// Shorthand for a model fit failure
    pub fn model_fit(strategy: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        Self::ModelFit {
            strategy: strategy.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;
