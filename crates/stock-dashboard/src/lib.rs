//! Terminal stock dashboard
//!
//! Fetches six months of daily prices for one ticker, draws them as text
//! charts, forecasts the closing price and can email a plain-text report.
//! It includes:
//!
//! - Daily OHLCV history from Yahoo Finance
//! - A bar chart of closes and a box plot of the four price fields
//! - Moving Average, ARIMA(5,1,0) and damped-trend Exponential Smoothing forecasts
//! - A report of the last ten days and the forecast, sent over SMTP
//!
//! # Architecture
//!
//! [`Dashboard`] owns the control values and the latest snapshot and calls,
//! in order:
//! - [`DataFetcher`]: ticker to [`PriceSeries`]
//! - [`charts`]: series and forecast to text charts
//! - [`ForecastEngine`]: series to [`ForecastResult`]
//! - [`ReportEmailer`]: snapshot to a delivered email
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_dashboard::{Dashboard, DashboardConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DashboardConfig::builder()
//!         .default_ticker("MSFT")
//!         .with_env_credentials()?
//!         .build()?;
//!
//!     let mut dashboard = Dashboard::from_config(config);
//!     println!("{}", dashboard.process_input("/strategy arima").await);
//!     println!("{}", dashboard.process_input("MSFT").await);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forecast;
pub mod models;
pub mod report;

// Re-export main types for convenience
pub use api::{DataFetcher, PriceProvider, YahooFinanceClient};
pub use config::{DashboardConfig, SmtpCredentials};
pub use dashboard::{Command, Dashboard, DashboardView, Notice, Reply};
pub use error::{DashboardError, DeliveryError, Result};
pub use forecast::ForecastEngine;
pub use models::{ForecastRequest, ForecastResult, Horizon, PriceBar, PriceSeries, Strategy};
pub use report::{EmailReport, MailTransport, ReportEmailer, SmtpMailer};
