//! Configuration for the dashboard

use crate::charts::ChartSize;
use crate::error::{DashboardError, Result};
use crate::models::{Horizon, Strategy};
use dashboard_utils::env_var;
use std::fmt;
use std::time::Duration;

/// Environment variable holding the SMTP login, also used as sender address
pub const SMTP_USER_ENV: &str = "DASHBOARD_SMTP_USER";
/// Environment variable holding the SMTP password
pub const SMTP_PASSWORD_ENV: &str = "DASHBOARD_SMTP_PASSWORD";

/// Login for the mail relay, supplied at startup and never embedded
#[derive(Clone, PartialEq, Eq)]
pub struct SmtpCredentials {
    pub username: String,
    pub password: String,
}

impl SmtpCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read both variables; `Ok(None)` when neither is set
    pub fn from_env() -> Result<Option<Self>> {
        match (env_var(SMTP_USER_ENV), env_var(SMTP_PASSWORD_ENV)) {
            (Some(username), Some(password)) => Ok(Some(Self::new(username, password))),
            (None, None) => Ok(None),
            (Some(_), None) => Err(DashboardError::ConfigError(format!(
                "{SMTP_PASSWORD_ENV} must be set when {SMTP_USER_ENV} is set"
            ))),
            (None, Some(_)) => Err(DashboardError::ConfigError(format!(
                "{SMTP_USER_ENV} must be set when {SMTP_PASSWORD_ENV} is set"
            ))),
        }
    }
}

impl fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Configuration for a dashboard session
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Ticker loaded at startup
    pub default_ticker: String,

    /// Initial forecast horizon
    pub default_horizon: Horizon,

    /// Initial forecast strategy
    pub default_strategy: Strategy,

    /// Timeout for the market data request
    pub request_timeout: Duration,

    /// Timeout for the SMTP conversation
    pub smtp_timeout: Duration,

    /// Plot area for the text charts
    pub chart_size: ChartSize,

    /// Rows of history shown in the table and the emailed report
    pub table_rows: usize,

    /// Relay login; email is unavailable without it
    pub smtp_credentials: Option<SmtpCredentials>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_ticker: "AAPL".to_string(),
            default_horizon: Horizon::default(),
            default_strategy: Strategy::default(),
            request_timeout: Duration::from_secs(30),
            smtp_timeout: Duration::from_secs(30),
            chart_size: ChartSize::default(),
            table_rows: 10,
            smtp_credentials: None,
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Defaults plus credentials from the environment
    pub fn from_env() -> Result<Self> {
        Self::builder().with_env_credentials()?.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout.is_zero() {
            return Err(DashboardError::ConfigError(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        if self.table_rows == 0 {
            return Err(DashboardError::ConfigError(
                "table_rows must be greater than 0".to_string(),
            ));
        }

        if let Some(credentials) = &self.smtp_credentials {
            if credentials.username.is_empty() || credentials.password.is_empty() {
                return Err(DashboardError::ConfigError(
                    "SMTP username and password must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Builder for DashboardConfig
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    default_ticker: Option<String>,
    default_horizon: Option<Horizon>,
    default_strategy: Option<Strategy>,
    request_timeout: Option<Duration>,
    smtp_timeout: Option<Duration>,
    chart_size: Option<ChartSize>,
    table_rows: Option<usize>,
    smtp_credentials: Option<SmtpCredentials>,
}

impl DashboardConfigBuilder {
    /// Set the ticker loaded at startup
    pub fn default_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.default_ticker = Some(ticker.into());
        self
    }

    /// Set the initial horizon
    pub fn default_horizon(mut self, horizon: Horizon) -> Self {
        self.default_horizon = Some(horizon);
        self
    }

    /// Set the initial strategy
    pub fn default_strategy(mut self, strategy: Strategy) -> Self {
        self.default_strategy = Some(strategy);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set SMTP timeout
    pub fn smtp_timeout(mut self, duration: Duration) -> Self {
        self.smtp_timeout = Some(duration);
        self
    }

    /// Set the chart plot area
    pub fn chart_size(mut self, width: usize, height: usize) -> Self {
        self.chart_size = Some(ChartSize::new(width, height));
        self
    }

    /// Set the number of history rows shown
    pub fn table_rows(mut self, rows: usize) -> Self {
        self.table_rows = Some(rows);
        self
    }

    /// Set SMTP credentials
    pub fn smtp_credentials(mut self, credentials: SmtpCredentials) -> Self {
        self.smtp_credentials = Some(credentials);
        self
    }

    /// Load SMTP credentials from the environment, if present
    pub fn with_env_credentials(mut self) -> Result<Self> {
        if let Some(credentials) = SmtpCredentials::from_env()? {
            self.smtp_credentials = Some(credentials);
        }
        Ok(self)
    }

    /// Build the configuration
    pub fn build(self) -> Result<DashboardConfig> {
        let defaults = DashboardConfig::default();

        let config = DashboardConfig {
            default_ticker: self.default_ticker.unwrap_or(defaults.default_ticker),
            default_horizon: self.default_horizon.unwrap_or(defaults.default_horizon),
            default_strategy: self.default_strategy.unwrap_or(defaults.default_strategy),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            smtp_timeout: self.smtp_timeout.unwrap_or(defaults.smtp_timeout),
            chart_size: self.chart_size.unwrap_or(defaults.chart_size),
            table_rows: self.table_rows.unwrap_or(defaults.table_rows),
            smtp_credentials: self.smtp_credentials,
        };

        config.validate()?;
        Ok(config)
    }
}
