//! Interactive stock dashboard
//!
//! The dashboard owns the current control values (ticker, horizon, strategy,
//! recipient) and the snapshot built from the last successful fetch. Each
//! control has its own handler; every handler returns a [`Reply`] for the
//! prompt to print, so no failure ends the session.
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_dashboard::{Dashboard, DashboardConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let mut dashboard = Dashboard::from_config(DashboardConfig::from_env()?);
//!     println!("{}", dashboard.process_input("MSFT").await);
//!     Ok(())
//! }
//! ```

pub mod commands;

use crate::api::{DataFetcher, PriceProvider, YahooFinanceClient, normalize_symbol};
use crate::charts::{BarChart, BoxPlot, Chart, ChartSize, LineChart};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, DeliveryError};
use crate::forecast::ForecastEngine;
use crate::models::{ForecastRequest, ForecastResult, Horizon, PriceSeries, Strategy};
use crate::report::{MailTransport, ReportEmailer, SmtpMailer, TableStyle, forecast_table, price_table};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

pub use commands::Command;

/// Toast shown after a successful delivery
pub const EMAIL_SENT: &str = "Email sent successfully!";

/// Data behind the current view, rebuilt on every ticker submission
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub series: PriceSeries,
    /// The forecast, or the fit failure shown in its place
    pub forecast: Result<ForecastResult, String>,
}

/// Transient message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Toast(String),
    Error(String),
}

impl Notice {
    pub fn error(err: impl fmt::Display) -> Self {
        Self::Error(err.to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Toast(message) => write!(f, "✔ {message}"),
            Self::Error(message) => write!(f, "\x1b[31mError:\x1b[0m {message}"),
        }
    }
}

/// A chart laid out as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChart {
    pub title: String,
    pub body: String,
}

impl RenderedChart {
    fn new(chart: &impl Chart, size: ChartSize) -> Self {
        Self {
            title: chart.title().to_string(),
            body: chart.render(size),
        }
    }
}

/// Forecast panel content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForecastPanel {
    Ready { chart: RenderedChart, table: String },
    Failed(Notice),
}

/// Everything drawn for a loaded ticker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub symbol: String,
    pub request: ForecastRequest,
    pub table: String,
    pub charts: Vec<RenderedChart>,
    pub forecast: ForecastPanel,
}

impl DashboardView {
    /// Number of charts drawn, forecast line included
    pub fn chart_count(&self) -> usize {
        self.charts.len() + usize::from(matches!(self.forecast, ForecastPanel::Ready { .. }))
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "══ {} ══", self.symbol)?;
        writeln!(f)?;
        writeln!(f, "{}", self.table)?;
        for chart in &self.charts {
            writeln!(f)?;
            writeln!(f, "{}", chart.body)?;
        }
        writeln!(f)?;
        match &self.forecast {
            ForecastPanel::Ready { chart, table } => {
                writeln!(f, "{}", chart.body)?;
                writeln!(f)?;
                write!(f, "{table}")
            }
            ForecastPanel::Failed(notice) => write!(f, "{notice}"),
        }
    }
}

/// Result of handling one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Redraw with an optional notice underneath
    View {
        view: Box<DashboardView>,
        notice: Option<Notice>,
    },
    Notice(Notice),
    Text(String),
    Exit,
}

impl Reply {
    fn view(view: DashboardView) -> Self {
        Self::View {
            view: Box::new(view),
            notice: None,
        }
    }

    fn error(err: impl fmt::Display) -> Self {
        Self::Notice(Notice::error(err))
    }

    /// The notice carried by this reply, if any
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Self::View { notice, .. } => notice.as_ref(),
            Self::Notice(notice) => Some(notice),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.notice().is_some_and(Notice::is_error)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View { view, notice } => {
                write!(f, "{view}")?;
                if let Some(notice) = notice {
                    write!(f, "\n\n{notice}")?;
                }
                Ok(())
            }
            Self::Notice(notice) => write!(f, "{notice}"),
            Self::Text(text) => f.write_str(text),
            Self::Exit => f.write_str("Goodbye!"),
        }
    }
}

/// Dashboard session state and handlers
pub struct Dashboard {
    fetcher: DataFetcher,
    engine: ForecastEngine,
    emailer: ReportEmailer,
    config: DashboardConfig,
    ticker: String,
    request: ForecastRequest,
    recipient: Option<String>,
    snapshot: Option<Snapshot>,
}

impl Dashboard {
    pub fn new(fetcher: DataFetcher, emailer: ReportEmailer, config: DashboardConfig) -> Self {
        Self {
            fetcher,
            engine: ForecastEngine::new(),
            emailer,
            ticker: config.default_ticker.clone(),
            request: ForecastRequest::new(config.default_strategy, config.default_horizon),
            recipient: None,
            snapshot: None,
            config,
        }
    }

    /// Yahoo Finance for prices, SMTP for reports when credentials are set
    pub fn from_config(config: DashboardConfig) -> Self {
        let provider: Arc<dyn PriceProvider> = Arc::new(YahooFinanceClient::new());
        let fetcher = DataFetcher::new(provider, config.request_timeout);

        let transport = config.smtp_credentials.clone().map(|credentials| {
            Arc::new(SmtpMailer::new(credentials, config.smtp_timeout)) as Arc<dyn MailTransport>
        });
        let emailer = ReportEmailer::new(transport, config.table_rows);

        Self::new(fetcher, emailer, config)
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn request(&self) -> ForecastRequest {
        self.request
    }

    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref()
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Prompt showing the active controls
    pub fn prompt(&self) -> String {
        format!(
            "[{} | {} | {}d] > ",
            self.ticker, self.request.strategy, self.request.horizon
        )
    }

    /// Process user input and return what to print
    pub async fn process_input(&mut self, input: &str) -> Reply {
        match Command::parse(input) {
            Ok(command) => self.execute_command(command).await,
            Err(e) => Reply::error(e),
        }
    }

    /// Execute a parsed command
    pub async fn execute_command(&mut self, command: Command) -> Reply {
        debug!(command = command.description(), "executing command");
        match command {
            Command::Ticker { symbol } => self.on_ticker(&symbol).await,
            Command::Horizon { horizon } => self.on_horizon(horizon),
            Command::Strategy { strategy } => self.on_strategy(strategy),
            Command::Email { address } => self.on_recipient(&address),
            Command::Send => self.on_send_email().await,
            Command::Show => self.show(),
            Command::Help => Reply::Text(Command::help_text().to_string()),
            Command::Exit => Reply::Exit,
        }
    }

    /// Fetch the ticker and rebuild the table, charts and forecast.
    ///
    /// A failed fetch clears the previous snapshot so nothing stale is shown.
    pub async fn on_ticker(&mut self, ticker: &str) -> Reply {
        let symbol = match normalize_symbol(ticker) {
            Ok(symbol) => symbol,
            Err(e) => return Reply::error(e),
        };
        self.ticker.clone_from(&symbol);

        let series = match self.fetcher.fetch(&symbol).await {
            Ok(series) => series,
            Err(e) => {
                self.snapshot = None;
                return Reply::error(e);
            }
        };

        let forecast = self.forecast(&series);
        self.snapshot = Some(Snapshot { series, forecast });
        self.show()
    }

    /// Change the horizon and rerun the forecast on the loaded series
    pub fn on_horizon(&mut self, horizon: Horizon) -> Reply {
        self.request.horizon = horizon;
        self.reforecast(format!("Horizon set to {horizon} business days"))
    }

    /// Change the strategy and rerun the forecast on the loaded series
    pub fn on_strategy(&mut self, strategy: Strategy) -> Reply {
        self.request.strategy = strategy;
        self.reforecast(format!("Prediction method set to {strategy}"))
    }

    /// Record the recipient; the address is not validated here
    pub fn on_recipient(&mut self, address: &str) -> Reply {
        let address = address.trim();
        if address.is_empty() {
            self.recipient = None;
            return Reply::error(DashboardError::CommandError(
                "Email address must not be empty".to_string(),
            ));
        }
        self.recipient = Some(address.to_string());
        Reply::Notice(Notice::Toast(format!("Report recipient set to {address}")))
    }

    /// Compose and send the report for the current snapshot
    pub async fn on_send_email(&mut self) -> Reply {
        match self.send_report().await {
            Ok(()) => Reply::Notice(Notice::Toast(EMAIL_SENT.to_string())),
            Err(e) => Reply::error(DashboardError::from(e)),
        }
    }

    /// Redraw the current snapshot
    pub fn show(&self) -> Reply {
        match self.render() {
            Some(view) => Reply::view(view),
            None => Reply::Text(format!(
                "No data loaded. Enter a ticker (current: {}) to load it.",
                self.ticker
            )),
        }
    }

    async fn send_report(&self) -> Result<(), DeliveryError> {
        let recipient = self
            .recipient
            .as_deref()
            .ok_or_else(|| DeliveryError::new("no recipient set; use /email <address> first"))?;
        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or_else(|| DeliveryError::new("no stock data loaded"))?;
        let forecast = snapshot
            .forecast
            .as_ref()
            .map_err(|reason| DeliveryError::new(format!("no forecast available: {reason}")))?;

        self.emailer.send(recipient, &snapshot.series, forecast).await
    }

    fn forecast(&self, series: &PriceSeries) -> Result<ForecastResult, String> {
        self.engine.run(series, self.request).map_err(|e| e.to_string())
    }

    fn reforecast(&mut self, confirmation: String) -> Reply {
        let Some(series) = self.snapshot.as_ref().map(|s| s.series.clone()) else {
            return Reply::Notice(Notice::Toast(confirmation));
        };

        let forecast = self.forecast(&series);
        info!(
            symbol = series.symbol(),
            strategy = %self.request.strategy,
            horizon = self.request.horizon.days(),
            ok = forecast.is_ok(),
            "forecast refreshed"
        );
        self.snapshot = Some(Snapshot { series, forecast });
        self.show()
    }

    fn render(&self) -> Option<DashboardView> {
        let snapshot = self.snapshot.as_ref()?;
        let size = self.config.chart_size;
        let series = &snapshot.series;

        let charts = vec![
            RenderedChart::new(&BarChart::from_series(series), size),
            RenderedChart::new(&BoxPlot::from_series(series), size),
        ];

        let forecast = match &snapshot.forecast {
            Ok(result) => ForecastPanel::Ready {
                chart: RenderedChart::new(&LineChart::from_forecast(result), size),
                table: forecast_table(result, TableStyle::Terminal),
            },
            Err(reason) => ForecastPanel::Failed(Notice::Error(reason.clone())),
        };

        Some(DashboardView {
            symbol: series.symbol().to_string(),
            request: self.request,
            table: price_table(series.tail(self.config.table_rows), TableStyle::Terminal),
            charts,
            forecast,
        })
    }
}
