//! Emailed plain-text report
//!
//! The report is composed from the current snapshot and handed to a
//! [`MailTransport`]. Every failure on the way (missing inputs, bad
//! addresses, relay connection, authentication, transmission) comes back as
//! a [`DeliveryError`]; nothing here panics or retries.

use super::table::{TableStyle, forecast_table, price_table};
use crate::config::SmtpCredentials;
use crate::error::DeliveryError;
use crate::models::{ForecastResult, PriceSeries};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Fixed mail relay
pub const SMTP_RELAY_HOST: &str = "smtp.gmail.com";
/// STARTTLS submission port
pub const SMTP_SUBMISSION_PORT: u16 = 587;

/// A fully formed plain-text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailReport {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailReport {
    /// Build the report for `series` and `forecast`.
    ///
    /// `tail_rows` most recent rows of history are included. The recipient
    /// is only checked for being non-blank.
    pub fn compose(
        from: &str,
        to: &str,
        series: &PriceSeries,
        forecast: &ForecastResult,
        tail_rows: usize,
    ) -> Result<Self, DeliveryError> {
        let to = to.trim();
        if to.is_empty() {
            return Err(DeliveryError::new("no recipient email address entered"));
        }

        let ticker = series.symbol();
        let body = format!(
            "Stock Analysis for {ticker}\n\
             \n\
             - Last {rows} Days Data:\n\
             {history}\n\
             \n\
             - Predicted Closing Prices for Next {horizon} Days ({strategy}):\n\
             {predictions}\n",
            rows = tail_rows,
            history = price_table(series.tail(tail_rows), TableStyle::PlainText),
            horizon = forecast.request.horizon,
            strategy = forecast.strategy(),
            predictions = forecast_table(forecast, TableStyle::PlainText),
        );

        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
            subject: format!("Stock Analysis Report for {ticker}"),
            body,
        })
    }
}

/// Something that can hand a report to a mail relay
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Sender address the transport is authenticated as
    fn sender(&self) -> &str;

    /// Deliver one message
    async fn deliver(&self, report: &EmailReport) -> Result<(), DeliveryError>;
}

/// SMTP submission with STARTTLS to the fixed relay
pub struct SmtpMailer {
    credentials: SmtpCredentials,
    timeout: Duration,
}

impl SmtpMailer {
    pub fn new(credentials: SmtpCredentials, timeout: Duration) -> Self {
        Self {
            credentials,
            timeout,
        }
    }

    fn build_message(report: &EmailReport) -> Result<Message, DeliveryError> {
        let from: Mailbox = report
            .from
            .parse()
            .map_err(|e| DeliveryError::new(format!("invalid sender address '{}': {e}", report.from)))?;
        let to: Mailbox = report
            .to
            .parse()
            .map_err(|e| DeliveryError::new(format!("invalid recipient address '{}': {e}", report.to)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(report.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(report.body.clone())
            .map_err(|e| DeliveryError::new(e.to_string()))
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    fn sender(&self) -> &str {
        &self.credentials.username
    }

    async fn deliver(&self, report: &EmailReport) -> Result<(), DeliveryError> {
        let message = Self::build_message(report)?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(SMTP_RELAY_HOST)
            .map_err(|e| DeliveryError::new(e.to_string()))?
            .port(SMTP_SUBMISSION_PORT)
            .timeout(Some(self.timeout))
            .credentials(Credentials::new(
                self.credentials.username.clone(),
                self.credentials.password.clone(),
            ))
            .build();

        let response = transport
            .send(message)
            .await
            .map_err(|e| DeliveryError::new(e.to_string()))?;

        info!(code = %response.code(), "relay accepted message");
        Ok(())
    }
}

/// Composes and sends reports; the caller decides how to show the outcome
#[derive(Clone)]
pub struct ReportEmailer {
    transport: Option<Arc<dyn MailTransport>>,
    tail_rows: usize,
}

impl ReportEmailer {
    pub fn new(transport: Option<Arc<dyn MailTransport>>, tail_rows: usize) -> Self {
        Self {
            transport,
            tail_rows,
        }
    }

    /// Whether a transport is configured
    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Compose and deliver one report to `recipient`
    pub async fn send(
        &self,
        recipient: &str,
        series: &PriceSeries,
        forecast: &ForecastResult,
    ) -> Result<(), DeliveryError> {
        let Some(transport) = &self.transport else {
            return Err(DeliveryError::new(format!(
                "SMTP credentials are not configured; set {} and {}",
                crate::config::SMTP_USER_ENV,
                crate::config::SMTP_PASSWORD_ENV
            )));
        };

        let report =
            EmailReport::compose(transport.sender(), recipient, series, forecast, self.tail_rows)?;

        match transport.deliver(&report).await {
            Ok(()) => {
                info!(to = %report.to, subject = %report.subject, "report sent");
                Ok(())
            }
            Err(e) => {
                warn!(to = %report.to, error = %e.reason, "report delivery failed");
                Err(e)
            }
        }
    }
}
