//! Tabular rendering and the emailed report

pub mod email;
pub mod table;

pub use email::{
    EmailReport, MailTransport, ReportEmailer, SMTP_RELAY_HOST, SMTP_SUBMISSION_PORT, SmtpMailer,
};
pub use table::{TableStyle, forecast_table, price_table};
