//! Shared utilities for the stock dashboard
//!
//! This crate provides the logging setup and the small amount of
//! environment-driven configuration shared by the dashboard crates.

pub mod config;
pub mod logging;

pub use config::{Config, env_var};
pub use logging::init_tracing;
