//! Core data types shared by the fetcher, charts, forecasts and reports

pub mod forecast;
pub mod price;

pub use forecast::{ForecastPoint, ForecastRequest, ForecastResult, Horizon, Strategy};
pub use price::{PriceBar, PriceField, PriceSeries};
