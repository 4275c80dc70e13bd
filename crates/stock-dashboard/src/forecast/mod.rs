//! Forecast engine
//!
//! Three interchangeable strategies run over the closing-price column:
//!
//! - **Moving Average**: trailing 5-day mean over the history itself. The
//!   result is aligned to historical dates, it does not look forward.
//! - **ARIMA(5,1,0)**: AR(5) fitted to first differences, projected `N`
//!   business days past the last observation.
//! - **Exponential Smoothing**: additive damped trend, no seasonality,
//!   projected the same way.
//!
//! A failed fit is reported as [`DashboardError::ModelFit`]; the engine never
//! substitutes another strategy or retries with different parameters.

pub mod arima;
pub mod calendar;
pub mod exponential_smoothing;
pub mod moving_average;

pub use arima::Arima;
pub use exponential_smoothing::DampedTrendSmoothing;

use crate::error::{DashboardError, Result};
use crate::models::{ForecastPoint, ForecastRequest, ForecastResult, PriceSeries, Strategy};
use thiserror::Error;
use tracing::{debug, info};

/// Reasons a model cannot produce a forecast
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("{0}")]
    Degenerate(String),

    #[error("model has not been fitted")]
    NotFitted,
}

/// Common trait for the forward-looking models
pub trait Predictor {
    /// Fit the model to historical data
    fn fit(&mut self, data: &[f64]) -> std::result::Result<(), FitError>;

    /// Predict the next `steps` values
    fn predict(&self, steps: usize) -> std::result::Result<Vec<f64>, FitError>;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool;
}

pub(crate) fn ensure_finite(data: &[f64]) -> std::result::Result<(), FitError> {
    if data.iter().any(|x| !x.is_finite()) {
        return Err(FitError::InvalidData(
            "data contains NaN or infinite values".to_string(),
        ));
    }
    Ok(())
}

/// Runs the selected strategy over a price series
#[derive(Debug, Clone, Copy, Default)]
pub struct ForecastEngine;

impl ForecastEngine {
    pub fn new() -> Self {
        Self
    }

    /// Produce a forecast for `series` according to `request`
    pub fn run(&self, series: &PriceSeries, request: ForecastRequest) -> Result<ForecastResult> {
        info!(
            symbol = series.symbol(),
            strategy = %request.strategy,
            horizon = request.horizon.days(),
            "running forecast"
        );

        let result = match request.strategy {
            Strategy::MovingAverage => Ok(moving_average::forecast(series, request)),
            Strategy::Arima => project(series, request, Arima::new(5, 1)),
            Strategy::ExponentialSmoothing => {
                project(series, request, DampedTrendSmoothing::new())
            }
        }?;

        debug!(points = result.len(), "forecast complete");
        Ok(result)
    }
}

/// Fit `model` on the closes and attach the next business days as dates.
fn project<P: Predictor>(
    series: &PriceSeries,
    request: ForecastRequest,
    mut model: P,
) -> Result<ForecastResult> {
    let strategy = request.strategy;
    let fit_error = |e: FitError| DashboardError::model_fit(strategy, e.to_string());

    let last_date = series
        .last_date()
        .ok_or_else(|| fit_error(FitError::InsufficientData { required: 1, actual: 0 }))?;

    model.fit(&series.closes()).map_err(fit_error)?;
    let values = model.predict(request.horizon.days()).map_err(fit_error)?;

    if values.iter().any(|v| !v.is_finite()) {
        return Err(fit_error(FitError::Degenerate(
            "forecast diverged to a non-finite value".to_string(),
        )));
    }

    let dates = calendar::business_days_after(last_date, values.len());
    if dates.len() != values.len() {
        return Err(fit_error(FitError::InvalidData(
            "ran out of calendar dates".to_string(),
        )));
    }

    let points = dates
        .into_iter()
        .zip(values)
        .map(|(date, predicted_close)| ForecastPoint { date, predicted_close })
        .collect();

    Ok(ForecastResult::new(request, points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Horizon;
    use crate::models::price::fixtures::series_from_closes;
    use chrono::{Datelike, Weekday};

    fn wavy_closes(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                150.0 + 0.3 * t + 4.0 * (t * 0.7).sin() + 2.5 * (t * 1.9).cos()
            })
            .collect()
    }

    #[test]
    fn test_forward_strategies_have_horizon_length_and_business_dates() {
        let series = series_from_closes("AAPL", &wavy_closes(126));
        let last = series.last_date().unwrap();
        let engine = ForecastEngine::new();

        for strategy in [Strategy::Arima, Strategy::ExponentialSmoothing] {
            for days in [5, 15, 30] {
                let request = ForecastRequest::new(strategy, Horizon::new(days).unwrap());
                let result = engine.run(&series, request).unwrap();

                assert_eq!(result.len(), days as usize);
                assert_eq!(result.strategy(), strategy);
                let dates = result.dates();
                assert!(dates[0] > last);
                assert!(dates.windows(2).all(|w| w[0] < w[1]));
                assert!(
                    dates
                        .iter()
                        .all(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
                );
            }
        }
    }

    #[test]
    fn test_moving_average_through_engine() {
        let series = series_from_closes("AAPL", &[10.0, 12.0, 11.0, 13.0, 15.0, 14.0, 16.0]);
        let request = ForecastRequest::new(Strategy::MovingAverage, Horizon::default());

        let result = ForecastEngine::new().run(&series, request).unwrap();

        assert_eq!(result.len(), 3);
        assert!((result.points[0].predicted_close - 12.2).abs() < 1e-12);
        assert_eq!(result.points[0].date, series.bars()[4].date);
    }

    #[test]
    fn test_short_series_surfaces_model_fit_error() {
        let series = series_from_closes("AAPL", &[10.0, 11.0, 12.0]);

        for strategy in [Strategy::Arima, Strategy::ExponentialSmoothing] {
            let request = ForecastRequest::new(strategy, Horizon::default());
            let err = ForecastEngine::new().run(&series, request).unwrap_err();
            match err {
                DashboardError::ModelFit { strategy: name, reason } => {
                    assert_eq!(name, strategy.name());
                    assert!(reason.contains("insufficient data"));
                }
                other => panic!("expected ModelFit, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_flat_series_fails_arima_only() {
        let series = series_from_closes("FLAT", &[42.0; 60]);

        let arima = ForecastEngine::new().run(
            &series,
            ForecastRequest::new(Strategy::Arima, Horizon::default()),
        );
        assert!(matches!(arima, Err(DashboardError::ModelFit { .. })));

        let smoothing = ForecastEngine::new()
            .run(
                &series,
                ForecastRequest::new(Strategy::ExponentialSmoothing, Horizon::default()),
            )
            .unwrap();
        assert!(smoothing.values().iter().all(|v| (v - 42.0).abs() < 1e-9));
    }
}
