//! Additive damped-trend exponential smoothing (no seasonality)
//!
//! Recursions, with damping `phi`:
//!
//! ```text
//! level_t = alpha * y_t + (1 - alpha) * (level_{t-1} + phi * trend_{t-1})
//! trend_t = beta * (level_t - level_{t-1}) + (1 - beta) * phi * trend_{t-1}
//! y_{T+h} = level_T + (phi + phi^2 + ... + phi^h) * trend_T
//! ```
//!
//! `alpha`, `beta` and `phi` are chosen by grid search on the one-step-ahead
//! sum of squared errors.

use super::{FitError, Predictor, ensure_finite};

const ALPHA_GRID: [f64; 19] = [
    0.05, 0.10, 0.15, 0.20, 0.25, 0.30, 0.35, 0.40, 0.45, 0.50, 0.55, 0.60, 0.65, 0.70, 0.75,
    0.80, 0.85, 0.90, 0.95,
];
const BETA_GRID: [f64; 11] = [0.0, 0.05, 0.10, 0.15, 0.20, 0.30, 0.40, 0.50, 0.60, 0.80, 0.95];
const PHI_GRID: [f64; 5] = [0.80, 0.85, 0.90, 0.95, 0.98];

/// Smoothing parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingParams {
    pub alpha: f64,
    pub beta: f64,
    pub phi: f64,
}

/// Holt's linear method with a damped trend
#[derive(Debug, Clone, Default)]
pub struct DampedTrendSmoothing {
    params: Option<SmoothingParams>,
    level: f64,
    trend: f64,
    fitted: bool,
}

/// Final state and error of one pass over the data
struct Pass {
    level: f64,
    trend: f64,
    sse: f64,
}

impl DampedTrendSmoothing {
    /// Minimum observations for a fit
    pub const MIN_OBSERVATIONS: usize = 10;

    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters chosen by the last fit
    pub fn params(&self) -> Option<SmoothingParams> {
        self.params
    }

    fn run(data: &[f64], params: SmoothingParams) -> Pass {
        let SmoothingParams { alpha, beta, phi } = params;
        let mut level = data[0];
        let mut trend = data[1] - data[0];
        let mut sse = 0.0;

        for &y in &data[1..] {
            let expected = level + phi * trend;
            let error = y - expected;
            sse += error * error;

            let prev_level = level;
            level = alpha * y + (1.0 - alpha) * expected;
            trend = beta * (level - prev_level) + (1.0 - beta) * phi * trend;
        }

        Pass { level, trend, sse }
    }
}

impl Predictor for DampedTrendSmoothing {
    fn fit(&mut self, data: &[f64]) -> Result<(), FitError> {
        if data.len() < Self::MIN_OBSERVATIONS {
            return Err(FitError::InsufficientData {
                required: Self::MIN_OBSERVATIONS,
                actual: data.len(),
            });
        }
        ensure_finite(data)?;

        let mut best: Option<(SmoothingParams, Pass)> = None;
        for &alpha in &ALPHA_GRID {
            for &beta in &BETA_GRID {
                for &phi in &PHI_GRID {
                    let params = SmoothingParams { alpha, beta, phi };
                    let pass = Self::run(data, params);
                    if !pass.sse.is_finite() {
                        continue;
                    }
                    if best.as_ref().is_none_or(|(_, b)| pass.sse < b.sse) {
                        best = Some((params, pass));
                    }
                }
            }
        }

        let (params, pass) = best.ok_or_else(|| {
            FitError::Degenerate("no smoothing parameters produced a finite error".to_string())
        })?;

        tracing::debug!(
            alpha = params.alpha,
            beta = params.beta,
            phi = params.phi,
            sse = pass.sse,
            "exponential smoothing fitted"
        );

        self.params = Some(params);
        self.level = pass.level;
        self.trend = pass.trend;
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>, FitError> {
        let params = match (self.fitted, self.params) {
            (true, Some(params)) => params,
            _ => return Err(FitError::NotFitted),
        };

        let mut forecasts = Vec::with_capacity(steps);
        let mut damping = 0.0;
        let mut factor = 1.0;
        for _ in 0..steps {
            factor *= params.phi;
            damping += factor;
            forecasts.push(self.level + damping * self.trend);
        }
        Ok(forecasts)
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
