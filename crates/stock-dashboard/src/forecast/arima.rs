//! ARIMA(p, d, 0) fitted by conditional least squares
//!
//! The series is differenced `d` times, an AR(p) model without intercept is
//! fitted to the differences by ordinary least squares on the lagged values,
//! and forecasts are integrated back from the last observed levels.
//!
//! ## Example
//!
//! ```rust
//! use stock_dashboard::forecast::{Arima, Predictor};
//!
//! let data: Vec<f64> = (0..40).map(|x| 100.0 + 2.0 * x as f64).collect();
//! let mut model = Arima::new(5, 1);
//! model.fit(&data).unwrap();
//! let forecast = model.predict(3).unwrap();
//! assert_eq!(forecast.len(), 3);
//! ```

use super::{FitError, Predictor, ensure_finite};

/// Relative ridge added to the normal equations so collinear lags
/// (e.g. a perfectly linear price path) still have a unique solution.
const RIDGE: f64 = 1e-10;

/// Autoregressive integrated model with no moving-average terms
#[derive(Debug, Clone)]
pub struct Arima {
    /// AR order (p)
    p: usize,
    /// Differencing order (d)
    d: usize,
    /// AR coefficients, lag 1 first
    ar_coeffs: Vec<f64>,
    /// Fully differenced series
    differenced: Vec<f64>,
    /// Last value of each differencing level 0..d, for integration
    anchors: Vec<f64>,
    fitted: bool,
}

impl Arima {
    pub fn new(p: usize, d: usize) -> Self {
        Self {
            p,
            d,
            ar_coeffs: vec![0.0; p],
            differenced: Vec::new(),
            anchors: Vec::new(),
            fitted: false,
        }
    }

    /// Get model order as (p, d, q)
    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, 0)
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coeffs
    }

    fn difference(data: &[f64]) -> Vec<f64> {
        data.windows(2).map(|w| w[1] - w[0]).collect()
    }

    fn fit_ar(&self, x: &[f64]) -> Result<Vec<f64>, FitError> {
        let p = self.p;
        if p == 0 {
            return Ok(Vec::new());
        }

        let mut xtx = vec![vec![0.0; p]; p];
        let mut xty = vec![0.0; p];
        for t in p..x.len() {
            for i in 0..p {
                let xi = x[t - 1 - i];
                xty[i] += xi * x[t];
                for j in 0..p {
                    xtx[i][j] += xi * x[t - 1 - j];
                }
            }
        }

        let trace: f64 = (0..p).map(|i| xtx[i][i]).sum();
        if trace <= f64::EPSILON {
            return Err(FitError::Degenerate(
                "closing prices show no movement to fit".to_string(),
            ));
        }
        for (i, row) in xtx.iter_mut().enumerate() {
            row[i] += trace * RIDGE;
        }

        let coeffs = solve(xtx, xty)
            .ok_or_else(|| FitError::Degenerate("normal equations are singular".to_string()))?;
        if coeffs.iter().any(|c| !c.is_finite()) {
            return Err(FitError::Degenerate(
                "estimated coefficients are not finite".to_string(),
            ));
        }
        Ok(coeffs)
    }
}

impl Predictor for Arima {
    fn fit(&mut self, data: &[f64]) -> Result<(), FitError> {
        let required = self.p + self.d + 10;
        if data.len() < required {
            return Err(FitError::InsufficientData {
                required,
                actual: data.len(),
            });
        }
        ensure_finite(data)?;

        let mut level = data.to_vec();
        let mut anchors = Vec::with_capacity(self.d);
        for _ in 0..self.d {
            anchors.push(level[level.len() - 1]);
            level = Self::difference(&level);
        }

        self.ar_coeffs = self.fit_ar(&level)?;
        self.differenced = level;
        self.anchors = anchors;
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>, FitError> {
        if !self.fitted {
            return Err(FitError::NotFitted);
        }

        let n = self.differenced.len();
        let mut extended = self.differenced.clone();
        for _ in 0..steps {
            let next: f64 = self
                .ar_coeffs
                .iter()
                .enumerate()
                .map(|(lag, coeff)| coeff * extended[extended.len() - 1 - lag])
                .sum();
            extended.push(next);
        }

        // Integrate from the innermost level outwards
        let mut forecasts = extended[n..].to_vec();
        for &anchor in self.anchors.iter().rev() {
            let mut running = anchor;
            for value in &mut forecasts {
                running += *value;
                *value = running;
            }
        }

        Ok(forecasts)
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

/// Solve `a * x = b` by Gaussian elimination with partial pivoting.
fn solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();
    let scale = a
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |m, v| m.max(v.abs()));
    if scale == 0.0 {
        return None;
    }

    for col in 0..n {
        let pivot_row = (col..n).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
        if a[pivot_row][col].abs() < scale * 1e-14 {
            return None;
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}
