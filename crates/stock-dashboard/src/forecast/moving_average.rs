//! Trailing simple moving average
//!
//! The "prediction" is the smoothed history itself, aligned to the historical
//! dates. Rows without a full window are omitted.

use crate::models::{ForecastPoint, ForecastRequest, ForecastResult, PriceSeries};

/// Number of observations in each window
pub const WINDOW: usize = 5;

/// Mean of every full trailing window of `values`.
///
/// Entry `i` of the output is the mean of `values[i..i + window]`, i.e. it
/// belongs to input index `i + window - 1`. Empty when `values` is shorter
/// than `window` or `window` is zero.
pub fn trailing_mean(values: &[f64], window: usize) -> Vec<f64> {
    if window == 0 {
        return Vec::new();
    }
    values
        .windows(window)
        .map(|w| w.iter().sum::<f64>() / window as f64)
        .collect()
}

/// Moving-average "forecast" for the series; never fails.
pub fn forecast(series: &PriceSeries, request: ForecastRequest) -> ForecastResult {
    let means = trailing_mean(&series.closes(), WINDOW);
    let points = series
        .bars()
        .iter()
        .skip(WINDOW - 1)
        .zip(means)
        .map(|(bar, predicted_close)| ForecastPoint {
            date: bar.date,
            predicted_close,
        })
        .collect();

    ForecastResult::new(request, points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::price::fixtures::series_from_closes;

    #[test]
    fn test_trailing_mean_exact_values() {
        let closes = [10.0, 12.0, 11.0, 13.0, 15.0, 14.0, 16.0];
        let means = trailing_mean(&closes, WINDOW);

        assert_eq!(means.len(), closes.len() - 4);
        assert!((means[0] - 12.2).abs() < 1e-12);
        assert!((means[1] - 13.0).abs() < 1e-12);
        assert!((means[2] - 13.8).abs() < 1e-12);
    }

    #[test]
    fn test_length_is_len_minus_four() {
        for n in 0_usize..12 {
            let closes: Vec<f64> = (1..=n).map(|x| x as f64 * 3.0).collect();
            let series = series_from_closes("AAPL", &closes);
            let result = forecast(&series, ForecastRequest::default());
            assert_eq!(result.len(), n.saturating_sub(4));
        }
    }

    #[test]
    fn test_aligned_to_historical_dates() {
        let series = series_from_closes("AAPL", &[10.0, 12.0, 11.0, 13.0, 15.0, 14.0, 16.0]);
        let result = forecast(&series, ForecastRequest::default());

        let expected: Vec<_> = series.dates().into_iter().skip(4).collect();
        assert_eq!(result.dates(), expected);
        assert_eq!(result.points.last().map(|p| p.date), series.last_date());
    }

    #[test]
    fn test_zero_window() {
        assert!(trailing_mean(&[1.0, 2.0], 0).is_empty());
    }
}
