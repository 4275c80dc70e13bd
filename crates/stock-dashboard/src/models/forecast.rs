//! Forecast request and result types

use crate::error::{DashboardError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of future business days to project, always within `[MIN, MAX]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Horizon(u32);

impl Horizon {
    pub const MIN: u32 = 5;
    pub const MAX: u32 = 30;
    pub const DEFAULT: u32 = 15;

    pub fn new(value: i64) -> Result<Self> {
        if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
            return Err(DashboardError::InvalidHorizon {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value as u32))
    }

    pub fn days(self) -> usize {
        self.0 as usize
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Horizon {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let value: i64 = s.trim().parse().map_err(|_| {
            DashboardError::CommandError(format!("Horizon must be a whole number, got '{}'", s.trim()))
        })?;
        Self::new(value)
    }
}

/// Forecasting strategy, exactly one runs per request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Trailing 5-day simple moving average over the history
    #[default]
    MovingAverage,
    /// ARIMA(5,1,0)
    Arima,
    /// Additive damped-trend exponential smoothing
    ExponentialSmoothing,
}

impl Strategy {
    /// Selector order
    pub const ALL: [Strategy; 3] = [Self::MovingAverage, Self::Arima, Self::ExponentialSmoothing];

    pub fn name(self) -> &'static str {
        match self {
            Self::MovingAverage => "Moving Average",
            Self::Arima => "ARIMA",
            Self::ExponentialSmoothing => "Exponential Smoothing",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "movingaverage" | "ma" | "sma" => Ok(Self::MovingAverage),
            "arima" => Ok(Self::Arima),
            "exponentialsmoothing" | "es" | "ets" | "holt" => Ok(Self::ExponentialSmoothing),
            _ => {
                let choices: Vec<&str> = Self::ALL.iter().map(|strategy| strategy.name()).collect();
                Err(DashboardError::UnknownStrategy(format!(
                    "'{}' (choose one of: {})",
                    s.trim(),
                    choices.join(", ")
                )))
            }
        }
    }
}

/// Strategy plus horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub strategy: Strategy,
    pub horizon: Horizon,
}

impl ForecastRequest {
    pub fn new(strategy: Strategy, horizon: Horizon) -> Self {
        Self { strategy, horizon }
    }
}

/// One predicted close
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_close: f64,
}

/// Ordered predictions produced by one strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub request: ForecastRequest,
    pub points: Vec<ForecastPoint>,
}

impl ForecastResult {
    pub fn new(request: ForecastRequest, points: Vec<ForecastPoint>) -> Self {
        Self { request, points }
    }

    pub fn strategy(&self) -> Strategy {
        self.request.strategy
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted_close).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_bounds() {
        assert!(Horizon::new(4).is_err());
        assert!(Horizon::new(31).is_err());
        assert_eq!(Horizon::new(5).unwrap().days(), 5);
        assert_eq!(Horizon::new(30).unwrap().days(), 30);
        assert_eq!(Horizon::default().days(), 15);
    }

    #[test]
    fn test_horizon_parse() {
        assert_eq!("20".parse::<Horizon>().unwrap().days(), 20);
        assert!(matches!(
            "abc".parse::<Horizon>(),
            Err(DashboardError::CommandError(_))
        ));
        assert!(matches!(
            "-3".parse::<Horizon>(),
            Err(DashboardError::InvalidHorizon { value: -3, .. })
        ));
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("Moving Average".parse::<Strategy>().unwrap(), Strategy::MovingAverage);
        assert_eq!("ma".parse::<Strategy>().unwrap(), Strategy::MovingAverage);
        assert_eq!("ARIMA".parse::<Strategy>().unwrap(), Strategy::Arima);
        assert_eq!(
            "exponential_smoothing".parse::<Strategy>().unwrap(),
            Strategy::ExponentialSmoothing
        );
        assert_eq!("es".parse::<Strategy>().unwrap(), Strategy::ExponentialSmoothing);
        let err = "prophet".parse::<Strategy>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown prediction method: 'prophet' (choose one of: Moving Average, ARIMA, Exponential Smoothing)"
        );
    }

    #[test]
    fn test_strategy_names_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
        }
        assert_eq!(Strategy::default(), Strategy::MovingAverage);
    }
}
