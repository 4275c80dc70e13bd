//! Daily price history

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day of OHLCV data
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Value of a single price field
    pub fn field(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
        }
    }

    /// All four prices are finite and strictly positive
    pub fn is_valid(&self) -> bool {
        PriceField::ALL
            .iter()
            .map(|&f| self.field(f))
            .all(|v| v.is_finite() && v > 0.0)
    }
}

/// The four canonical price columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
}

impl PriceField {
    /// Column order used by tables and the box plot
    pub const ALL: [PriceField; 4] = [Self::Open, Self::High, Self::Low, Self::Close];

    pub fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::High => "High",
            Self::Low => "Low",
            Self::Close => "Close",
        }
    }
}

impl std::fmt::Display for PriceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Ascending, date-unique daily history for one ticker.
///
/// Built once per ticker submission and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Normalize raw provider rows into a series.
    ///
    /// Drops rows with non-finite or non-positive prices, sorts by date and
    /// keeps the last row seen for any repeated date.
    pub fn from_bars(symbol: impl Into<String>, bars: impl IntoIterator<Item = PriceBar>) -> Self {
        let mut valid: Vec<PriceBar> = bars.into_iter().filter(PriceBar::is_valid).collect();
        valid.sort_by_key(|bar| bar.date);

        let mut normalized: Vec<PriceBar> = Vec::with_capacity(valid.len());
        for bar in valid {
            match normalized.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => normalized.push(bar),
            }
        }

        Self {
            symbol: symbol.into(),
            bars: normalized,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices in date order
    pub fn closes(&self) -> Vec<f64> {
        self.column(PriceField::Close)
    }

    /// One price column in date order
    pub fn column(&self, field: PriceField) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.field(field)).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|bar| bar.date).collect()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.bars.last().map(|bar| bar.date)
    }

    /// The most recent `n` rows, oldest first
    pub fn tail(&self, n: usize) -> &[PriceBar] {
        &self.bars[self.bars.len().saturating_sub(n)..]
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 100,
        }
    }

    #[test]
    fn test_from_bars_sorts_and_dedupes() {
        let series = PriceSeries::from_bars("AAPL", vec![bar(6, 12.0), bar(4, 10.0), bar(6, 13.0), bar(5, 11.0)]);

        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![10.0, 11.0, 13.0]);
        assert!(series.dates().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_from_bars_drops_invalid_rows() {
        let mut broken = bar(5, 11.0);
        broken.low = f64::NAN;
        let mut negative = bar(7, 9.0);
        negative.open = -1.0;

        let series = PriceSeries::from_bars("AAPL", vec![bar(4, 10.0), broken, negative]);

        assert_eq!(series.len(), 1);
        assert!(series.bars().iter().all(PriceBar::is_valid));
    }

    #[test]
    fn test_tail() {
        let series = fixtures::series_from_closes("AAPL", &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(series.tail(2).len(), 2);
        assert_eq!(series.tail(2)[1].close, 5.0);
        assert_eq!(series.tail(10).len(), 5);
    }

    #[test]
    fn test_column_labels() {
        let labels: Vec<_> = PriceField::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, vec!["Open", "High", "Low", "Close"]);
    }
}
