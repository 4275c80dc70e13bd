//! Line chart of a forecast over its own date axis

use super::{AXIS_WIDTH, Chart, ChartSize, bounds, draw_to_text, price_labels};
use crate::models::ForecastResult;
use chrono::NaiveDate;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::{Axis, Dataset, GraphType, Widget};

/// Single connected line, historical dates for Moving Average and future
/// business days for the other strategies
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    title: String,
    points: Vec<(NaiveDate, f64)>,
}

impl LineChart {
    pub fn from_forecast(result: &ForecastResult) -> Self {
        Self {
            title: format!("Stock Price Prediction ({})", result.strategy()),
            points: result
                .points
                .iter()
                .map(|p| (p.date, p.predicted_close))
                .collect(),
        }
    }

    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    /// Position on the x axis is the index into the forecast
    fn coordinates(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .enumerate()
            .map(|(i, &(_, value))| (i as f64, value))
            .collect()
    }
}

impl Chart for LineChart {
    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self, size: ChartSize) -> String {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return format!("{}\n(no data)", self.title);
        };

        let data = self.coordinates();
        let min = data.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max = data.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let y_bounds = bounds(min, max);

        let graph_type = if data.len() == 1 {
            GraphType::Scatter
        } else {
            GraphType::Line
        };
        let dataset = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(graph_type)
            .style(Style::default().fg(Color::Yellow))
            .data(&data);

        let x_labels = vec![Line::from(first.0.to_string()), Line::from(last.0.to_string())];
        let chart = ratatui::widgets::Chart::new(vec![dataset])
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds(bounds(0.0, (data.len() - 1) as f64))
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds(y_bounds)
                    .labels(price_labels(y_bounds)),
            );

        let body = draw_to_text(AXIS_WIDTH + size.width, size.height + 2, |area, buf| {
            chart.render(area, buf);
        });
        format!("{}\n{body}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastPoint, ForecastRequest, Horizon, Strategy};

    fn result(values: &[f64]) -> ForecastResult {
        let mut date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let points = values
            .iter()
            .map(|&predicted_close| {
                let point = ForecastPoint { date, predicted_close };
                date = date.succ_opt().unwrap();
                point
            })
            .collect();
        ForecastResult::new(ForecastRequest::new(Strategy::Arima, Horizon::default()), points)
    }

    fn is_braille(c: char) -> bool {
        ('\u{2801}'..='\u{28FF}').contains(&c)
    }

    #[test]
    fn test_title_names_strategy() {
        let chart = LineChart::from_forecast(&result(&[1.0, 2.0]));
        assert_eq!(chart.title(), "Stock Price Prediction (ARIMA)");
        assert_eq!(chart.points().len(), 2);
        assert_eq!(chart.coordinates(), vec![(0.0, 1.0), (1.0, 2.0)]);
    }

    #[test]
    fn test_line_with_axes() {
        let text = LineChart::from_forecast(&result(&[100.0, 101.0, 102.0, 103.0, 104.0]))
            .render(ChartSize::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Stock Price Prediction (ARIMA)");
        assert_eq!(lines.len(), 1 + 12 + 2);
        assert!(text.contains("104.00"));
        assert!(text.contains("100.00"));
        assert!(text.contains("2024-07-01"));
        assert!(text.contains("2024-07-05"));
        assert!(text.chars().any(is_braille));
    }

    #[test]
    fn test_flat_and_single_point_still_draw() {
        let flat = LineChart::from_forecast(&result(&[42.0; 6])).render(ChartSize::default());
        assert!(flat.chars().any(is_braille));
        assert!(flat.contains("42.00"));

        let single = LineChart::from_forecast(&result(&[3.0])).render(ChartSize::default());
        assert!(single.chars().any(is_braille));
    }

    #[test]
    fn test_empty() {
        let empty = LineChart::from_forecast(&result(&[])).render(ChartSize::default());
        assert_eq!(empty, "Stock Price Prediction (ARIMA)\n(no data)");
    }
}
