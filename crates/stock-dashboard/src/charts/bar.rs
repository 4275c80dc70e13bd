//! Bar chart of daily closing prices

use super::{AXIS_WIDTH, Chart, ChartSize, draw_to_text, to_cells};
use crate::models::PriceSeries;
use chrono::NaiveDate;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Bar, BarGroup, Block, Borders, Paragraph, Widget};

/// One bar per trading day, height = close, zero baseline
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    title: String,
    bars: Vec<(NaiveDate, f64)>,
}

impl BarChart {
    pub fn from_series(series: &PriceSeries) -> Self {
        Self {
            title: "Daily Closing Prices".to_string(),
            bars: series.bars().iter().map(|b| (b.date, b.close)).collect(),
        }
    }

    pub fn bars(&self) -> &[(NaiveDate, f64)] {
        &self.bars
    }

    /// Bar heights in cents; the widget takes integer values
    fn cents(&self) -> Vec<u64> {
        self.bars
            .iter()
            .map(|(_, close)| (close * 100.0).round() as u64)
            .collect()
    }
}

/// First date flush left and last date flush right across `width` cells
pub(crate) fn date_span(first: NaiveDate, last: NaiveDate, width: usize) -> String {
    let (left, right) = (first.to_string(), last.to_string());
    if first == last || width < left.len() + right.len() + 1 {
        return left;
    }
    format!("{left}{right:>pad$}", pad = width - left.len())
}

impl Chart for BarChart {
    fn title(&self) -> &str {
        &self.title
    }

    /// Every bar gets its own column; the plot widens past `size.width`
    /// when there are more trading days than columns.
    fn render(&self, size: ChartSize) -> String {
        let (Some(first), Some(last)) = (self.bars.first(), self.bars.last()) else {
            return format!("{}\n(no data)", self.title);
        };

        let cents = self.cents();
        let max_cents = cents.iter().copied().max().unwrap_or(0).max(1);
        let bars: Vec<Bar> = cents
            .iter()
            .map(|&value| Bar::default().value(value).text_value(String::new()))
            .collect();

        let plot_width = size.width.max(bars.len());
        // plot rows, the baseline rule and the date row
        let height = size.height + 2;

        let body = draw_to_text(AXIS_WIDTH + plot_width + 1, height, |area, buf| {
            let gutter = to_cells(AXIS_WIDTH - 1);
            let plot_rows = to_cells(size.height);

            buf.set_string(0, 0, format!("{:>9.2}", max_cents as f64 / 100.0), Style::default());
            buf.set_string(0, plot_rows - 1, format!("{:>9.2}", 0.0), Style::default());

            let frame = Rect::new(gutter, 0, area.width - gutter, plot_rows + 1);
            let block = Block::default().borders(Borders::LEFT | Borders::BOTTOM);
            let inner = block.inner(frame);
            block.render(frame, buf);

            ratatui::widgets::BarChart::default()
                .data(BarGroup::default().bars(&bars))
                .bar_width(1)
                .bar_gap(0)
                .group_gap(0)
                .max(max_cents)
                .bar_style(Style::default().fg(Color::Cyan))
                .render(inner, buf);

            let dates = Rect::new(inner.x, plot_rows + 1, to_cells(plot_width), 1);
            Paragraph::new(date_span(first.0, last.0, plot_width)).render(dates, buf);
        });

        format!("{}\n{body}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::price::fixtures::series_from_closes;

    /// Plot rows of a rendered chart, gutter and frame stripped
    fn plot_rows(text: &str, height: usize) -> Vec<String> {
        text.lines()
            .skip(1)
            .take(height)
            .map(|l| l.chars().skip(AXIS_WIDTH).collect())
            .collect()
    }

    #[test]
    fn test_one_bar_per_day() {
        let series = series_from_closes("AAPL", &[10.0, 20.0, 15.0]);
        let chart = BarChart::from_series(&series);
        assert_eq!(chart.bars().len(), 3);
        assert_eq!(chart.bars()[1].1, 20.0);
        assert_eq!(chart.title(), "Daily Closing Prices");
    }

    #[test]
    fn test_six_months_draws_every_day() {
        let closes: Vec<f64> = (0..126).map(|i| 100.0 + f64::from(i)).collect();
        let chart = BarChart::from_series(&series_from_closes("AAPL", &closes));
        let size = ChartSize::default();

        let text = chart.render(size);
        let rows = plot_rows(&text, size.height);
        let baseline = rows.last().unwrap();

        assert_eq!(baseline.chars().filter(|&c| c == '█').count(), 126);
    }

    #[test]
    fn test_tallest_bar_reaches_top() {
        let series = series_from_closes("AAPL", &[10.0, 20.0, 15.0]);
        let size = ChartSize::new(30, 4);
        let text = BarChart::from_series(&series).render(size);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Daily Closing Prices");
        // title + 4 plot rows + baseline rule + dates
        assert_eq!(lines.len(), 7);
        assert!(lines[1].contains("20.00"));
        let top = &plot_rows(&text, size.height)[0];
        assert_eq!(top.chars().nth(1), Some('█'));
        assert_ne!(top.chars().next(), Some('█'));
        assert!(lines[6].contains("2024-01-01"));
        assert!(lines[6].contains("2024-01-03"));
    }

    #[test]
    fn test_date_span() {
        let first = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let last = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
        assert_eq!(date_span(first, last, 24), "2024-01-02    2024-06-28");
        assert_eq!(date_span(first, last, 20), "2024-01-02");
        assert_eq!(date_span(first, first, 40), "2024-01-02");
    }

    #[test]
    fn test_empty_chart() {
        let chart = BarChart::from_series(&series_from_closes("AAPL", &[]));
        assert_eq!(chart.render(ChartSize::default()), "Daily Closing Prices\n(no data)");
    }
}
