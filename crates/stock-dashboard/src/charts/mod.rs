//! Terminal renderings of the price history and forecast
//!
//! Each chart is a plain data model built by a pure transform (from a
//! [`PriceSeries`](crate::models::PriceSeries) or a
//! [`ForecastResult`](crate::models::ForecastResult)) plus a `render` method
//! that draws ratatui widgets into an off-screen [`Buffer`] and reads the
//! cells back as text for the prompt.

pub mod bar;
pub mod box_plot;
pub mod line;

pub use bar::BarChart;
pub use box_plot::{BoxPlot, BoxStats, MeltedRow, melt};
pub use line::LineChart;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::text::Line;

/// Width of the y-axis label gutter
pub(crate) const AXIS_WIDTH: usize = 11;

/// Plot area dimensions in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: usize,
    pub height: usize,
}

impl ChartSize {
    pub const MIN_WIDTH: usize = 20;
    pub const MIN_HEIGHT: usize = 4;

    /// Clamp to the smallest usable plot
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(Self::MIN_WIDTH),
            height: height.max(Self::MIN_HEIGHT),
        }
    }
}

impl Default for ChartSize {
    fn default() -> Self {
        Self::new(72, 12)
    }
}

/// Common interface of the three charts
pub trait Chart {
    fn title(&self) -> &str;

    /// Lay the chart out as text, title line first
    fn render(&self, size: ChartSize) -> String;
}

/// Run `draw` on an empty `width` x `height` buffer and return its rows.
///
/// Trailing blanks are trimmed from every row.
pub(crate) fn draw_to_text(width: usize, height: usize, draw: impl FnOnce(Rect, &mut Buffer)) -> String {
    let area = Rect::new(0, 0, to_cells(width), to_cells(height));
    let mut buf = Buffer::empty(area);
    draw(area, &mut buf);

    (area.top()..area.bottom())
        .map(|y| {
            let row: String = (area.left()..area.right())
                .map(|x| buf[(x, y)].symbol())
                .collect();
            row.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn to_cells(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Bounds that always span a non-empty range
pub(crate) fn bounds(min: f64, max: f64) -> [f64; 2] {
    if max > min {
        [min, max]
    } else {
        [min - 1.0, max + 1.0]
    }
}

/// Low, middle and high price labels for a value axis
pub(crate) fn price_labels([low, high]: [f64; 2]) -> Vec<Line<'static>> {
    [low, (low + high) / 2.0, high]
        .into_iter()
        .map(|v| Line::from(format!("{v:.2}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Style;

    #[test]
    fn test_size_clamped() {
        assert_eq!(ChartSize::new(1, 1), ChartSize::new(20, 4));
    }

    #[test]
    fn test_draw_to_text_reads_cells() {
        let text = draw_to_text(8, 2, |area, buf| {
            buf.set_string(area.x, area.y, "ab", Style::default());
            buf.set_string(area.x + 2, area.y + 1, "cd", Style::default());
        });
        assert_eq!(text, "ab\n  cd");
    }

    #[test]
    fn test_bounds_never_collapse() {
        assert_eq!(bounds(1.0, 3.0), [1.0, 3.0]);
        assert_eq!(bounds(42.0, 42.0), [41.0, 43.0]);
    }

    #[test]
    fn test_price_labels() {
        let labels: Vec<String> = price_labels([10.0, 20.0]).iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["10.00", "15.00", "20.00"]);
    }
}
