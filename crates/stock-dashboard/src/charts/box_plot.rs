//! Box plot of the four price fields
//!
//! The series is first melted into `{Price Type, Value}` rows, then each
//! category is summarized by quartiles (linear interpolation), whiskers at
//! the most extreme points within 1.5 IQR, and the outliers beyond them.

use super::{AXIS_WIDTH, Chart, ChartSize, bounds, draw_to_text, price_labels};
use crate::models::{PriceField, PriceSeries};
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::text::Line;
use ratatui::widgets::{Axis, Dataset, GraphType, Widget};

/// One row of the long-format price table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeltedRow {
    /// "Price Type" column
    pub price_type: PriceField,
    /// "Value" column
    pub value: f64,
}

/// Reshape four OHLC columns of `M` rows into `4 * M` long-format rows.
///
/// Open rows come first, then High, Low and Close, each in date order.
pub fn melt(series: &PriceSeries) -> Vec<MeltedRow> {
    PriceField::ALL
        .iter()
        .flat_map(|&price_type| {
            series
                .bars()
                .iter()
                .map(move |bar| MeltedRow {
                    price_type,
                    value: bar.field(price_type),
                })
        })
        .collect()
}

/// Distribution summary for one category
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Summarize `values`; `None` when empty or any value is non-finite
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() || values.iter().any(|v| !v.is_finite()) {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

        let inside = sorted.iter().copied().filter(|v| (low_fence..=high_fence).contains(v));
        let lower_whisker = inside.clone().fold(f64::INFINITY, f64::min);
        let upper_whisker = inside.fold(f64::NEG_INFINITY, f64::max);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            outliers,
        })
    }

    fn min(&self) -> f64 {
        self.outliers.iter().copied().fold(self.lower_whisker, f64::min)
    }

    fn max(&self) -> f64 {
        self.outliers.iter().copied().fold(self.upper_whisker, f64::max)
    }
}

/// Quantile of sorted data with linear interpolation between closest ranks
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Half the height of a drawn box, in category units
const BOX_HALF_HEIGHT: f64 = 0.3;

/// Polylines and scatter points making up one drawn box
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BoxGlyphs {
    /// Whiskers, box outline and median, each a connected polyline
    pub segments: Vec<Vec<(f64, f64)>>,
    pub outliers: Vec<(f64, f64)>,
}

impl BoxGlyphs {
    /// Horizontal box for `stats` centred on row `y`
    fn new(stats: &BoxStats, y: f64) -> Self {
        let (top, bottom) = (y + BOX_HALF_HEIGHT, y - BOX_HALF_HEIGHT);
        Self {
            segments: vec![
                vec![(stats.lower_whisker, y), (stats.q1, y)],
                vec![(stats.q3, y), (stats.upper_whisker, y)],
                vec![
                    (stats.q1, bottom),
                    (stats.q3, bottom),
                    (stats.q3, top),
                    (stats.q1, top),
                    (stats.q1, bottom),
                ],
                vec![(stats.median, bottom), (stats.median, top)],
            ],
            outliers: stats.outliers.iter().map(|&v| (v, y)).collect(),
        }
    }
}

/// One box per price field
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlot {
    title: String,
    boxes: Vec<(PriceField, BoxStats)>,
}

impl BoxPlot {
    /// Group melted rows by price type and summarize each group
    pub fn from_melted(rows: &[MeltedRow]) -> Self {
        let boxes = PriceField::ALL
            .iter()
            .filter_map(|&field| {
                let values: Vec<f64> = rows
                    .iter()
                    .filter(|r| r.price_type == field)
                    .map(|r| r.value)
                    .collect();
                BoxStats::from_values(&values).map(|stats| (field, stats))
            })
            .collect();

        Self {
            title: "Stock Price Distribution".to_string(),
            boxes,
        }
    }

    pub fn from_series(series: &PriceSeries) -> Self {
        Self::from_melted(&melt(series))
    }

    pub fn boxes(&self) -> &[(PriceField, BoxStats)] {
        &self.boxes
    }

    /// Category row of each box, first box on top
    fn row_of(&self, index: usize) -> f64 {
        (self.boxes.len() - index) as f64
    }

    pub(crate) fn glyphs(&self) -> Vec<BoxGlyphs> {
        self.boxes
            .iter()
            .enumerate()
            .map(|(i, (_, stats))| BoxGlyphs::new(stats, self.row_of(i)))
            .collect()
    }

    /// Category labels bottom to top with a blank at each end of the axis
    fn category_labels(&self) -> Vec<Line<'static>> {
        std::iter::once(Line::from(""))
            .chain(self.boxes.iter().rev().map(|(field, _)| Line::from(field.label())))
            .chain(std::iter::once(Line::from("")))
            .collect()
    }
}

impl Chart for BoxPlot {
    fn title(&self) -> &str {
        &self.title
    }

    fn render(&self, size: ChartSize) -> String {
        if self.boxes.is_empty() {
            return format!("{}\n(no data)", self.title);
        }

        let min = self.boxes.iter().map(|(_, s)| s.min()).fold(f64::INFINITY, f64::min);
        let max = self.boxes.iter().map(|(_, s)| s.max()).fold(f64::NEG_INFINITY, f64::max);
        let x_bounds = bounds(min, max);

        let glyphs = self.glyphs();
        let box_style = Style::default().fg(Color::Cyan);
        let mut datasets: Vec<Dataset> = glyphs
            .iter()
            .flat_map(|g| g.segments.iter())
            .map(|segment| {
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(box_style)
                    .data(segment)
            })
            .collect();
        datasets.extend(glyphs.iter().filter(|g| !g.outliers.is_empty()).map(|g| {
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Red))
                .data(&g.outliers)
        }));

        let chart = ratatui::widgets::Chart::new(datasets)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds(x_bounds)
                    .labels(price_labels(x_bounds)),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, (self.boxes.len() + 1) as f64])
                    .labels(self.category_labels()),
            );

        let body = draw_to_text(AXIS_WIDTH + size.width, size.height + 2, |area, buf| {
            chart.render(area, buf);
        });

        let mut out = vec![self.title.clone(), body];
        for (field, stats) in &self.boxes {
            out.push(format!(
                "{:>width$}   median {:.2}  Q1 {:.2}  Q3 {:.2}  whiskers {:.2}..{:.2}  outliers {}",
                field.label(),
                stats.median,
                stats.q1,
                stats.q3,
                stats.lower_whisker,
                stats.upper_whisker,
                stats.outliers.len(),
                width = AXIS_WIDTH - 2
            ));
        }
        out.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::price::fixtures::series_from_closes;

    #[test]
    fn test_melt_shape_and_values() {
        let series = series_from_closes("AAPL", &[10.0, 12.0, 11.0, 13.0, 15.0]);
        let rows = melt(&series);

        assert_eq!(rows.len(), 4 * series.len());
        for field in PriceField::ALL {
            let melted: Vec<f64> = rows
                .iter()
                .filter(|r| r.price_type == field)
                .map(|r| r.value)
                .collect();
            assert_eq!(melted, series.column(field));
        }
        assert_eq!(rows[0].price_type, PriceField::Open);
        assert_eq!(rows[rows.len() - 1].price_type, PriceField::Close);
    }

    #[test]
    fn test_box_stats_known_sample() {
        let stats = BoxStats::from_values(&[7.0, 1.0, 3.0, 5.0, 9.0, 100.0, 2.0, 4.0, 6.0, 8.0]).unwrap();

        // sorted: 1 2 3 4 5 6 7 8 9 100
        assert!((stats.q1 - 3.25).abs() < 1e-12);
        assert!((stats.median - 5.5).abs() < 1e-12);
        assert!((stats.q3 - 7.75).abs() < 1e-12);
        assert_eq!(stats.lower_whisker, 1.0);
        assert_eq!(stats.upper_whisker, 9.0);
        assert_eq!(stats.outliers, vec![100.0]);
    }

    #[test]
    fn test_box_stats_rejects_empty() {
        assert!(BoxStats::from_values(&[]).is_none());
        assert!(BoxStats::from_values(&[1.0, f64::NAN]).is_none());
    }

    #[test]
    fn test_one_box_per_field() {
        let series = series_from_closes("AAPL", &[10.0, 12.0, 11.0, 13.0, 15.0, 14.0]);
        let plot = BoxPlot::from_series(&series);
        let fields: Vec<_> = plot.boxes().iter().map(|(f, _)| *f).collect();
        assert_eq!(fields, PriceField::ALL.to_vec());

        let text = plot.render(ChartSize::new(40, 8));
        assert!(text.starts_with("Stock Price Distribution"));
        assert!(text.chars().any(|c| ('\u{2801}'..='\u{28FF}').contains(&c)));
        for field in PriceField::ALL {
            assert!(text.contains(field.label()));
        }
        assert_eq!(text.matches("median").count(), 4);
    }

    #[test]
    fn test_glyph_geometry() {
        let stats = BoxStats::from_values(&[7.0, 1.0, 3.0, 5.0, 9.0, 100.0, 2.0, 4.0, 6.0, 8.0]).unwrap();
        let plot = BoxPlot {
            title: String::new(),
            boxes: vec![(PriceField::Open, stats.clone()), (PriceField::Close, stats)],
        };

        let glyphs = plot.glyphs();
        assert_eq!(glyphs.len(), 2);

        // first box sits on the top row
        let open = &glyphs[0];
        assert_eq!(open.segments[0], vec![(1.0, 2.0), (3.25, 2.0)]);
        assert_eq!(open.segments[1], vec![(7.75, 2.0), (9.0, 2.0)]);
        let median = &open.segments[3];
        assert_eq!(median.len(), 2);
        assert!(median.iter().all(|&(x, _)| x == 5.5));
        assert!((median[0].1 - 1.7).abs() < 1e-12 && (median[1].1 - 2.3).abs() < 1e-12);
        assert_eq!(open.outliers, vec![(100.0, 2.0)]);
        assert_eq!(glyphs[1].segments[0], vec![(1.0, 1.0), (3.25, 1.0)]);
    }

    #[test]
    fn test_single_value_renders() {
        let series = series_from_closes("AAPL", &[5.0]);
        let plot = BoxPlot::from_series(&series);
        assert_eq!(plot.boxes()[0].1.median, series.bars()[0].open);
        assert!(plot.render(ChartSize::default()).contains("Close"));
    }

    #[test]
    fn test_empty_plot() {
        let plot = BoxPlot::from_series(&series_from_closes("AAPL", &[]));
        assert_eq!(plot.render(ChartSize::default()), "Stock Price Distribution\n(no data)");
    }
}
