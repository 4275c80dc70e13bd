//! Price and forecast tables

use crate::models::{ForecastResult, PriceBar};
use comfy_table::{CellAlignment, ContentArrangement, Table, presets};

/// Where a table will be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStyle {
    /// Box-drawing borders for the terminal
    Terminal,
    /// ASCII only, safe for plain-text email
    PlainText,
}

impl TableStyle {
    fn preset(self) -> &'static str {
        match self {
            Self::Terminal => presets::UTF8_FULL_CONDENSED,
            Self::PlainText => presets::ASCII_MARKDOWN,
        }
    }
}

fn new_table(style: TableStyle, header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(style.preset())
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(header);
    table
}

fn align_numeric(table: &mut Table, from_column: usize) {
    let columns = table.column_count();
    for index in from_column..columns {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// Date, Open, High, Low, Close, Volume for each bar
pub fn price_table(bars: &[PriceBar], style: TableStyle) -> String {
    let mut table = new_table(style, vec!["Date", "Open", "High", "Low", "Close", "Volume"]);
    for bar in bars {
        table.add_row(vec![
            bar.date.to_string(),
            format!("{:.2}", bar.open),
            format!("{:.2}", bar.high),
            format!("{:.2}", bar.low),
            format!("{:.2}", bar.close),
            bar.volume.to_string(),
        ]);
    }
    align_numeric(&mut table, 1);
    table.to_string()
}

/// Date, Predicted Close for each forecast point
pub fn forecast_table(result: &ForecastResult, style: TableStyle) -> String {
    let mut table = new_table(style, vec!["Date", "Predicted Close"]);
    for point in &result.points {
        table.add_row(vec![
            point.date.to_string(),
            format!("{:.2}", point.predicted_close),
        ]);
    }
    align_numeric(&mut table, 1);
    table.to_string()
}
