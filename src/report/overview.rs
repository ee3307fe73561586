//! Console rendering of a [`DatasetSummary`].

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::analysis::DatasetSummary;

/// Build a per-column table for terminal output.
pub fn overview_table(summary: &DatasetSummary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Kind"),
        header_cell("Non-null"),
        header_cell("Missing"),
        header_cell("Missing %"),
        header_cell("Unique"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Mean"),
        header_cell("Examples"),
    ]);
    for idx in 3..=9 {
        if let Some(column) = table.column_mut(idx) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }

    for row in summary.to_rows() {
        let missing_cell = if row.missing > 0 {
            Cell::new(row.missing).fg(Color::Yellow)
        } else {
            Cell::new(row.missing)
        };
        table.add_row(vec![
            Cell::new(&row.name).add_attribute(Attribute::Bold),
            Cell::new(&row.dtype),
            Cell::new(format!("{:?}", row.kind).to_lowercase()),
            Cell::new(row.non_null),
            missing_cell,
            Cell::new(format!("{:.1}", row.missing_share * 100.0)),
            Cell::new(row.unique),
            stat_cell(row.min),
            stat_cell(row.max),
            stat_cell(row.mean),
            Cell::new(&row.example_values).fg(Color::DarkGrey),
        ]);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn stat_cell(value: Option<f64>) -> Cell {
    match value {
        Some(v) => Cell::new(format!("{v:.3}")),
        None => Cell::new("-").fg(Color::DarkGrey),
    }
}
