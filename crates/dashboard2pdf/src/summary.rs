//! Per-column descriptive statistics for an ingested dataset.

use serde::Serialize;

use crate::ingest::{CellValue, Dataset};

/// Statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    /// Cells coerced to numbers.
    pub numeric: usize,
    /// Non-empty text cells.
    pub text: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Summarize every column, by position.
///
/// Columns beyond the header (from over-long rows) are named `column_<n>`,
/// 1-indexed. Cells missing from short rows are not counted.
pub fn summarize(dataset: &Dataset) -> Vec<ColumnSummary> {
    let width = dataset.headers.len().max(dataset.max_columns());
    (0..width)
        .map(|col| {
            let name = dataset
                .headers
                .get(col)
                .cloned()
                .unwrap_or_else(|| format!("column_{}", col + 1));
            summarize_column(name, dataset.rows.iter().filter_map(|r| r.get(col)))
        })
        .collect()
}

fn summarize_column<'a>(
    name: String,
    cells: impl Iterator<Item = &'a CellValue>,
) -> ColumnSummary {
    let mut numeric = 0usize;
    let mut text = 0usize;
    let mut sum = 0.0;
    let mut min: Option<f64> = None;
    let mut max: Option<f64> = None;

    for cell in cells {
        match cell {
            CellValue::Number(n) => {
                numeric += 1;
                sum += n;
                min = Some(min.map_or(*n, |m| m.min(*n)));
                max = Some(max.map_or(*n, |m| m.max(*n)));
            }
            CellValue::Text(s) if !s.trim().is_empty() => text += 1,
            CellValue::Text(_) => {}
        }
    }

    ColumnSummary {
        name,
        numeric,
        text,
        mean: (numeric > 0).then(|| sum / numeric as f64),
        min,
        max,
    }
}
