//! CSV ingestion.
//!
//! Reads a header-bearing CSV file into a [`Dataset`]. Each field is coerced
//! to a number when it looks like one and kept verbatim otherwise.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::PipelineError;

/// A single scalar cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

/// One CSV data record, in file column order.
pub type Row = Vec<CellValue>;

/// Parsed CSV contents: header names plus data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the widest row.
    pub fn max_columns(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Read and coerce a CSV file from disk.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Dataset, PipelineError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .map_err(|e| PipelineError::Csv(format!("cannot open {}: {e}", path.display())))?;
    read_csv_from_reader(file)
}

/// Read and coerce CSV data from any reader.
///
/// Records are read positionally, so column order always matches the file.
/// Ragged records are accepted and kept at their own length.
pub fn read_csv_from_reader<R: Read>(reader: R) -> Result<Dataset, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(coerce_field).collect());
    }

    debug!(columns = headers.len(), rows = rows.len(), "parsed CSV");
    Ok(Dataset { headers, rows })
}

/// Coerce one raw field.
///
/// Numeric when the trimmed text is non-empty and parses as a finite `f64`;
/// otherwise the original, untrimmed text. Non-finite tokens such as `NaN`
/// or `inf` stay text because XLSX cannot store them as numbers.
pub fn coerce_field(raw: &str) -> CellValue {
    let trimmed = raw.trim();
    if !trimmed.is_empty()
        && let Ok(n) = trimmed.parse::<f64>()
        && n.is_finite()
    {
        return CellValue::Number(n);
    }
    CellValue::Text(raw.to_string())
}
