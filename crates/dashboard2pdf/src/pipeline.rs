//! Run orchestration: validate inputs, then CSV -> workbook -> PDF.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::convert::{ConversionClient, ConversionStatus};
use crate::error::{InputKind, PipelineError};
use crate::ingest;
use crate::populate;
use crate::summary::{self, ColumnSummary};

/// Result of a run that got as far as the conversion stage.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Where the PDF was (or would have been) written.
    pub output: PathBuf,
    pub rows: usize,
    pub columns: usize,
    pub summary: Vec<ColumnSummary>,
    pub status: ConversionStatus,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// 0 when the PDF was written, 2 when conversion failed.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 2 }
    }
}

/// Remove every literal `"` from a pasted path.
///
/// The trailing line terminator of the entered line is dropped. Other
/// whitespace is part of the path and kept.
pub fn strip_quotes(input: &str) -> String {
    input.trim_end_matches(['\r', '\n']).replace('"', "")
}

/// `Factory_Dashboard_<epoch_millis>.pdf`
pub fn output_file_name(epoch_millis: u128) -> String {
    format!("Factory_Dashboard_{epoch_millis}.pdf")
}

/// Output PDF path: `output_dir` if given, else the template's directory.
pub fn resolve_output_path(
    template: &Path,
    output_dir: Option<&Path>,
    epoch_millis: u128,
) -> PathBuf {
    let dir = output_dir
        .map(Path::to_path_buf)
        .or_else(|| template.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(output_file_name(epoch_millis))
}

fn epoch_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

fn ensure_exists(kind: InputKind, path: &Path) -> Result<(), PipelineError> {
    if path.exists() {
        Ok(())
    } else {
        Err(PipelineError::InputNotFound {
            kind,
            path: path.to_path_buf(),
        })
    }
}

fn remove_temp(path: &Path) {
    if !path.exists() {
        return;
    }
    match std::fs::remove_file(path) {
        Ok(()) => debug!(path = %path.display(), "removed temporary workbook"),
        Err(e) => warn!(path = %path.display(), "failed to remove temporary workbook: {e}"),
    }
}

/// Run the whole pipeline once.
///
/// Missing inputs and a bad endpoint are rejected before anything is
/// written. CSV and template failures are returned as errors; conversion
/// failures come back inside the [`RunReport`]. The temporary workbook is
/// removed whenever a later stage fails or finishes.
pub fn run(config: &PipelineConfig) -> Result<RunReport, PipelineError> {
    ensure_exists(InputKind::Csv, &config.csv_path)?;
    ensure_exists(InputKind::Template, &config.template_path)?;
    let client = ConversionClient::new(&config.endpoint, config.timeout)?;

    let output = resolve_output_path(
        &config.template_path,
        config.output_dir.as_deref(),
        epoch_millis(),
    );

    info!(path = %config.csv_path.display(), "[1/3] reading CSV data");
    let dataset = ingest::read_csv(&config.csv_path)?;
    let summary = summary::summarize(&dataset);
    let columns = dataset.max_columns();
    info!(rows = dataset.len(), columns, "dataset loaded");
    for column in &summary {
        debug!(?column, "column summary");
    }

    info!(path = %config.template_path.display(), "[2/3] populating template");
    let temp = populate::temp_workbook_path(&config.work_dir);
    let populated = populate::populate_template(&config.template_path, &dataset, &config.work_dir);
    let workbook = match populated {
        Ok(path) => path,
        Err(e) => {
            remove_temp(&temp);
            return Err(e);
        }
    };

    info!(endpoint = client.endpoint(), "[3/3] converting to PDF");
    let status = client.convert(&workbook, &output);
    remove_temp(&workbook);

    Ok(RunReport {
        output,
        rows: dataset.len(),
        columns,
        summary,
        status,
    })
}
