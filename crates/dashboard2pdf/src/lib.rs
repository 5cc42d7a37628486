pub mod config;
pub mod convert;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod populate;
pub mod summary;

pub use config::PipelineConfig;
pub use convert::{ConversionClient, ConversionStatus};
pub use error::PipelineError;
pub use ingest::{CellValue, Dataset, Row};
pub use pipeline::{RunReport, run};

use std::path::{Path, PathBuf};

/// Read `csv` and populate `template` with it, returning the temporary workbook path.
///
/// Stages 1 and 2 of [`run`] without the conversion call; useful to inspect
/// the populated workbook locally.
pub fn build_workbook(
    csv: impl AsRef<Path>,
    template: impl AsRef<Path>,
    work_dir: impl AsRef<Path>,
) -> Result<PathBuf, PipelineError> {
    let dataset = ingest::read_csv(csv)?;
    populate::populate_template(template, &dataset, work_dir)
}
