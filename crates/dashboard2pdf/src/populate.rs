//! Template population.
//!
//! Loads the XLSX template, writes the dataset into the `DashboardData`
//! sheet starting at A2, hides that sheet and saves the result as the
//! temporary workbook. Charts elsewhere in the template reference the data
//! sheet by name and address, so neither may change.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use umya_spreadsheet::{SheetStateValues, Spreadsheet};

use crate::config::{DATA_SHEET_NAME, TEMP_WORKBOOK_NAME};
use crate::error::PipelineError;
use crate::ingest::{CellValue, Dataset};

/// First spreadsheet row written; row 1 holds the template's headers.
const FIRST_DATA_ROW: u32 = 2;

/// XLSX grid limits.
const MAX_ROWS: usize = 1_048_576;
const MAX_COLUMNS: usize = 16_384;

/// Path of the temporary workbook inside `work_dir`.
pub fn temp_workbook_path(work_dir: impl AsRef<Path>) -> PathBuf {
    work_dir.as_ref().join(TEMP_WORKBOOK_NAME)
}

/// Populate `template` with `dataset` and save it to the temporary path.
///
/// Returns the path of the written workbook.
pub fn populate_template(
    template: impl AsRef<Path>,
    dataset: &Dataset,
    work_dir: impl AsRef<Path>,
) -> Result<PathBuf, PipelineError> {
    let template = template.as_ref();
    let mut book = umya_spreadsheet::reader::xlsx::read(template).map_err(|e| {
        PipelineError::Template(format!("failed to read {}: {e}", template.display()))
    })?;

    inject_dataset(&mut book, dataset)?;

    let work_dir = work_dir.as_ref();
    std::fs::create_dir_all(work_dir)?;
    let out = temp_workbook_path(work_dir);
    umya_spreadsheet::writer::xlsx::write(&book, &out).map_err(|e| {
        PipelineError::Template(format!("failed to write {}: {e}", out.display()))
    })?;

    info!(path = %out.display(), "saved populated workbook");
    Ok(out)
}

/// Write `dataset` into the data sheet of `book` and hide the sheet.
///
/// The sheet is created if missing. Cells beyond the end of a short row are
/// left as they were. A dataset that does not fit below row 1 of an XLSX
/// sheet is rejected before the book is touched.
pub fn inject_dataset(book: &mut Spreadsheet, dataset: &Dataset) -> Result<(), PipelineError> {
    check_fits(dataset)?;

    if book.get_sheet_by_name(DATA_SHEET_NAME).is_none() {
        debug!(sheet = DATA_SHEET_NAME, "creating data sheet");
        book.new_sheet(DATA_SHEET_NAME)
            .map_err(|e| PipelineError::Template(format!("cannot add {DATA_SHEET_NAME}: {e}")))?;
    }
    let sheet = book.get_sheet_by_name_mut(DATA_SHEET_NAME).ok_or_else(|| {
        PipelineError::Template(format!("sheet {DATA_SHEET_NAME} not found"))
    })?;

    for (row_offset, row) in dataset.rows.iter().enumerate() {
        let row_idx = FIRST_DATA_ROW + row_offset as u32;
        for (col_offset, value) in row.iter().enumerate() {
            // umya-spreadsheet tuple is (column, row), both 1-indexed
            let cell = sheet.get_cell_mut((col_offset as u32 + 1, row_idx));
            match value {
                CellValue::Number(n) => {
                    cell.set_value_number(*n);
                }
                CellValue::Text(s) => {
                    cell.set_value_string(s.as_str());
                }
            }
        }
    }

    sheet.set_state(SheetStateValues::Hidden);
    debug!(
        rows = dataset.len(),
        columns = dataset.max_columns(),
        "wrote dataset into {DATA_SHEET_NAME}"
    );
    Ok(())
}

fn check_fits(dataset: &Dataset) -> Result<(), PipelineError> {
    let last_row = dataset.len() + FIRST_DATA_ROW as usize - 1;
    if last_row > MAX_ROWS {
        return Err(PipelineError::Template(format!(
            "{} data rows exceed the XLSX limit of {MAX_ROWS} rows",
            dataset.len()
        )));
    }
    let columns = dataset.max_columns();
    if columns > MAX_COLUMNS {
        return Err(PipelineError::Template(format!(
            "{columns} columns exceed the XLSX limit of {MAX_COLUMNS} columns"
        )));
    }
    Ok(())
}
