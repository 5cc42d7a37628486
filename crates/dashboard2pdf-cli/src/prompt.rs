//! Interactive input for paths not given on the command line.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use dashboard2pdf::pipeline::strip_quotes;

pub const CSV_PROMPT: &str = "Enter path to Raw CSV Data: ";
pub const TEMPLATE_PROMPT: &str = "Enter path to Excel Template: ";

/// Print `label`, read one line, and return it as a path with quotes removed.
///
/// Only the line terminator is trimmed, so leading or trailing spaces stay
/// in the path. An answer that is blank after quote removal is an error.
pub fn prompt_path(
    label: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<PathBuf> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .with_context(|| format!("reading answer to {:?}", label.trim()))?;
    if read == 0 {
        bail!("no input for {:?}", label.trim());
    }

    let path = strip_quotes(&line);
    if path.trim().is_empty() {
        bail!("empty path for {:?}", label.trim());
    }
    Ok(PathBuf::from(path))
}
