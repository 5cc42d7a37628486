use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a dashboard run.
///
/// Conversion-service failures are not represented here: the conversion
/// client reports them through [`crate::convert::ConversionStatus`].
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{kind} file not found: {}", .path.display())]
    InputNotFound { kind: InputKind, path: PathBuf },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Process exit code for this error: 1 for validation, 2 for pipeline failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InputNotFound { .. } | Self::Config(_) => 1,
            Self::Csv(_) | Self::Template(_) | Self::Io(_) => 2,
        }
    }
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Which of the two user-supplied inputs a path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Csv,
    Template,
}

impl std::fmt::Display for InputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => f.write_str("CSV"),
            Self::Template => f.write_str("template"),
        }
    }
}
