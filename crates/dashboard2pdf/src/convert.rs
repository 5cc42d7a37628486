//! Conversion service client.
//!
//! Uploads a workbook as multipart form data (`files` plus `pageRanges`) and
//! stores the returned PDF. Failures are reported as a [`ConversionStatus`]
//! rather than an error so the run can still clean up and report.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, multipart};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::PAGE_RANGES;
use crate::error::PipelineError;

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Longest slice of an error response body kept in the failure reason.
const MAX_ERROR_BODY: usize = 200;

/// Outcome of one conversion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionStatus {
    /// PDF written; `bytes` is its size.
    Converted { bytes: u64 },
    Failed { reason: String },
}

impl ConversionStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }
}

#[derive(Debug, Error)]
enum ConversionError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Blocking HTTP client for the document conversion service.
#[derive(Debug, Clone)]
pub struct ConversionClient {
    client: Client,
    endpoint: String,
}

impl ConversionClient {
    /// Create a client for `endpoint`; `timeout` bounds each whole request.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, PipelineError> {
        let endpoint = endpoint.into();
        reqwest::Url::parse(&endpoint)
            .map_err(|e| PipelineError::Config(format!("invalid endpoint {endpoint:?}: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PipelineError::Config(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Convert page 1 of `source` to PDF at `destination`, overwriting it.
    pub fn convert(&self, source: &Path, destination: &Path) -> ConversionStatus {
        match self.try_convert(source, destination) {
            Ok(bytes) => {
                info!(bytes, path = %destination.display(), "wrote PDF");
                ConversionStatus::Converted { bytes }
            }
            Err(e) => {
                error!(endpoint = %self.endpoint, "conversion failed: {e}");
                ConversionStatus::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn try_convert(&self, source: &Path, destination: &Path) -> Result<u64, ConversionError> {
        let data = std::fs::read(source).map_err(|e| ConversionError::Read {
            path: source.display().to_string(),
            source: e,
        })?;
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "workbook.xlsx".to_string());

        debug!(bytes = data.len(), endpoint = %self.endpoint, "uploading workbook");
        let part = multipart::Part::bytes(data)
            .file_name(file_name)
            .mime_str(XLSX_MIME)?;
        let form = multipart::Form::new()
            .part("files", part)
            .text("pageRanges", PAGE_RANGES);

        let response = self.client.post(&self.endpoint).multipart(form).send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ConversionError::Status {
                status,
                body: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let pdf = response.bytes()?;
        std::fs::write(destination, &pdf).map_err(|e| ConversionError::Write {
            path: destination.display().to_string(),
            source: e,
        })?;
        Ok(pdf.len() as u64)
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    let trimmed = s.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
