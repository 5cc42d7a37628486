use std::path::PathBuf;
use std::time::Duration;

/// Name of the sheet that charts in the template read their data from.
pub const DATA_SHEET_NAME: &str = "DashboardData";

/// File name of the intermediate workbook written to the work directory.
pub const TEMP_WORKBOOK_NAME: &str = "temp_dashboard.xlsx";

/// Page range sent to the conversion service (first printable page only).
pub const PAGE_RANGES: &str = "1";

/// Conversion endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/forms/libreoffice/convert";

/// Environment variable that overrides [`DEFAULT_ENDPOINT`].
pub const ENDPOINT_ENV: &str = "DASHBOARD2PDF_ENDPOINT";

/// Upper bound on a single conversion request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Options for a single dashboard run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Raw CSV data file.
    pub csv_path: PathBuf,
    /// XLSX template containing the dashboard charts.
    pub template_path: PathBuf,
    /// Where the PDF is written (default: the template's directory).
    pub output_dir: Option<PathBuf>,
    /// Directory for the temporary workbook.
    pub work_dir: PathBuf,
    /// Conversion service URL.
    pub endpoint: String,
    /// Timeout for the conversion request.
    pub timeout: Duration,
}

impl PipelineConfig {
    /// Build a config with default endpoint, timeout and work directory.
    pub fn new(csv_path: impl Into<PathBuf>, template_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            template_path: template_path.into(),
            output_dir: None,
            work_dir: PathBuf::from("."),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = PipelineConfig::new("data.csv", "template.xlsx");
        assert_eq!(config.csv_path, PathBuf::from("data.csv"));
        assert_eq!(config.template_path, PathBuf::from("template.xlsx"));
        assert_eq!(config.output_dir, None);
        assert_eq!(config.work_dir, PathBuf::from("."));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_constants() {
        assert_eq!(DATA_SHEET_NAME, "DashboardData");
        assert_eq!(PAGE_RANGES, "1");
        assert!(TEMP_WORKBOOK_NAME.ends_with(".xlsx"));
    }
}
