mod prompt;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use dashboard2pdf::config::{DEFAULT_ENDPOINT, ENDPOINT_ENV, PipelineConfig};
use dashboard2pdf::{ConversionStatus, PipelineError};

#[derive(Parser, Debug)]
#[command(
    name = "dashboard2pdf",
    version,
    about = "Fill an XLSX dashboard template from CSV data and render it to PDF"
)]
struct Cli {
    /// Raw CSV data file (prompted for when omitted)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// XLSX dashboard template (prompted for when omitted)
    #[arg(long)]
    template: Option<PathBuf>,

    /// Directory for the PDF (default: the template's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Conversion service URL
    #[arg(long, env = ENDPOINT_ENV, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Conversion request timeout in seconds
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,

    /// Directory for the temporary workbook
    #[arg(long, default_value = ".")]
    work_dir: PathBuf,

    /// Print per-column statistics of the CSV as JSON
    #[arg(long)]
    summary: bool,
}

fn main() {
    init_tracing();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code(&err)
        }
    };
    process::exit(code);
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// 1 for validation problems, 2 for pipeline failures.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<PipelineError>()
        .map(PipelineError::exit_code)
        .unwrap_or(1)
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = build_config(cli.resolve_inputs()?, &cli);
    tracing::debug!(?config, "resolved configuration");

    let report = dashboard2pdf::run(&config)?;

    if cli.summary {
        let json =
            serde_json::to_string_pretty(&report.summary).context("serializing summary")?;
        println!("{json}");
    }

    match &report.status {
        ConversionStatus::Converted { .. } => {
            println!("Dashboard PDF written: {}", report.output.display());
        }
        ConversionStatus::Failed { reason } => {
            eprintln!("Conversion failed: {reason}");
        }
    }
    Ok(report.exit_code())
}

impl Cli {
    /// CSV and template paths, prompting on stdin for any that are missing.
    fn resolve_inputs(&self) -> Result<(PathBuf, PathBuf)> {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();

        let csv = match &self.csv {
            Some(path) => path.clone(),
            None => prompt::prompt_path(prompt::CSV_PROMPT, &mut input, &mut output)?,
        };
        let template = match &self.template {
            Some(path) => path.clone(),
            None => prompt::prompt_path(prompt::TEMPLATE_PROMPT, &mut input, &mut output)?,
        };
        Ok((csv, template))
    }
}

fn build_config((csv, template): (PathBuf, PathBuf), cli: &Cli) -> PipelineConfig {
    let mut config = PipelineConfig::new(csv, template);
    config.output_dir = cli.output_dir.clone();
    config.work_dir = cli.work_dir.clone();
    config.endpoint = cli.endpoint.clone();
    config.timeout = Duration::from_secs(cli.timeout);
    config
}
