use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use pdf_table_sections::{
    DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, ExtractOptions, ExtractionReport,
    extract_pdf_to_json,
};
use tracing_subscriber::EnvFilter;

/// Reads `temp.pdf`, groups its table rows into Title-led sections and writes
/// them to `temp.json`.
#[derive(Debug, Parser)]
#[command(
    name = "pdf2json",
    version,
    about = "Extract Title-grouped table sections from temp.pdf into temp.json"
)]
struct Cli {
    /// Print every warning collected during extraction.
    #[arg(short, long)]
    verbose: bool,
}

fn log_report(report: &ExtractionReport, verbose: bool) {
    if report.warnings.is_empty() {
        return;
    }

    eprintln!("warning: {} issue(s) detected", report.warnings.len());
    if verbose {
        for warning in &report.warnings {
            eprintln!("  - {warning}");
        }
    }
}

fn run(input: &Path, output: &Path) -> Result<ExtractionReport> {
    extract_pdf_to_json(input, output, &ExtractOptions::default())
        .with_context(|| format!("failed to extract tables from '{}'", input.display()))
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("pdf_table_sections=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    let input = Path::new(DEFAULT_INPUT_PATH);
    let output = Path::new(DEFAULT_OUTPUT_PATH);

    match run(input, output) {
        Ok(report) => {
            log_report(&report, cli.verbose);
            println!(
                "Cleaned table data has been written to {}",
                output.display()
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(1)
        }
    }
}
