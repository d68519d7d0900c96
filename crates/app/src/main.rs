use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pantry_ocr::ExtractionPolicy;
use tracing_subscriber::EnvFilter;

mod commands;

/// Read expiration dates out of OCR text scraped from packaging.
#[derive(Debug, Parser)]
#[command(name = "pantry-scan", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML file with extraction settings.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured policy (permissive or bounded).
    #[arg(long, global = true)]
    pub policy: Option<ExtractionPolicy>,

    /// Date the bounded policy treats as today. Defaults to the local date.
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Print only the first date found, or nothing.
    #[arg(long, global = true)]
    pub first: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract dates from OCR text in FILE, or from stdin.
    Extract { file: Option<PathBuf> },
    /// Scan a JSON array of OCR blocks exported from a device.
    Blocks { file: PathBuf },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = commands::run(&cli)?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
