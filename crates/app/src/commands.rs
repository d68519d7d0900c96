use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use pantry_core::ResultSet;
use pantry_ocr::{ExpirationScanner, ExtractorConfig, OcrBlock, StaticRecognizer, Strategy};

use crate::{Cli, Command};

/// Execute one invocation and return what should be printed.
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    let strategy = build_strategy(cli)?;

    match &cli.command {
        Command::Extract { file } => {
            let text = read_input(file.as_deref())?;
            let dates = strategy.extract(&text);
            tracing::info!(count = dates.len(), "extraction finished");
            render_dates(&dates, cli.first)
        }
        Command::Blocks { file } => {
            let json = fs::read_to_string(file)
                .with_context(|| format!("Failed to read OCR blocks from {}", file.display()))?;
            let blocks: Vec<OcrBlock> = serde_json::from_str(&json)
                .with_context(|| format!("Invalid OCR block JSON in {}", file.display()))?;

            let scanner = ExpirationScanner::new(StaticRecognizer::new(blocks), strategy);
            let outcome = scanner.scan(&[])?;
            if cli.first {
                return Ok(outcome.first().map(|d| d.to_string()).unwrap_or_default());
            }
            Ok(serde_json::to_string(&outcome)?)
        }
    }
}

fn build_strategy(cli: &Cli) -> anyhow::Result<Strategy> {
    let mut config = match &cli.config {
        Some(path) => ExtractorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ExtractorConfig::default(),
    };
    if let Some(policy) = cli.policy {
        config.policy = policy;
    }

    let today = cli.today.unwrap_or_else(|| chrono::Local::now().date_naive());
    tracing::debug!(policy = %config.policy, %today, horizon = %config.horizon, "extraction settings");
    Ok(config.build(today))
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read OCR text from {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read OCR text from stdin")?;
            Ok(text)
        }
    }
}

fn render_dates(dates: &ResultSet, first_only: bool) -> anyhow::Result<String> {
    if first_only {
        return Ok(dates.first().map(|d| d.to_string()).unwrap_or_default());
    }
    Ok(serde_json::to_string(dates)?)
}
