//! CLI entry point for toshi.

use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use toshi_core::{IndexPicker, Record, RecordPicker, Session};
use tracing::{debug, info};

mod app_config;
mod cli;
mod picker;

use cli::Args;
use picker::TerminalPicker;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let file_config = app_config::load_default_file_config()?;
    let config = app_config::merge(&args, file_config.as_ref());
    debug!(?config, "configuration resolved");

    let session = Session::new(&config).context("Failed to create HTTP client")?;
    let term = args.search_term();
    let use_spinner = !args.quiet && io::stderr().is_terminal();

    let spinner = start_spinner(use_spinner, format!("Searching for \"{term}\"..."));
    let searched = session.search(&term).await;
    finish_spinner(spinner);
    let records = searched.with_context(|| format!("Search for \"{term}\" failed"))?;
    info!(records = records.len(), "search finished");

    if records.is_empty() {
        println!("No results found for \"{term}\".");
        return Ok(());
    }

    if args.list_only() {
        return print_records(&records, args.json);
    }

    let choice = match args.pick {
        Some(n) => {
            let index = usize::try_from(n).context("--pick value is too large")?;
            let choice = IndexPicker(index).pick(&records);
            if choice.is_none() {
                anyhow::bail!("--pick {n} is out of range: {} results", records.len());
            }
            choice
        }
        None => TerminalPicker::new(io::stdin().lock(), io::stdout()).pick(&records),
    };

    let Some(record) = choice else {
        println!("No book selected.");
        return Ok(());
    };
    println!("Selected: {} ({})", record.title, record.extension);

    let spinner = start_spinner(use_spinner, format!("Downloading \"{}\"...", record.title));
    let downloaded = session.download(&record).await;
    finish_spinner(spinner);
    let report = downloaded.with_context(|| format!("Download of \"{}\" failed", record.title))?;

    println!(
        "Downloaded {} bytes from {} to {}",
        report.bytes,
        report.url,
        report.path.display()
    );
    Ok(())
}

fn print_records(records: &[Record], json: bool) -> Result<()> {
    if json {
        let rendered =
            serde_json::to_string_pretty(records).context("Failed to serialize results")?;
        println!("{rendered}");
        return Ok(());
    }

    for (index, record) in records.iter().enumerate() {
        println!(
            "{:>3}. {} - {} [{}, {}, {}]",
            index + 1,
            record.authors,
            record.title,
            record.year,
            record.extension,
            record.size
        );
    }
    Ok(())
}

fn start_spinner(enabled: bool, message: String) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

fn finish_spinner(spinner: Option<ProgressBar>) {
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
}
