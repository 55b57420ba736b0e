//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Search a book catalog and download one result.
///
/// Every results page for the search term is collected, filtered to the
/// requested format, and offered for selection. The chosen book is fetched
/// from its first mirror and saved to the output directory.
#[derive(Parser, Debug)]
#[command(name = "toshi")]
#[command(author, version, about)]
pub struct Args {
    /// Search term (multiple words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub term: Vec<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Catalog search endpoint
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Directory downloads are written to
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Only offer results with this file extension (default: epub)
    #[arg(short, long, value_name = "EXT", conflicts_with = "all_formats")]
    pub format: Option<String>,

    /// Offer results in every format
    #[arg(long)]
    pub all_formats: bool,

    /// Delay between results pages in milliseconds (0 to disable, max 60000)
    #[arg(long, value_name = "MS", value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub page_delay_ms: Option<u64>,

    /// Time budget for the whole search in seconds (1-3600)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub search_timeout: Option<u64>,

    /// Time budget for resolving and downloading the chosen book in seconds (1-3600)
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub download_timeout: Option<u64>,

    /// User-Agent header sent with every request
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Download the Nth result (1-based) without prompting
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..), conflicts_with_all = ["list", "json"])]
    pub pick: Option<u64>,

    /// Print the results and exit without downloading
    #[arg(short, long)]
    pub list: bool,

    /// Print results as JSON (implies --list)
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// The search term as typed, words joined by single spaces.
    #[must_use]
    pub fn search_term(&self) -> String {
        self.term.join(" ")
    }

    /// Whether results are listed instead of downloaded.
    #[must_use]
    pub fn list_only(&self) -> bool {
        self.list || self.json
    }
}
