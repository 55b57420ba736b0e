//! Downloading a book from its resolved candidate links.
//!
//! Candidates are tried one at a time in the order the mirror listed them.
//! The first one that answers with content is written to the output
//! directory and nothing else is requested.
//!
//! # Example
//!
//! ```no_run
//! use toshi_core::download::DownloadAttempter;
//! use toshi_core::transport::HttpClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let candidates = vec!["https://cdn.example/book.epub".to_string()];
//! let report = DownloadAttempter::new("./output")
//!     .attempt(&client, &candidates, "Doe - Book.epub")
//!     .await?;
//! println!("Downloaded {} bytes to {}", report.bytes, report.path.display());
//! # Ok(())
//! # }
//! ```

mod attempter;
mod error;

pub use attempter::{AttemptState, DEFAULT_OUTPUT_DIR, DownloadAttempter, DownloadReport};
pub use error::DownloadError;
