//! Mirror resolution: turns a selected record into candidate download URLs.
//!
//! Resolution is best effort. It reads the record's primary mirror page,
//! keeps the links in its download section whose URL mentions the record's
//! file extension, and returns them in page order. Nothing here raises; an
//! unreachable mirror simply resolves to no candidates.
//!
//! # Example
//!
//! ```no_run
//! use toshi_core::catalog::Record;
//! use toshi_core::resolver::resolve_candidates;
//! use toshi_core::transport::HttpClient;
//!
//! # async fn example(record: Record) -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! for url in resolve_candidates(&client, &record).await {
//!     println!("{url}");
//! }
//! # Ok(())
//! # }
//! ```

mod mirror;

pub use mirror::{extract_candidates, resolve_candidates};
