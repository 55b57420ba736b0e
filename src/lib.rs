//! Toshi Core Library
//!
//! Searches a public book catalog by free-text term, collects every result
//! row across all results pages, lets a caller pick one record, resolves the
//! record's mirror page into candidate download links, and saves the first
//! candidate that works.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`transport`] - the `Fetch` capability and its `reqwest` implementation
//! - [`search`] - URL building, pagination discovery, result page parsing
//! - [`catalog`] - the `Record` type, row parsing, filenames, format filter
//! - [`resolver`] - mirror page to candidate download links
//! - [`download`] - ordered candidate attempts persisted to disk
//! - [`select`] - the record picking boundary
//! - [`session`] - one search-pick-download run with stage timeouts
//! - [`config`] - merged pipeline settings

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod download;
pub mod resolver;
pub mod search;
pub mod select;
pub mod session;
pub mod transport;
pub mod user_agent;

mod util;

// Re-export commonly used types
pub use catalog::{Record, build_filename, filter_by_extension};
pub use config::PipelineConfig;
pub use download::{DownloadAttempter, DownloadError, DownloadReport};
pub use resolver::resolve_candidates;
pub use search::{SearchError, SearchOrchestrator, page_url};
pub use select::{IndexPicker, RecordPicker};
pub use session::{Session, SessionError, SessionOutcome};
pub use transport::{Fetch, Fetched, HttpClient, TransportError};
