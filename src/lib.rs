//! # zipfinder
//!
//! Search the text of every file inside a ZIP archive for one or more
//! keywords and report each matching line with its entry name and line
//! number.
//!
//! Archives are read through the [`ReadAt`] trait, so the same scan works on
//! a local file or on a remote archive fetched with HTTP Range requests; only
//! the central directory and the scanned entries are transferred.
//!
//! ## Example
//!
//! ```no_run
//! use zipfinder::{SearchConfig, scan};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = SearchConfig::new("logs.zip", "error,timeout");
//!     let outcome = scan(&config).await?;
//!
//!     println!("{} files, {} bytes", outcome.summary.file_count, outcome.summary.total_size);
//!     for record in &outcome.matches {
//!         println!("{}:{}: {}", record.entry, record.line_number, record.line);
//!     }
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod report;
pub mod search;

pub use archive::{ZipArchive, ZipEntry};
pub use cli::Cli;
pub use config::SearchConfig;
pub use error::{ScanError, ScanResult};
pub use io::{HttpRangeReader, LocalFileReader, ReadAt};
pub use search::{KeywordMatcher, MatchRecord, ScanOutcome, ScanSummary, scan, scan_archive};
