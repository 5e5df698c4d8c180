//! Keyword search over archive entries.

pub mod matcher;
pub mod results;
pub mod scanner;

pub use matcher::KeywordMatcher;
pub use results::{MatchRecord, ScanOutcome, ScanSummary};
pub use scanner::{LineScanner, scan, scan_archive};
