use std::path::PathBuf;
use thiserror::Error;

/// Failures that end a scan. None of them are recoverable: the first one
/// stops the run and no results are reported.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot open archive {location}")]
    ArchiveOpen {
        location: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("cannot open entry {name}")]
    EntryOpen {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("read error in {name} after line {line}")]
    ScanRead {
        name: String,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write results to {}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type ScanResult<T> = Result<T, ScanError>;
