//! Printing a finished scan.

use std::io::{self, Write};
use std::path::Path;

use crate::error::{ScanError, ScanResult};
use crate::search::{MatchRecord, ScanOutcome};

pub const NOT_FOUND: &str = "The searched text was not found.";

/// Bytes written to a results file: record blocks back to back.
pub fn render_records(matches: &[MatchRecord]) -> String {
    matches.iter().map(ToString::to_string).collect()
}

/// Print the summary, then the records (or the not-found notice) to `out`.
///
/// With `output` set, records go to that file instead and `out` only gets
/// the location they were saved to.
pub async fn report<W: Write>(
    outcome: &ScanOutcome,
    output: Option<&Path>,
    out: &mut W,
) -> ScanResult<()> {
    let stdout_err = |source| ScanError::OutputWrite {
        path: "<stdout>".into(),
        source,
    };

    writeln!(out, "{}", outcome.summary).map_err(stdout_err)?;

    if outcome.matches.is_empty() {
        writeln!(out, "{NOT_FOUND}").map_err(stdout_err)?;
        return Ok(());
    }

    match output {
        Some(path) => {
            save(path, &outcome.matches).await?;
            writeln!(out, "Search results were saved to {}", path.display())
                .map_err(stdout_err)?;
        }
        None => print_records(&outcome.matches, out).map_err(stdout_err)?,
    }
    Ok(())
}

/// Each record block followed by a blank line.
pub fn print_records<W: Write>(matches: &[MatchRecord], out: &mut W) -> io::Result<()> {
    for record in matches {
        writeln!(out, "{record}")?;
    }
    Ok(())
}

/// Create or truncate `path` and write the record blocks to it.
pub async fn save(path: &Path, matches: &[MatchRecord]) -> ScanResult<()> {
    tokio::fs::write(path, render_records(matches))
        .await
        .map_err(|source| ScanError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })
}
