//! The single pass over an archive's entries.

use std::borrow::Cow;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::matcher::KeywordMatcher;
use super::results::{MatchRecord, ScanOutcome};
use crate::archive::ZipArchive;
use crate::config::SearchConfig;
use crate::error::{ScanError, ScanResult};
use crate::io::{HttpRangeReader, LocalFileReader, ReadAt, is_http_url};

/// Open the archive named by `config` and scan it.
pub async fn scan(config: &SearchConfig) -> ScanResult<ScanOutcome> {
    let open_err = |source| ScanError::ArchiveOpen {
        location: config.archive.clone(),
        source,
    };

    if is_http_url(&config.archive) {
        let reader = HttpRangeReader::connect(&config.archive)
            .await
            .map_err(open_err)?;
        let reader = Arc::new(reader);
        let outcome = scan_archive(&ZipArchive::new(reader.clone()), config).await?;
        info!(
            transferred = reader.transferred_bytes(),
            "remote scan finished"
        );
        Ok(outcome)
    } else {
        let reader = LocalFileReader::open(Path::new(&config.archive)).map_err(open_err)?;
        scan_archive(&ZipArchive::new(Arc::new(reader)), config).await
    }
}

/// Scan every file entry of `archive` for the configured keywords.
pub async fn scan_archive<R: ReadAt>(
    archive: &ZipArchive<R>,
    config: &SearchConfig,
) -> ScanResult<ScanOutcome> {
    let entries = archive
        .entries()
        .await
        .map_err(|source| ScanError::ArchiveOpen {
            location: config.archive.clone(),
            source,
        })?;
    info!(archive = %config.archive, entries = entries.len(), "archive opened");

    let matcher = KeywordMatcher::new(&config.keywords, config.case_sensitive);
    let mut outcome = ScanOutcome::default();

    for entry in &entries {
        if entry.is_dir() {
            debug!(name = %entry.name, "skipping directory");
            continue;
        }
        outcome.summary.add_file(entry.uncompressed_size);

        debug!(
            name = %entry.name,
            size = entry.uncompressed_size,
            method = %entry.method,
            "scanning entry"
        );
        let stream = archive
            .open_entry(entry)
            .await
            .map_err(|source| ScanError::EntryOpen {
                name: entry.name.clone(),
                source,
            })?;

        let mut lines = LineScanner::new(&entry.name, &matcher, &mut outcome.matches);
        let decoded = stream.decode_into(&mut lines).await.map(drop);
        match decoded {
            Ok(()) => {
                lines.finish();
            }
            Err(source) => return Err(read_error(&entry.name, lines.line_number(), source)),
        }
    }

    info!(
        files = outcome.summary.file_count,
        matches = outcome.matches.len(),
        "scan finished"
    );
    Ok(outcome)
}

/// Splits decoded entry bytes into lines and records the ones `matcher`
/// accepts.
///
/// Lines end at `\n`; a trailing `\r` is dropped and a final unterminated
/// line still counts once [`finish`](Self::finish) is called. Invalid UTF-8
/// is replaced rather than rejected.
pub struct LineScanner<'a> {
    name: &'a str,
    matcher: &'a KeywordMatcher,
    matches: &'a mut Vec<MatchRecord>,
    partial: Vec<u8>,
    line_number: usize,
    lossy: bool,
}

impl<'a> LineScanner<'a> {
    pub fn new(
        name: &'a str,
        matcher: &'a KeywordMatcher,
        matches: &'a mut Vec<MatchRecord>,
    ) -> Self {
        Self {
            name,
            matcher,
            matches,
            partial: Vec::new(),
            line_number: 0,
            lossy: false,
        }
    }

    /// Complete lines seen so far
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Take the unterminated tail as the last line and return the line count.
    pub fn finish(mut self) -> usize {
        if !self.partial.is_empty() {
            self.end_line();
        }
        if self.lossy {
            warn!("Invalid UTF-8 replaced in entry: {}", self.name);
        }
        self.line_number
    }

    fn end_line(&mut self) {
        self.line_number += 1;

        let text = self.partial.strip_suffix(b"\r").unwrap_or(&self.partial);
        let line = match std::str::from_utf8(text) {
            Ok(s) => Cow::Borrowed(s),
            Err(_) => {
                self.lossy = true;
                String::from_utf8_lossy(text)
            }
        };

        if self.matcher.is_match(&line) {
            self.matches.push(MatchRecord {
                entry: self.name.to_string(),
                line_number: self.line_number,
                line: line.into_owned(),
            });
        }
        self.partial.clear();
    }
}

impl Write for LineScanner<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut rest = buf;
        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            self.partial.extend_from_slice(&rest[..pos]);
            self.end_line();
            rest = &rest[pos + 1..];
        }
        self.partial.extend_from_slice(rest);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn read_error(name: &str, line: usize, source: io::Error) -> ScanError {
    ScanError::ScanRead {
        name: name.to_string(),
        line,
        source,
    }
}
