use std::fmt;

/// Separator closing every record and the summary block
pub const SEPARATOR: &str = "----------";

/// One matching line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// Archive member the line came from
    pub entry: String,
    /// 1-based
    pub line_number: usize,
    /// Line text without its terminator
    pub line: String,
}

impl fmt::Display for MatchRecord {
    /// Four-line block, each line terminated
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.entry)?;
        writeln!(f, "Line Number: {}", self.line_number)?;
        writeln!(f, "Line: {}", self.line)?;
        writeln!(f, "{SEPARATOR}")
    }
}

/// Totals over every non-directory entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Sum of declared uncompressed sizes
    pub total_size: u64,
    pub file_count: usize,
}

impl ScanSummary {
    pub fn add_file(&mut self, uncompressed_size: u64) {
        self.file_count += 1;
        self.total_size += uncompressed_size;
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Compressed File Properties")?;
        writeln!(f, "Total Size: {} bytes", self.total_size)?;
        writeln!(f, "File Count: {}", self.file_count)?;
        writeln!(f, "{SEPARATOR}")
    }
}

/// Result of a completed scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    /// In discovery order: entry order, then line order
    pub matches: Vec<MatchRecord>,
    pub summary: ScanSummary,
}
