use std::path::PathBuf;

/// Everything one run needs, fixed once the command line is parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Local path or `http(s)://` URL of the archive
    pub archive: String,
    /// Keywords in the order given; duplicates and empty strings are kept
    pub keywords: Vec<String>,
    /// Write match records here instead of stdout
    pub output: Option<PathBuf>,
    pub case_sensitive: bool,
}

impl SearchConfig {
    pub fn new(archive: impl Into<String>, text: &str) -> Self {
        Self {
            archive: archive.into(),
            keywords: split_keywords(text),
            output: None,
            case_sensitive: false,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }
}

/// Split a comma separated keyword list without trimming.
pub fn split_keywords(text: &str) -> Vec<String> {
    text.split(',').map(str::to_string).collect()
}
