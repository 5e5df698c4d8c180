use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::SearchConfig;

/// Shown when a required flag is missing
pub const USAGE_HINT: &str = "Please run the -help command to use the Finder tool.";

/// Long flags that may also be spelled with a single dash
const LONG_FLAGS: &[&str] = &["file", "text", "output", "case-sensitive", "help", "version"];

#[derive(Parser, Debug)]
#[command(name = "zipfinder")]
#[command(version)]
#[command(about = "Search the files inside a ZIP archive for keywords", long_about = None)]
#[command(after_help = "Examples:\n  \
  zipfinder -file logs.zip -text error,timeout          case-insensitive search\n  \
  zipfinder -file src.zip -text TODO -case-sensitive    exact-case search\n  \
  zipfinder -file data.zip -text key -output hits.txt   save results to a file\n  \
  zipfinder -file https://example.com/a.zip -text key   scan a remote ZIP")]
pub struct Cli {
    /// ZIP file path or HTTP URL - required
    #[arg(long, value_name = "FILE")]
    pub file: Option<String>,

    /// Text to search for; separate multiple keywords with commas - required
    #[arg(long, value_name = "TEXT")]
    pub text: Option<String>,

    /// Save the results to this file instead of printing them
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Match case exactly
    #[arg(
        long,
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = clap::ArgAction::Set
    )]
    pub case_sensitive: bool,
}

impl Cli {
    /// Parse the process arguments, accepting `-file` as well as `--file`.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }

    /// The run's configuration, or `None` when `--file` or `--text` is
    /// missing or empty.
    pub fn search_config(&self) -> Option<SearchConfig> {
        let file = self.file.as_deref().filter(|f| !f.is_empty())?;
        let text = self.text.as_deref().filter(|t| !t.is_empty())?;

        let mut config = SearchConfig::new(file, text).case_sensitive(self.case_sensitive);
        if let Some(output) = self.output.as_ref().filter(|o| !o.as_os_str().is_empty()) {
            config = config.with_output(output);
        }
        Some(config)
    }
}

/// Rewrite single-dash long flags (`-file x`, `-case-sensitive=true`) to the
/// double-dash form. Everything after a bare `--` is left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 || passthrough {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                passthrough = true;
                return arg;
            }
            let rewritten = s
                .strip_prefix('-')
                .filter(|rest| !rest.starts_with('-') && is_long_flag(rest))
                .map(|rest| OsString::from(format!("--{rest}")));
            rewritten.unwrap_or(arg)
        })
        .collect()
}

fn is_long_flag(arg: &str) -> bool {
    let name = arg.split_once('=').map_or(arg, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(normalize_args(args.iter().copied())).unwrap()
    }

    #[test]
    fn single_dash_flags_are_accepted() {
        let cli = parse(&[
            "zipfinder",
            "-file",
            "a.zip",
            "-text",
            "cat,dog",
            "-output",
            "out.txt",
            "-case-sensitive",
        ]);
        let config = cli.search_config().unwrap();
        assert_eq!(config.archive, "a.zip");
        assert_eq!(config.keywords, vec!["cat", "dog"]);
        assert_eq!(config.output, Some(PathBuf::from("out.txt")));
        assert!(config.case_sensitive);
    }

    #[test]
    fn double_dash_and_equals_forms() {
        let cli = parse(&["zipfinder", "--file=a.zip", "-text=x", "-case-sensitive=false"]);
        let config = cli.search_config().unwrap();
        assert_eq!(config.archive, "a.zip");
        assert_eq!(config.keywords, vec!["x"]);
        assert!(!config.case_sensitive);
        assert_eq!(config.output, None);
    }

    #[test]
    fn case_insensitive_by_default() {
        let cli = parse(&["zipfinder", "-file", "a.zip", "-text", "x"]);
        assert!(!cli.case_sensitive);
    }

    #[test]
    fn missing_required_flags_give_no_config() {
        assert!(parse(&["zipfinder"]).search_config().is_none());
        assert!(parse(&["zipfinder", "-file", "a.zip"]).search_config().is_none());
        assert!(parse(&["zipfinder", "-text", "x"]).search_config().is_none());
        assert!(parse(&["zipfinder", "-file", "", "-text", "x"]).search_config().is_none());
    }

    #[test]
    fn arguments_after_double_dash_are_untouched() {
        let args = normalize_args(["zipfinder", "-t", "--", "-file"]);
        assert_eq!(args, vec!["zipfinder", "-t", "--", "-file"]);
    }

    #[test]
    fn keyword_values_starting_with_dash_survive() {
        let cli = parse(&["zipfinder", "-file", "a.zip", "-text=-v,-x"]);
        assert_eq!(cli.search_config().unwrap().keywords, vec!["-v", "-x"]);
    }

    #[test]
    fn help_flag_is_recognised() {
        let err = Cli::try_parse_from(normalize_args(["zipfinder", "-help"])).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
