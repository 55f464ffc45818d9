//! Command-line argument parsing for the readmark CLI.

use std::path::PathBuf;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Track a document, reading visibility batches from stdin
    Track { document: PathBuf },
    /// Run the progress collector
    Collect,
    /// Unusable arguments, with the reason
    Invalid(String),
}

/// Usage text printed for `--help` and on invalid arguments.
pub const USAGE: &str = "\
Usage:
  readmark track <document.json>   Track reading progress; batches are read as JSON lines from stdin
  readmark collect                 Run the progress collector
  readmark --version               Show version
  readmark --help                  Show this help

Environment:
  READMARK_ENDPOINT        Collector base URL (default http://127.0.0.1:5000)
  READMARK_TIMEOUT_SECS    Progress request timeout (default 10)
  READMARK_COLLECTOR_ADDR  Collector bind address (default 127.0.0.1:5000)
  RUST_LOG                 Log filter (default info)
";

/// Parse command-line arguments (including the program name).
///
/// # Examples
///
/// ```
/// use readmark::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["readmark".to_string(), "collect".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Collect);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);

    let Some(first) = args.next() else {
        return CliCommand::Help;
    };

    match first.as_str() {
        "--version" | "-V" => CliCommand::Version,
        "--help" | "-h" => CliCommand::Help,
        "track" => match args.next() {
            Some(document) => CliCommand::Track {
                document: PathBuf::from(document),
            },
            None => CliCommand::Invalid("track requires a document path".to_string()),
        },
        "collect" => CliCommand::Collect,
        other => CliCommand::Invalid(format!("unknown command '{}'", other)),
    }
}
