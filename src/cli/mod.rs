//! CLI module for readmark.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - `track`: a tracking session fed from stdin
//! - `collect`: the progress collector
//!
//! # Usage
//!
//! ```ignore
//! use readmark::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! run_cli_command(command).await?;
//! ```

pub mod args;
pub mod collect;
pub mod track;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use collect::handle_collect_command;
pub use track::handle_track_command;
pub use version::{version_line, VERSION};

use color_eyre::Result;

use crate::startup::{CollectorConfig, TrackerConfig};

/// Run a parsed CLI command.
///
/// Invalid arguments print usage to stderr and exit with status 2.
pub async fn run_cli_command(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Ok(())
        }
        CliCommand::Help => {
            print!("{}", USAGE);
            Ok(())
        }
        CliCommand::Track { document } => {
            handle_track_command(&document, TrackerConfig::from_env()).await
        }
        CliCommand::Collect => handle_collect_command(CollectorConfig::from_env()).await,
        CliCommand::Invalid(reason) => {
            eprintln!("readmark: {}\n\n{}", reason, USAGE);
            std::process::exit(2)
        }
    }
}
