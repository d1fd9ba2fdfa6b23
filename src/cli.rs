//! CLI argument parsing.
//!
//! The release configuration itself comes from the GitHub Actions
//! environment (`INPUT_*` variables); flags here only supplement it for
//! debugging and local runs.

use clap::{ArgAction, Parser};

/// Automated semantic-version tagging for CI.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Enable debug logging.
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Force dry-run mode regardless of the `dry_run` input.
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,
}
