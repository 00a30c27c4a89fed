//! CLI module for menubar-fix.
//!
//! The command line is the orchestrator around the library: it loads the
//! settings, decides whether to apply the fix, and keeps the process alive
//! until the menu bar should be restored.

mod commands;
mod supervise;

use clap::Parser;
pub use commands::{Cli, Commands};
pub use supervise::{Exit, TerminationSignal};

use crate::error::CliError;

/// Runs the CLI and returns the exit code for the process.
///
/// Everything that must be restored has been restored by the time this
/// returns, so the caller may call `std::process::exit` directly.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<i32, CliError> {
    let cli = Cli::parse();
    cli.execute()
}
