//! CLI command definitions using Clap.
//!
//! This module defines all CLI commands and their arguments.

use std::io;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};

use crate::cli::supervise;
use crate::config;
use crate::error::CliError;
use crate::fix::MenuBarFix;
use crate::lifecycle::FinalizerOutcome;
use crate::logging::{self, Verbosity};
use crate::platform::HostPlatform;
use crate::runtime::NativeRuntime;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// menubar-fix - auto-hide the macOS menu bar and dock for borderless fullscreen apps.
#[derive(Parser, Debug)]
#[command(name = "menubar-fix")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Read settings from this file instead of the default locations.
    #[arg(long, global = true, env = "MENUBAR_FIX_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Only log errors.
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Log debug details.
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Auto-hide the menu bar and dock of this process until exit.
    ///
    /// With a command, runs it and restores the menu bar when it exits.
    /// Without one, waits for Ctrl-C, SIGTERM or SIGHUP. The default
    /// presentation is restored on every exit path except SIGKILL.
    ///
    /// Presentation options belong to the application that sets them, and
    /// macOS honours them only while that application is active. They do not
    /// reach the supervised command's windows; an app embeds the library to
    /// hide its own menu bar.
    #[command(
        verbatim_doc_comment,
        after_long_help = r#"Examples:
  menubar-fix run                      # Hold the fix until Ctrl-C
  menubar-fix run -- ./session.sh      # Hold the fix until the script exits
  menubar-fix run --force -- ./game    # Ignore the settings file"#
    )]
    Run {
        /// Apply even if the settings disable the fix.
        #[arg(long)]
        force: bool,

        /// Command to supervise, after `--`.
        #[arg(last = true, value_name = "COMMAND")]
        command: Vec<String>,
    },

    /// Print the resolved settings as JSON.
    Config,

    /// Generate shell completions.
    ///
    /// Usage:
    ///   eval "$(menubar-fix completions --shell zsh)"
    ///   menubar-fix completions --shell fish > ~/.config/fish/completions/menubar-fix.fish
    #[command(verbatim_doc_comment)]
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Executes the parsed command and returns the process exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if settings cannot be loaded, or the runtime or child
    /// process cannot be started.
    pub fn execute(self) -> Result<i32, CliError> {
        logging::init_logging(Verbosity::from_flags(self.quiet, self.verbose));

        match self.command {
            Commands::Run { force, command } => run(self.config.as_deref(), force, &command),
            Commands::Config => print_config(self.config.as_deref()),
            Commands::Completions { shell } => {
                let mut cmd = Self::command();
                generate(shell, &mut cmd, "menubar-fix", &mut io::stdout());
                Ok(0)
            }
        }
    }
}

fn run(config_path: Option<&Path>, force: bool, command: &[String]) -> Result<i32, CliError> {
    let resolved = config::resolve(config_path)?;
    let should_apply = force || resolved.config.should_apply();

    let mut fix: MenuBarFix<HostPlatform, NativeRuntime> = MenuBarFix::new(HostPlatform);
    let applied = fix.apply_if(should_apply, NativeRuntime::default);
    tracing::debug!(applied, "apply step finished");

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let exit = runtime.block_on(supervise::wait_for_exit(command))?;

    match fix.restore() {
        FinalizerOutcome::Restored => tracing::debug!("restored on {exit}"),
        FinalizerOutcome::Failed => tracing::warn!("restore failed on {exit}"),
        FinalizerOutcome::Skipped | FinalizerOutcome::AlreadyRan => {}
    }

    Ok(exit.code())
}

fn print_config(config_path: Option<&Path>) -> Result<i32, CliError> {
    let resolved = config::resolve(config_path)?;

    let output = serde_json::json!({
        "path": resolved.path.as_ref().map(|path| path.display().to_string()),
        "shouldApply": resolved.config.should_apply(),
        "config": resolved.config,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(0)
}
