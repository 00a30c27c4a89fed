//! Configuration types for menubar-fix.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Directory name used under every configuration root.
const APP_DIR: &str = "menubar-fix";

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// User settings deciding whether the fix is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FixConfig {
    /// Master switch for the fix.
    pub enabled: bool,

    /// Whether the supervised app runs in borderless (windowed) fullscreen.
    ///
    /// Exclusive fullscreen already hides the menu bar, so the fix is only
    /// needed for borderless windows covering the screen.
    pub borderless_fullscreen: bool,
}

impl Default for FixConfig {
    fn default() -> Self { Self { enabled: true, borderless_fullscreen: true } }
}

impl FixConfig {
    /// The "apply the fix now" decision handed to the orchestrator.
    #[must_use]
    pub const fn should_apply(&self) -> bool { self.enabled && self.borderless_fullscreen }
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "No configuration file found. Expected at ~/.config/menubar-fix/config.json or \
         ~/Library/Application Support/menubar-fix/config.json"
    )]
    NotFound,
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),
    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Returns the possible configuration file paths in priority order.
///
/// 1. `$XDG_CONFIG_HOME/menubar-fix/` when set
/// 2. `~/.config/menubar-fix/`
/// 3. `~/Library/Application Support/menubar-fix/` (macOS native)
///
/// Each location is checked for `config.jsonc`, then `config.json`.
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        roots.push(PathBuf::from(xdg_config));
    }
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".config"));
    }
    if let Some(config_dir) = dirs::config_dir() {
        roots.push(config_dir);
    }

    let mut paths = Vec::new();
    for root in roots {
        let dir = root.join(APP_DIR);
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            // XDG_CONFIG_HOME is often ~/.config itself
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    paths
}

/// Loads the configuration from a specific file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist,
/// `ConfigError::IoError` if it cannot be read, and
/// `ConfigError::ParseError` if it is not valid JSONC.
pub fn load_config_from_path(path: &Path) -> Result<(FixConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }

    let file = fs::File::open(path)?;
    // Strip comments from JSONC before parsing
    let reader = json_comments::StripComments::new(file);
    let config: FixConfig = serde_json::from_reader(reader)?;
    Ok((config, path.to_path_buf()))
}

/// Loads the configuration from the first default location that exists.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists, or the
/// error from [`load_config_from_path`] for the file that was found.
pub fn load_config() -> Result<(FixConfig, PathBuf), ConfigError> {
    config_paths()
        .iter()
        .find(|path| path.exists())
        .map_or(Err(ConfigError::NotFound), |path| load_config_from_path(path))
}
