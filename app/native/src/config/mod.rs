//! Configuration module for menubar-fix.
//!
//! Settings come from a JSONC file (see [`types::config_paths`]) and may be
//! overridden per run through environment variables. A missing file is not
//! an error: the defaults apply the fix.

pub mod types;

use std::path::{Path, PathBuf};

pub use types::{ConfigError, FixConfig, config_paths, load_config, load_config_from_path};

/// Environment variables overriding the file settings.
pub mod env {
    /// Overrides `enabled`.
    pub const ENABLED: &str = "MENUBAR_FIX_ENABLED";
    /// Overrides `borderlessFullscreen`.
    pub const BORDERLESS: &str = "MENUBAR_FIX_BORDERLESS";
}

/// Settings together with the file they were read from.
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub config: FixConfig,
    pub path: Option<PathBuf>,
}

/// Loads the settings, from `custom_path` when given.
///
/// Falls back to defaults when no default-location file exists. An explicit
/// `custom_path` must exist.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the file cannot be read or parsed, or if
/// `custom_path` does not exist.
pub fn resolve(custom_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
    let loaded = match custom_path {
        Some(path) => load_config_from_path(path).map(Some)?,
        None => match load_config() {
            Ok(loaded) => Some(loaded),
            Err(ConfigError::NotFound) => {
                tracing::debug!("no configuration file found, using defaults");
                None
            }
            Err(err) => return Err(err),
        },
    };

    let mut resolved = loaded.map_or_else(ResolvedConfig::default, |(config, path)| {
        tracing::debug!(path = %path.display(), "loaded configuration");
        ResolvedConfig { config, path: Some(path) }
    });
    apply_env_overrides(&mut resolved.config, |key| std::env::var(key).ok());
    Ok(resolved)
}

/// Applies `MENUBAR_FIX_*` overrides read through `lookup`.
///
/// Unparseable values are ignored with a warning.
pub fn apply_env_overrides(config: &mut FixConfig, lookup: impl Fn(&str) -> Option<String>) {
    let targets: [(&str, &mut bool); 2] =
        [(env::ENABLED, &mut config.enabled), (env::BORDERLESS, &mut config.borderless_fullscreen)];

    for (key, target) in targets {
        let Some(raw) = lookup(key) else { continue };
        match parse_bool(&raw) {
            Some(value) => *target = value,
            None => tracing::warn!(key, value = %raw, "ignoring invalid boolean override"),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_env_overrides_replace_file_values() {
        let mut config = FixConfig::default();
        apply_env_overrides(&mut config, lookup(&[(env::ENABLED, "0"), (env::BORDERLESS, "off")]));
        assert!(!config.enabled);
        assert!(!config.borderless_fullscreen);
    }

    #[test]
    fn test_invalid_env_override_is_ignored() {
        let mut config = FixConfig::default();
        apply_env_overrides(&mut config, lookup(&[(env::ENABLED, "maybe")]));
        assert!(config.enabled);
    }

    #[test]
    fn test_absent_env_leaves_config_untouched() {
        let mut config = FixConfig { enabled: false, borderless_fullscreen: true };
        apply_env_overrides(&mut config, lookup(&[]));
        assert_eq!(config, FixConfig { enabled: false, borderless_fullscreen: true });
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool(" TRUE "), Some(true));
        assert_eq!(parse_bool("yes"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_resolve_custom_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "enabled": true, "borderlessFullscreen": true }"#).unwrap();

        let resolved = resolve(Some(&path)).unwrap();
        assert_eq!(resolved.path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_resolve_missing_custom_path_is_error() {
        let dir = TempDir::new().unwrap();
        let result = resolve(Some(&dir.path().join("missing.json")));
        assert!(matches!(result, Err(ConfigError::NotFound)));
    }
}
