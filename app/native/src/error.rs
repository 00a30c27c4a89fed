//! Error types for menubar-fix.
//!
//! Errors are split by layer: [`BridgeError`] for raw Objective-C runtime
//! calls, [`FixError`] for the presentation controller, and [`CliError`] for
//! the command-line front end.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised by an [`ObjcRuntime`](crate::runtime::ObjcRuntime) call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
    /// `objc_getClass` returned nil for the requested class.
    #[error("Objective-C class `{name}` not found")]
    ClassNotFound { name: String },
    /// `sel_registerName` returned nil, or the name cannot be registered.
    #[error("failed to resolve selector `{name}`")]
    SelectorResolution { name: String },
    /// Any other failure of the foreign call, including Objective-C exceptions.
    #[error("native call failed: {0}")]
    NativeCall(String),
}

/// Reasons a [`PresentationController`](crate::presentation::PresentationController)
/// could not be constructed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InitializationError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    /// `[NSApplication sharedApplication]` returned nil.
    #[error("shared application instance is nil")]
    NilApplication,
}

/// Errors surfaced by the presentation controller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FixError {
    /// Construction failed; no controller exists.
    #[error("failed to initialize presentation controller: {0}")]
    Initialization(#[from] InitializationError),
    /// The options violate the `HideMenuBar` requires `HideDock` rule.
    #[error("invalid presentation options {0:#x}: hiding the menu bar requires hiding the dock")]
    InvalidOptions(u64),
    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Errors reported by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_not_found_display() {
        let err = BridgeError::ClassNotFound { name: "NSApplication".to_string() };
        assert_eq!(err.to_string(), "Objective-C class `NSApplication` not found");
    }

    #[test]
    fn test_selector_resolution_display() {
        let err = BridgeError::SelectorResolution { name: "sharedApplication".to_string() };
        assert!(err.to_string().contains("sharedApplication"));
    }

    #[test]
    fn test_initialization_wraps_bridge_error() {
        let err: FixError = InitializationError::from(BridgeError::ClassNotFound {
            name: "NSApplication".to_string(),
        })
        .into();

        assert!(matches!(
            err,
            FixError::Initialization(InitializationError::Bridge(BridgeError::ClassNotFound { .. }))
        ));
        let msg = err.to_string();
        assert!(msg.contains("failed to initialize presentation controller"));
        assert!(msg.contains("NSApplication"));
    }

    #[test]
    fn test_nil_application_display() {
        let err = FixError::from(InitializationError::NilApplication);
        assert!(err.to_string().contains("shared application instance is nil"));
    }

    #[test]
    fn test_invalid_options_display_is_hex() {
        let err = FixError::InvalidOptions(0b1000);
        assert!(err.to_string().contains("0x8"));
    }

    #[test]
    fn test_bridge_error_is_transparent_in_fix_error() {
        let err = FixError::from(BridgeError::NativeCall("boom".to_string()));
        assert_eq!(err.to_string(), "native call failed: boom");
    }

    #[test]
    fn test_cli_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CliError = io_err.into();
        assert!(matches!(err, CliError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }
}
