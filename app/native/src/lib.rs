//! menubar-fix - auto-hide the macOS menu bar and dock while a borderless
//! fullscreen app runs, and put them back on exit.
//!
//! The library is layered leaf-first:
//!
//! - [`runtime`] - the four Objective-C runtime primitives
//! - [`presentation`] - the `NSApplication` presentation controller
//! - [`lifecycle`] - the applied flag and the exactly-once exit finalizer
//! - [`fix`] - the orchestrator that decides, applies and restores
//!
//! [`cli`] wires these to settings, logging and signal handling.
//!
//! Presentation options apply to the calling process's own `NSApp`, and
//! macOS honours them only while that application is active. An app hides its
//! own menu bar by holding a [`MenuBarFix`] for as long as it runs:
//!
//! ```no_run
//! use menubar_fix_lib::MenuBarFix;
//! use menubar_fix_lib::platform::HostPlatform;
//! use menubar_fix_lib::runtime::NativeRuntime;
//!
//! let mut fix: MenuBarFix<HostPlatform, NativeRuntime> = MenuBarFix::new(HostPlatform);
//! fix.apply_if(true, NativeRuntime::default);
//! // Run the app's event loop here. Dropping `fix` restores the menu bar.
//! drop(fix);
//! ```

#[cfg(not(unix))]
compile_error!("menubar-fix only supports Unix hosts.");

pub mod cli;
pub mod config;
pub mod error;
pub mod fix;
pub mod lifecycle;
pub mod logging;
pub mod platform;
pub mod presentation;
pub mod runtime;

pub use error::{BridgeError, CliError, FixError, InitializationError};
pub use fix::{FixState, MenuBarFix};
pub use presentation::{PresentationController, PresentationOptions};
