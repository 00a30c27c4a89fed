//! Menu bar and dock presentation control.
//!
//! - [`options`] - the `NSApplicationPresentationOptions` bit set
//! - [`controller`] - the owner of the shared `NSApplication` handle

pub mod controller;
pub mod options;

pub use controller::{
    APPLICATION_CLASS, PresentationController, SET_PRESENTATION_OPTIONS, SHARED_APPLICATION,
};
pub use options::PresentationOptions;
