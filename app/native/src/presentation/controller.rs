use crate::error::{FixError, InitializationError};
use crate::presentation::PresentationOptions;
use crate::runtime::{ObjcRuntime, ObjectHandle};

/// Class that owns the process-wide application instance.
pub const APPLICATION_CLASS: &str = "NSApplication";

/// `+[NSApplication sharedApplication]`.
pub const SHARED_APPLICATION: &str = "sharedApplication";

/// `-[NSApplication setPresentationOptions:]`.
pub const SET_PRESENTATION_OPTIONS: &str = "setPresentationOptions:";

/// Owns the shared `NSApplication` handle and changes its presentation options.
///
/// A controller only exists after the class lookup, the selector lookup and the
/// `sharedApplication` send have all succeeded.
#[derive(Debug)]
pub struct PresentationController<R: ObjcRuntime> {
    runtime: R,
    application: ObjectHandle,
}

impl<R: ObjcRuntime> PresentationController<R> {
    /// Looks up `[NSApplication sharedApplication]` through `runtime`.
    ///
    /// # Errors
    ///
    /// Returns [`FixError::Initialization`] if the class or selector cannot be
    /// resolved, the send fails, or the shared instance is nil.
    pub fn new(runtime: R) -> Result<Self, FixError> {
        let application = Self::shared_application(&runtime)?;
        Ok(Self { runtime, application })
    }

    fn shared_application(runtime: &R) -> Result<ObjectHandle, InitializationError> {
        let class = runtime.resolve_class(APPLICATION_CLASS)?;
        let selector = runtime.resolve_selector(SHARED_APPLICATION)?;
        runtime.send_message(class.into(), selector)?.ok_or(InitializationError::NilApplication)
    }

    /// The shared application handle obtained at construction.
    #[must_use]
    pub const fn application(&self) -> ObjectHandle { self.application }

    #[must_use]
    pub const fn runtime(&self) -> &R { &self.runtime }

    /// Auto-hides both the menu bar and the dock.
    ///
    /// Best-effort: AppKit reports nothing back, so success means the message
    /// was delivered.
    ///
    /// # Errors
    ///
    /// Returns [`FixError::Bridge`] if the selector lookup or the send fails.
    pub fn enable_auto_hide(&self) -> Result<(), FixError> {
        self.set_presentation_options(PresentationOptions::AUTO_HIDE_ALL)
    }

    /// Restores the normal menu bar and dock. Safe to call any number of times.
    ///
    /// # Errors
    ///
    /// Returns [`FixError::Bridge`] if the selector lookup or the send fails.
    pub fn restore_default(&self) -> Result<(), FixError> {
        self.set_presentation_options(PresentationOptions::DEFAULT)
    }

    /// Sends `setPresentationOptions:` with `options`.
    ///
    /// The selector is resolved on every call.
    ///
    /// # Errors
    ///
    /// Returns [`FixError::InvalidOptions`] without touching the runtime if
    /// `options` hides the menu bar but not the dock, or [`FixError::Bridge`]
    /// if the foreign call fails.
    pub fn set_presentation_options(&self, options: PresentationOptions) -> Result<(), FixError> {
        if !options.is_valid() {
            return Err(FixError::InvalidOptions(options.bits()));
        }

        let selector = self.runtime.resolve_selector(SET_PRESENTATION_OPTIONS)?;
        self.runtime.send_message_with_uint(self.application, selector, options.bits())?;
        Ok(())
    }
}
