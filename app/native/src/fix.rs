//! Applies the menu bar fix and owns its restoration.
//!
//! [`MenuBarFix`] is the scope of the fix: it gates on the host platform,
//! builds the [`PresentationController`] only when asked to apply, turns on
//! auto-hide, and registers the [`ExitFinalizer`]. Dropping it restores the
//! default presentation.

use std::sync::Arc;

use crate::error::FixError;
use crate::lifecycle::{AppliedState, ExitFinalizer, FinalizerOutcome, install_panic_hook};
use crate::platform::PlatformDetector;
use crate::presentation::PresentationController;
use crate::runtime::ObjcRuntime;

/// Where the process is in the apply/restore lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixState {
    NotApplied,
    Applied,
    Restored,
}

/// Orchestrates a single apply and the matching restore.
pub struct MenuBarFix<P: PlatformDetector, R: ObjcRuntime + 'static> {
    platform: P,
    state: Arc<AppliedState>,
    controller: Option<Arc<PresentationController<R>>>,
    finalizer: Option<Arc<ExitFinalizer>>,
    panic_hook: bool,
}

impl<P: PlatformDetector, R: ObjcRuntime + 'static> MenuBarFix<P, R> {
    #[must_use]
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            state: Arc::new(AppliedState::new()),
            controller: None,
            finalizer: None,
            panic_hook: true,
        }
    }

    /// Skips installing the panic hook when the fix is applied.
    #[must_use]
    pub fn without_panic_hook(mut self) -> Self {
        self.panic_hook = false;
        self
    }

    #[must_use]
    pub const fn applied_state(&self) -> &Arc<AppliedState> { &self.state }

    /// The registered finalizer, once the fix has been applied.
    #[must_use]
    pub const fn finalizer(&self) -> Option<&Arc<ExitFinalizer>> { self.finalizer.as_ref() }

    #[must_use]
    pub fn state(&self) -> FixState {
        match &self.finalizer {
            Some(finalizer) if finalizer.has_run() => FixState::Restored,
            _ if self.state.is_applied() => FixState::Applied,
            _ => FixState::NotApplied,
        }
    }

    /// Applies the fix when `should_apply` holds on macOS.
    ///
    /// `connect` is only called once the platform and decision checks pass
    /// and no controller exists yet. Returns `true` only when auto-hide was
    /// sent. Errors are logged and reported as `false`; they never propagate
    /// to the host. Once restored, the fix is never re-applied.
    pub fn apply_if(&mut self, should_apply: bool, connect: impl FnOnce() -> R) -> bool {
        if !self.platform.is_macos() {
            tracing::info!(os = self.platform.os_name(), "not running on macOS, skipping menu bar fix");
            return false;
        }
        if !should_apply {
            tracing::info!("menu bar fix disabled by settings, skipping");
            return false;
        }

        tracing::info!("applying macOS menu bar auto-hide fix");
        match self.apply(connect) {
            Ok(sent) => sent,
            Err(err) => {
                tracing::error!(error = %err, "failed to apply menu bar fix");
                false
            }
        }
    }

    fn apply(&mut self, connect: impl FnOnce() -> R) -> Result<bool, FixError> {
        if matches!(self.state(), FixState::Restored) {
            tracing::info!("menu bar already restored, not re-applying");
            return Ok(false);
        }

        let controller = match &self.controller {
            Some(controller) => Arc::clone(controller),
            None => {
                let controller = Arc::new(PresentationController::new(connect())?);
                self.controller = Some(Arc::clone(&controller));
                controller
            }
        };

        controller.enable_auto_hide()?;

        if self.state.mark_applied() {
            tracing::info!("menu bar auto-hide enabled");
            // The applied flag is written before the finalizer exists.
            let finalizer = ExitFinalizer::new(controller, Arc::clone(&self.state));
            if self.panic_hook {
                install_panic_hook(&finalizer);
            }
            self.finalizer = Some(finalizer);
            tracing::debug!("exit finalizer registered");
        }
        Ok(true)
    }

    /// Runs the finalizer now. Later calls, and the drop, do nothing.
    pub fn restore(&self) -> FinalizerOutcome {
        self.finalizer.as_ref().map_or(FinalizerOutcome::Skipped, |finalizer| finalizer.run())
    }
}

impl<P: PlatformDetector, R: ObjcRuntime + 'static> Drop for MenuBarFix<P, R> {
    fn drop(&mut self) {
        if let Some(finalizer) = &self.finalizer {
            finalizer.run();
        }
    }
}
