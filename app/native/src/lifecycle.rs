//! Exit-time restoration of the default presentation.
//!
//! [`AppliedState`] records whether auto-hide was ever turned on.
//! [`ExitFinalizer`] restores the default options at most once, on its own
//! named thread, and only when that state is set. It is triggered by whoever
//! owns it going out of scope, by the panic hook from
//! [`install_panic_hook`] in builds that abort on panic, or by the CLI's
//! signal handling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread;

use crate::error::FixError;
use crate::presentation::PresentationController;
use crate::runtime::ObjcRuntime;

/// Name of the thread the restore runs on.
pub const FINALIZER_THREAD: &str = "menubar-fix-finalizer";

/// Whether auto-hide has been applied in this process. Never reset.
#[derive(Debug, Default)]
pub struct AppliedState(AtomicBool);

impl AppliedState {
    #[must_use]
    pub const fn new() -> Self { Self(AtomicBool::new(false)) }

    /// Marks the fix as applied. Returns `true` only for the first call.
    pub fn mark_applied(&self) -> bool { !self.0.swap(true, Ordering::AcqRel) }

    #[must_use]
    pub fn is_applied(&self) -> bool { self.0.load(Ordering::Acquire) }
}

/// Something that can put the menu bar and dock back to normal.
pub trait Restore: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the restore could not be delivered.
    fn restore_default(&self) -> Result<(), FixError>;
}

impl<R: ObjcRuntime> Restore for PresentationController<R> {
    fn restore_default(&self) -> Result<(), FixError> { Self::restore_default(self) }
}

/// What a call to [`ExitFinalizer::run`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizerOutcome {
    /// The default options were sent.
    Restored,
    /// Nothing was applied, so nothing was sent.
    Skipped,
    /// An earlier call already ran the finalizer.
    AlreadyRan,
    /// The restore was attempted and failed; the error was reported.
    Failed,
}

/// Restores the default presentation exactly once.
pub struct ExitFinalizer {
    target: Arc<dyn Restore>,
    state: Arc<AppliedState>,
    fired: AtomicBool,
}

impl std::fmt::Debug for ExitFinalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExitFinalizer")
            .field("applied", &self.state.is_applied())
            .field("fired", &self.has_run())
            .finish_non_exhaustive()
    }
}

impl ExitFinalizer {
    /// Creates a finalizer for `target`.
    ///
    /// Register it only after `state` has been marked applied; the write then
    /// happens-before any thread the finalizer spawns.
    #[must_use]
    pub fn new(target: Arc<dyn Restore>, state: Arc<AppliedState>) -> Arc<Self> {
        Arc::new(Self { target, state, fired: AtomicBool::new(false) })
    }

    /// Returns `true` once [`run`](Self::run) has been called.
    #[must_use]
    pub fn has_run(&self) -> bool { self.fired.load(Ordering::Acquire) }

    /// Restores the default presentation if it was changed.
    ///
    /// Only the first call does anything. The restore runs on a dedicated
    /// thread which is joined before returning. Failures are reported and
    /// swallowed.
    pub fn run(&self) -> FinalizerOutcome {
        if self.fired.swap(true, Ordering::AcqRel) {
            return FinalizerOutcome::AlreadyRan;
        }
        if !self.state.is_applied() {
            return FinalizerOutcome::Skipped;
        }

        let target = Arc::clone(&self.target);
        let result = match thread::Builder::new()
            .name(FINALIZER_THREAD.to_string())
            .spawn(move || target.restore_default())
        {
            Ok(handle) => handle
                .join()
                .unwrap_or_else(|_| Err(panicked_restore())),
            Err(err) => {
                tracing::warn!(thread = FINALIZER_THREAD, error = %err, "failed to spawn finalizer thread, restoring inline");
                self.target.restore_default()
            }
        };

        match result {
            Ok(()) => {
                tracing::info!("menu bar restored to default state");
                FinalizerOutcome::Restored
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to restore default presentation");
                // The subscriber may already be torn down during shutdown.
                eprintln!("menubar-fix: warning: failed to restore menu bar: {err}");
                FinalizerOutcome::Failed
            }
        }
    }
}

fn panicked_restore() -> FixError {
    FixError::Bridge(crate::error::BridgeError::NativeCall(
        "restore panicked on the finalizer thread".to_string(),
    ))
}

/// Whether this build aborts on panic instead of unwinding.
const PANIC_ABORTS: bool = cfg!(panic = "abort");

/// Restores the menu bar from the panic hook when panics abort.
///
/// Release builds abort on panic, so `Drop` never runs there and the hook is
/// the only chance to restore. When panics unwind this does nothing: `Drop`
/// covers the unwind, and a panic the host catches must not restore the menu
/// bar while the process keeps running.
pub fn install_panic_hook(finalizer: &Arc<ExitFinalizer>) {
    if !PANIC_ABORTS {
        tracing::debug!("panics unwind, restore is left to drop");
        return;
    }
    chain_panic_hook(finalizer);
}

/// Chains a hook that runs `finalizer` before the previous hook.
fn chain_panic_hook(finalizer: &Arc<ExitFinalizer>) {
    let finalizer: Weak<ExitFinalizer> = Arc::downgrade(finalizer);
    let previous = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |info| {
        if let Some(finalizer) = finalizer.upgrade() {
            finalizer.run();
        }
        previous(info);
    }));
}
