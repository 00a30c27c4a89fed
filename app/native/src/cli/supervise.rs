//! Waiting for the moment the menu bar should come back.
//!
//! Either a supervised child process exits, or the process receives a
//! termination signal. SIGKILL cannot be observed.

use std::fmt;
use std::process::ExitStatus;

use tokio::process::Command;
use tokio::signal::unix::{SignalKind, signal};

use crate::error::CliError;

/// Signals that end a `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    Hangup,
    Interrupt,
    Terminate,
}

impl TerminationSignal {
    /// POSIX signal number.
    #[must_use]
    pub const fn number(self) -> i32 {
        match self {
            Self::Hangup => 1,
            Self::Interrupt => 2,
            Self::Terminate => 15,
        }
    }
}

impl fmt::Display for TerminationSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hangup => "SIGHUP",
            Self::Interrupt => "SIGINT",
            Self::Terminate => "SIGTERM",
        })
    }
}

/// Why the wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The supervised child exited with this code.
    Child(i32),
    /// A termination signal arrived first.
    Signal(TerminationSignal),
}

impl Exit {
    /// Exit code for this process, using the shell's `128 + signal` rule.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Child(code) => *code,
            Self::Signal(signal) => 128 + signal.number(),
        }
    }
}

impl fmt::Display for Exit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Child(code) => write!(f, "child exit ({code})"),
            Self::Signal(signal) => write!(f, "{signal}"),
        }
    }
}

/// Maps a child's status to a shell-style exit code.
#[must_use]
pub fn status_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|signal| 128 + signal))
        .unwrap_or(1)
}

/// Waits for `command` to exit, or for a termination signal when `command`
/// is empty or still running.
///
/// The child is left running if a signal arrives first; it shares the
/// terminal's process group and sees Ctrl-C itself.
///
/// # Errors
///
/// Returns an error if signal handlers cannot be installed or the child
/// cannot be spawned or waited on.
pub async fn wait_for_exit(command: &[String]) -> Result<Exit, CliError> {
    let mut hangup = signal(SignalKind::hangup())?;
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    let signalled = async {
        tokio::select! {
            _ = hangup.recv() => TerminationSignal::Hangup,
            _ = interrupt.recv() => TerminationSignal::Interrupt,
            _ = terminate.recv() => TerminationSignal::Terminate,
        }
    };

    let Some((program, args)) = command.split_first() else {
        tracing::info!("menu bar fix active, press Ctrl-C to restore");
        return Ok(Exit::Signal(signalled.await));
    };

    let mut child = Command::new(program)
        .args(args)
        .spawn()
        .map_err(|source| CliError::Spawn { program: program.clone(), source })?;
    tracing::info!(program = %program, pid = child.id(), "supervising child process");

    tokio::select! {
        status = child.wait() => {
            let code = status_code(status?);
            tracing::info!(program = %program, code, "child process exited");
            Ok(Exit::Child(code))
        }
        received = signalled => {
            tracing::info!(signal = %received, "received termination signal");
            Ok(Exit::Signal(received))
        }
    }
}
