//! Error types used by the extvisor runtime and its collaborators.
//!
//! This module defines four error enums along the lifecycle's fault lines:
//!
//! - [`SetupError`] — construction-time failures; nothing has been started yet,
//!   so no cleanup is owed.
//! - [`RunError`] — failures returned from [`LifecycleActor::execute`]; teardown
//!   is never attempted inside `execute` itself (that is the interrupt path's job).
//! - [`RunnerError`] — faults reported by the subprocess runner collaborator.
//! - [`SessionError`] — faults reported by the extension session collaborator.
//!
//! Runner/session shutdown faults observed during interrupt are published to the
//! event bus and never propagated; teardown proceeds past either failure.
//!
//! All types provide `as_label` for stable snake_case identifiers in logs.
//!
//! [`LifecycleActor::execute`]: crate::LifecycleActor::execute

use std::path::PathBuf;

use thiserror::Error;

/// # Construction-time failures.
///
/// Returned from [`create_extension_runtime`](crate::create_extension_runtime)
/// before any child resource is started. Both variants are fatal: the
/// supervisor cannot proceed without a resolvable secret policy or a usable
/// session object.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SetupError {
    /// The enroll secret path was set but its contents could not be read.
    #[error("could not read enroll secret path {path:?}")]
    SecretRead {
        /// The configured secret file path.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The extension session object could not be built.
    #[error("building extension session: {reason}")]
    ExtensionInit {
        /// The session factory's failure message.
        reason: String,
    },
}

impl SetupError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use extvisor::SetupError;
    ///
    /// let err = SetupError::ExtensionInit { reason: "storage handle invalid".into() };
    /// assert_eq!(err.as_label(), "setup_extension_init");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SetupError::SecretRead { .. } => "setup_secret_read",
            SetupError::ExtensionInit { .. } => "setup_extension_init",
        }
    }
}

/// # Failures returned from a lifecycle run.
///
/// Produced by [`LifecycleActor::execute`](crate::LifecycleActor::execute).
/// All variants are fatal for the current run; the caller decides whether to
/// retry by reconstructing the runtime. `execute` performs no teardown on
/// failure — resource release is exclusively the interrupt path's concern,
/// regardless of which phase failed.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RunError {
    /// The managed subprocess could not be launched.
    #[error("launching managed instance")]
    RunnerStart {
        /// The runner's failure.
        #[source]
        source: RunnerError,
    },

    /// The enrollment round trip itself failed (transport or server error).
    #[error("enrolling host")]
    Enroll {
        /// The session's failure.
        #[source]
        source: SessionError,
    },

    /// Enrollment completed but the server rejected the credential.
    ///
    /// A distinct error value rather than a wrapper: there is no underlying
    /// error on this path, the call succeeded and reported `invalid = true`.
    /// Retrying without operator intervention is pointless.
    #[error("enroll secret rejected by server")]
    EnrollRejected,
}

impl RunError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use extvisor::RunError;
    ///
    /// let err = RunError::EnrollRejected;
    /// assert_eq!(err.as_label(), "run_enroll_rejected");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RunError::RunnerStart { .. } => "run_runner_start",
            RunError::Enroll { .. } => "run_enroll",
            RunError::EnrollRejected => "run_enroll_rejected",
        }
    }
}

/// # Faults reported by the subprocess runner.
///
/// Implementations of [`Runner`](crate::Runner) and
/// [`Querier`](crate::Querier) produce these. During interrupt, a `Shutdown`
/// fault is published to the bus and teardown continues.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RunnerError {
    /// The subprocess could not be spawned.
    #[error("spawn failed: {reason}")]
    Start { reason: String },

    /// The subprocess could not be restarted.
    #[error("restart failed: {reason}")]
    Restart { reason: String },

    /// The subprocess did not shut down cleanly.
    #[error("shutdown failed: {reason}")]
    Shutdown { reason: String },

    /// An operation was invoked against a runner with no live subprocess.
    #[error("no managed instance is running")]
    NotRunning,

    /// An ad-hoc introspection query failed.
    #[error("query failed: {reason}")]
    Query { reason: String },
}

impl RunnerError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RunnerError::Start { .. } => "runner_start",
            RunnerError::Restart { .. } => "runner_restart",
            RunnerError::Shutdown { .. } => "runner_shutdown",
            RunnerError::NotRunning => "runner_not_running",
            RunnerError::Query { .. } => "runner_query",
        }
    }
}

/// # Faults reported by the extension session.
///
/// Implementations of [`Session`](crate::Session) and session factories
/// produce these. A factory failure is wrapped into
/// [`SetupError::ExtensionInit`]; a `Shutdown` fault observed during interrupt
/// is published to the bus and teardown continues.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SessionError {
    /// The session's backing state (e.g. a storage handle) is unusable.
    #[error("session storage: {reason}")]
    Storage { reason: String },

    /// The management-service round trip failed.
    #[error("session transport: {reason}")]
    Transport { reason: String },

    /// The session did not stop cleanly.
    #[error("session shutdown: {reason}")]
    Shutdown { reason: String },
}

impl SessionError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SessionError::Storage { .. } => "session_storage",
            SessionError::Transport { .. } => "session_transport",
            SessionError::Shutdown { .. } => "session_shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        let err = SetupError::SecretRead {
            path: PathBuf::from("/etc/agent/secret"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.as_label(), "setup_secret_read");
        assert_eq!(
            RunError::RunnerStart {
                source: RunnerError::Start { reason: "boom".into() }
            }
            .as_label(),
            "run_runner_start"
        );
        assert_eq!(RunnerError::NotRunning.as_label(), "runner_not_running");
        assert_eq!(
            SessionError::Shutdown { reason: "hung".into() }.as_label(),
            "session_shutdown"
        );
    }

    #[test]
    fn run_errors_keep_their_collaborator_source() {
        let err = RunError::RunnerStart {
            source: RunnerError::Start {
                reason: "binary not found".into(),
            },
        };
        let source = std::error::Error::source(&err).expect("source should be preserved");
        assert!(source.to_string().contains("binary not found"));

        let err = RunError::Enroll {
            source: SessionError::Transport {
                reason: "connection refused".into(),
            },
        };
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn secret_read_keeps_path_and_source() {
        let err = SetupError::SecretRead {
            path: PathBuf::from("/tmp/nope"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/nope"), "message should carry the path: {msg}");
        assert!(std::error::Error::source(&err).is_some());
    }
}
