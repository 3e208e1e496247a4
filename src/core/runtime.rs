//! # Construction wiring for one extension runtime.
//!
//! [`create_extension_runtime`] turns static [`Options`] into the pair a host
//! supervises: the [`LifecycleActor`] (execute/interrupt) and a
//! [`RunnerControl`] handle exposing restart and forced runner shutdown
//! outside the normal interrupt path.
//!
//! ## Construction sequence
//! ```text
//! Options ──► resolve_enroll_secret()      (fatal: SecretRead)
//!         ──► max_bytes_per_batch()        (advisory only, via bus)
//!         ──► SessionOptions
//!         ──► make_session(SessionOptions) (fatal: ExtensionInit)
//!         ──► LifecycleActor + RunnerControl
//! ```
//!
//! Construction-time failures abort before any resource is started, so no
//! cleanup is owed. The runner is handed in constructed-but-unstarted; the
//! actor's `execute` starts it.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::Options;
use crate::core::actor::LifecycleActor;
use crate::core::{batch, secret};
use crate::error::{RunnerError, SetupError};
use crate::events::{Bus, Event, EventKind};
use crate::runner::Runner;
use crate::session::{Session, SessionOptions};

/// Direct control over the managed subprocess, independent of the actor.
///
/// Holds a non-owning clone of the runner handle. `restart` does not touch
/// enrollment state or the session; `shutdown` exists for forced teardown
/// before enrollment ever completes.
pub struct RunnerControl<R> {
    runner: Arc<R>,
    bus: Bus,
}

impl<R: Runner> RunnerControl<R> {
    pub(crate) fn new(runner: Arc<R>, bus: Bus) -> Self {
        Self { runner, bus }
    }

    /// Restarts the managed subprocess.
    ///
    /// Delegates directly to the runner; its error is surfaced unchanged.
    pub async fn restart(&self) -> Result<(), RunnerError> {
        self.bus.publish(Event::now(EventKind::RestartRequested));
        self.runner.restart().await
    }

    /// Shuts down the managed subprocess, bypassing the interrupt path.
    pub async fn shutdown(&self) -> Result<(), RunnerError> {
        self.runner.shutdown().await
    }
}

/// Builds one extension runtime from static options.
///
/// - `make_session` constructs the session collaborator from the derived
///   [`SessionOptions`]; its failure is wrapped as
///   [`SetupError::ExtensionInit`].
/// - `runner` is the constructed-but-unstarted subprocess handle.
/// - `bus` is the logger sink; the batch-size advisory, if any, is published
///   here during construction.
/// - `token` is the run's governing cancellation signal. The actor never
///   cancels it; timeout and shutdown policy belong to the caller.
///
/// Returns the actor/control pair, or a fatal [`SetupError`] with no
/// partially-started resources.
pub fn create_extension_runtime<S, R, F>(
    opts: &Options,
    make_session: F,
    runner: Arc<R>,
    bus: Bus,
    token: CancellationToken,
) -> Result<(LifecycleActor<S, R>, RunnerControl<R>), SetupError>
where
    S: Session,
    R: Runner,
    F: FnOnce(SessionOptions) -> Result<S, crate::error::SessionError>,
{
    let enroll_secret = secret::resolve_enroll_secret(opts)?;
    let max_bytes_per_batch =
        batch::max_bytes_per_batch(opts.log_max_bytes_per_batch, &opts.transport, &bus);

    let session_opts = SessionOptions {
        enroll_secret,
        max_bytes_per_batch,
        logging_interval: opts.logging_interval,
        run_immediately: opts.run_immediately,
    };

    let session = make_session(session_opts).map_err(|err| SetupError::ExtensionInit {
        reason: err.to_string(),
    })?;

    let actor = LifecycleActor::new(Arc::new(session), runner.clone(), bus.clone(), token);
    let control = RunnerControl::new(runner, bus);
    Ok((actor, control))
}
