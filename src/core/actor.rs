//! # Lifecycle actor: the execute/interrupt state machine.
//!
//! [`LifecycleActor`] owns the extension session and the subprocess runner and
//! sequences them through one run:
//!
//! ```text
//! Idle ──► Starting ──► Enrolling ──► Running ──► Stopped
//!              │            │            ▲
//!              │            ├──► EnrollRejected (credential bad, terminal)
//!              └────────────┴──► Failed         (underlying call errored)
//!
//! any state ──► Interrupting ──► Stopped        (interrupt path)
//! ```
//!
//! ## Supervisor contract
//! - [`execute`](LifecycleActor::execute) runs on one logical task, performs
//!   no internal fan-out, and suspends (no polling) on the governing
//!   cancellation token once `Running` is reached. Single-shot: it must not
//!   be invoked more than once concurrently.
//! - [`interrupt`](LifecycleActor::interrupt) may be invoked from another
//!   task at any time, concurrently with `execute`, and tolerates every
//!   phase — including not-yet-started and already-returned. It performs at
//!   most two bounded teardown calls and returns; it never blocks
//!   indefinitely.
//! - Session shutdown is always attempted before runner shutdown: the session
//!   may hold an in-flight reference to the runner as its query executor, and
//!   tearing down the runner first could fail the session mid-operation
//!   instead of letting it stop gracefully.
//!
//! ## Failure propagation
//! Failures during `Starting`/`Enrolling` are returned from `execute` without
//! any teardown attempt; resource release happens on the interrupt path only,
//! so there is a single code path for it regardless of which phase failed.

use std::sync::{Arc, RwLock};

use tokio_util::sync::CancellationToken;

use crate::error::RunError;
use crate::events::{Bus, Event, EventKind};
use crate::runner::{Querier, Runner};
use crate::session::Session;

/// Observable lifecycle state.
///
/// Exposed via [`LifecycleActor::phase`] so hosts can poll progress instead
/// of blocking on `execute`'s return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Constructed; `execute` has not run.
    Idle,
    /// The managed subprocess is being started.
    Starting,
    /// The enrollment handshake is in flight.
    Enrolling,
    /// Enrolled and started; suspended on the cancellation signal.
    Running,
    /// The interrupt path is tearing down session and runner.
    Interrupting,
    /// The run is over (cleanly, or after an interrupt).
    Stopped,
    /// Terminal: the server rejected the enrollment credential.
    EnrollRejected,
    /// Terminal: an underlying start/enroll call errored.
    Failed,
}

impl LifecyclePhase {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            LifecyclePhase::Idle => "idle",
            LifecyclePhase::Starting => "starting",
            LifecyclePhase::Enrolling => "enrolling",
            LifecyclePhase::Running => "running",
            LifecyclePhase::Interrupting => "interrupting",
            LifecyclePhase::Stopped => "stopped",
            LifecyclePhase::EnrollRejected => "enroll_rejected",
            LifecyclePhase::Failed => "failed",
        }
    }
}

/// The core orchestrator: owns the session and the runner, exposes the
/// execute/interrupt pair any hosting process-group manager invokes.
///
/// Construct via [`create_extension_runtime`](crate::create_extension_runtime).
pub struct LifecycleActor<S, R> {
    session: Arc<S>,
    runner: Arc<R>,
    bus: Bus,
    token: CancellationToken,
    phase: RwLock<LifecyclePhase>,
}

impl<S: Session, R: Runner> LifecycleActor<S, R> {
    pub(crate) fn new(session: Arc<S>, runner: Arc<R>, bus: Bus, token: CancellationToken) -> Self {
        Self {
            session,
            runner,
            bus,
            token,
            phase: RwLock::new(LifecyclePhase::Idle),
        }
    }

    /// Returns a snapshot of the current lifecycle phase.
    pub fn phase(&self) -> LifecyclePhase {
        *self.phase.read().unwrap_or_else(|e| e.into_inner())
    }

    fn set_phase(&self, phase: LifecyclePhase) {
        *self.phase.write().unwrap_or_else(|e| e.into_inner()) = phase;
    }

    /// Runs the lifecycle to completion.
    ///
    /// Starts the runner, binds it as the session's query executor, enrolls,
    /// starts the session's background work, then suspends until the
    /// governing cancellation token fires. Clean shutdown is reported via the
    /// interrupt path, not via this return value.
    ///
    /// Single-shot: must not be invoked more than once concurrently.
    pub async fn execute(&self) -> Result<(), RunError> {
        self.set_phase(LifecyclePhase::Starting);
        self.bus.publish(Event::now(EventKind::RunnerStarting));

        if let Err(err) = self.runner.start().await {
            self.set_phase(LifecyclePhase::Failed);
            return Err(RunError::RunnerStart { source: err });
        }

        // The runner allows querying the managed instance from the session.
        // Enrollment below uses it to gather initial host details.
        let querier: Arc<dyn Querier> = self.runner.clone();
        self.session.set_querier(querier);
        self.bus.publish(Event::now(EventKind::QuerierBound));

        self.set_phase(LifecyclePhase::Enrolling);
        self.bus.publish(Event::now(EventKind::Enrolling));

        let enrollment = match self.session.enroll(&self.token).await {
            Ok(enrollment) => enrollment,
            Err(err) => {
                self.set_phase(LifecyclePhase::Failed);
                return Err(RunError::Enroll { source: err });
            }
        };
        if enrollment.invalid {
            self.set_phase(LifecyclePhase::EnrollRejected);
            return Err(RunError::EnrollRejected);
        }

        self.session.start().await;
        self.set_phase(LifecyclePhase::Running);
        self.bus.publish(Event::now(EventKind::ExtensionStarted));

        self.token.cancelled().await;

        self.set_phase(LifecyclePhase::Stopped);
        self.bus.publish(Event::now(EventKind::ExtensionStopped));
        Ok(())
    }

    /// Tears down the session, then the runner, regardless of which phase
    /// `execute` reached.
    ///
    /// `trigger` is the error that prompted the interrupt, when one exists;
    /// it is logged at informational severity. Teardown failures are
    /// published, never propagated — teardown proceeds past either one.
    pub async fn interrupt(&self, trigger: Option<&(dyn std::error::Error + Send + Sync)>) {
        let mut ev = Event::now(EventKind::Interrupted);
        if let Some(err) = trigger {
            ev = ev.with_reason(err.to_string());
        }
        self.bus.publish(ev);
        self.set_phase(LifecyclePhase::Interrupting);

        if let Err(err) = self.session.shutdown().await {
            self.bus.publish(
                Event::now(EventKind::SessionShutdownFailed).with_reason(err.to_string()),
            );
        }
        if let Err(err) = self.runner.shutdown().await {
            self.bus
                .publish(Event::now(EventKind::RunnerShutdownFailed).with_reason(err.to_string()));
        }

        self.set_phase(LifecyclePhase::Stopped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testutil::{FakeRunner, FakeSession, Recorder};
    use crate::error::RunnerError;

    fn actor(
        session: FakeSession,
        runner: FakeRunner,
    ) -> (LifecycleActor<FakeSession, FakeRunner>, CancellationToken) {
        let token = CancellationToken::new();
        let actor = LifecycleActor::new(
            Arc::new(session),
            Arc::new(runner),
            Bus::default(),
            token.clone(),
        );
        (actor, token)
    }

    #[tokio::test]
    async fn clean_run_sequences_collaborators() {
        let rec = Arc::new(Recorder::default());
        let (actor, token) = actor(FakeSession::new(rec.clone()), FakeRunner::new(rec.clone()));

        // Pre-cancelled token: execute runs the full sequence, then observes
        // the signal immediately instead of suspending.
        token.cancel();
        actor.execute().await.unwrap();

        assert_eq!(
            rec.calls(),
            vec![
                "runner.start",
                "session.set_querier",
                "session.enroll",
                "session.start"
            ]
        );
        assert_eq!(actor.phase(), LifecyclePhase::Stopped);
    }

    #[tokio::test]
    async fn runner_start_failure_skips_enrollment() {
        let rec = Arc::new(Recorder::default());
        let runner = FakeRunner::new(rec.clone()).failing_start();
        let (actor, _token) = actor(FakeSession::new(rec.clone()), runner);

        let err = actor.execute().await.unwrap_err();
        assert!(matches!(err, RunError::RunnerStart { .. }));
        assert!(
            std::error::Error::source(&err).is_some(),
            "runner failure should stay on the error chain"
        );
        assert_eq!(rec.calls(), vec!["runner.start"]);
        assert_eq!(actor.phase(), LifecyclePhase::Failed);
    }

    #[tokio::test]
    async fn enroll_transport_failure_maps_to_enroll_error() {
        let rec = Arc::new(Recorder::default());
        let session = FakeSession::new(rec.clone()).failing_enroll();
        let (actor, _token) = actor(session, FakeRunner::new(rec.clone()));

        let err = actor.execute().await.unwrap_err();
        assert!(matches!(err, RunError::Enroll { .. }));
        assert!(!rec.calls().contains(&"session.start"));
        assert_eq!(actor.phase(), LifecyclePhase::Failed);
    }

    #[tokio::test]
    async fn rejected_credential_never_starts_session() {
        let rec = Arc::new(Recorder::default());
        let session = FakeSession::new(rec.clone()).rejecting();
        let (actor, _token) = actor(session, FakeRunner::new(rec.clone()));

        let err = actor.execute().await.unwrap_err();
        assert!(matches!(err, RunError::EnrollRejected));
        assert!(!rec.calls().contains(&"session.start"));
        assert_eq!(actor.phase(), LifecyclePhase::EnrollRejected);
    }

    #[tokio::test]
    async fn querier_is_bound_after_start_and_before_enrollment() {
        let rec = Arc::new(Recorder::default());
        let session = Arc::new(FakeSession::new(rec.clone()));
        let token = CancellationToken::new();
        token.cancel();
        let actor = LifecycleActor::new(
            session.clone(),
            Arc::new(FakeRunner::new(rec.clone())),
            Bus::default(),
            token,
        );

        actor.execute().await.unwrap();

        assert!(session.querier_bound());
        let calls = rec.calls();
        let bind = calls.iter().position(|c| *c == "session.set_querier");
        let enroll = calls.iter().position(|c| *c == "session.enroll");
        let start = calls.iter().position(|c| *c == "runner.start");
        assert!(start < bind && bind < enroll);
    }

    #[tokio::test]
    async fn interrupt_tears_down_session_before_runner() {
        let rec = Arc::new(Recorder::default());
        let (actor, _token) = actor(FakeSession::new(rec.clone()), FakeRunner::new(rec.clone()));

        actor.interrupt(None).await;

        assert_eq!(rec.calls(), vec!["session.shutdown", "runner.shutdown"]);
        assert_eq!(actor.phase(), LifecyclePhase::Stopped);
    }

    #[tokio::test]
    async fn interrupt_before_execute_tolerates_unstarted_runner() {
        let rec = Arc::new(Recorder::default());
        let runner = FakeRunner::new(rec.clone()).failing_shutdown();
        let (actor, _token) = actor(FakeSession::new(rec.clone()), runner);
        let mut rx = actor.bus.subscribe();

        // Runner was never started; its shutdown reports NotRunning, which is
        // published rather than propagated.
        actor
            .interrupt(Some(&RunnerError::NotRunning as &(dyn std::error::Error + Send + Sync)))
            .await;

        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        assert!(kinds.contains(&EventKind::Interrupted));
        assert!(kinds.contains(&EventKind::RunnerShutdownFailed));
        assert_eq!(actor.phase(), LifecyclePhase::Stopped);
    }

    #[tokio::test]
    async fn interrupt_twice_is_harmless() {
        let rec = Arc::new(Recorder::default());
        let (actor, _token) = actor(FakeSession::new(rec.clone()), FakeRunner::new(rec.clone()));

        actor.interrupt(None).await;
        actor.interrupt(None).await;

        assert_eq!(
            rec.calls(),
            vec![
                "session.shutdown",
                "runner.shutdown",
                "session.shutdown",
                "runner.shutdown"
            ]
        );
    }

    #[tokio::test]
    async fn session_shutdown_failure_does_not_stop_teardown() {
        let rec = Arc::new(Recorder::default());
        let session = FakeSession::new(rec.clone()).failing_shutdown();
        let (actor, _token) = actor(session, FakeRunner::new(rec.clone()));
        let mut rx = actor.bus.subscribe();

        actor.interrupt(None).await;

        // Runner shutdown still ran after the session fault.
        assert_eq!(rec.calls(), vec!["session.shutdown", "runner.shutdown"]);
        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        assert!(kinds.contains(&EventKind::SessionShutdownFailed));
    }

    #[tokio::test]
    async fn interrupt_races_with_running_execute() {
        let rec = Arc::new(Recorder::default());
        let (actor, token) = actor(FakeSession::new(rec.clone()), FakeRunner::new(rec.clone()));
        let actor = Arc::new(actor);

        let exec = tokio::spawn({
            let actor = actor.clone();
            async move { actor.execute().await }
        });

        // Let execute reach Running (it suspends on the token there).
        while actor.phase() != LifecyclePhase::Running {
            tokio::task::yield_now().await;
        }

        actor.interrupt(None).await;
        token.cancel();
        exec.await.unwrap().unwrap();

        let calls = rec.calls();
        let session_pos = calls.iter().position(|c| *c == "session.shutdown").unwrap();
        let runner_pos = calls.iter().position(|c| *c == "runner.shutdown").unwrap();
        assert!(session_pos < runner_pos);
    }
}
