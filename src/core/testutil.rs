//! In-memory session/runner fakes for lifecycle tests.
//!
//! Both fakes share a [`Recorder`] so tests can assert cross-collaborator
//! call ordering (e.g. session shutdown before runner shutdown).

use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{RunnerError, SessionError};
use crate::runner::{Querier, QueryRow, Runner};
use crate::session::{Enrollment, Session};

/// Records collaborator calls in invocation order.
#[derive(Default)]
pub(crate) struct Recorder {
    calls: Mutex<Vec<&'static str>>,
}

impl Recorder {
    pub(crate) fn note(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

pub(crate) struct FakeRunner {
    rec: Arc<Recorder>,
    fail_start: bool,
    fail_restart: bool,
    fail_shutdown: bool,
}

impl FakeRunner {
    pub(crate) fn new(rec: Arc<Recorder>) -> Self {
        Self {
            rec,
            fail_start: false,
            fail_restart: false,
            fail_shutdown: false,
        }
    }

    pub(crate) fn failing_start(mut self) -> Self {
        self.fail_start = true;
        self
    }

    pub(crate) fn failing_restart(mut self) -> Self {
        self.fail_restart = true;
        self
    }

    /// Shutdown reports `NotRunning`, as a never-started runner would.
    pub(crate) fn failing_shutdown(mut self) -> Self {
        self.fail_shutdown = true;
        self
    }
}

#[async_trait]
impl Querier for FakeRunner {
    async fn query(&self, _sql: &str) -> Result<Vec<QueryRow>, RunnerError> {
        self.rec.note("runner.query");
        Ok(Vec::new())
    }
}

#[async_trait]
impl Runner for FakeRunner {
    async fn start(&self) -> Result<(), RunnerError> {
        self.rec.note("runner.start");
        if self.fail_start {
            return Err(RunnerError::Start {
                reason: "binary not found".into(),
            });
        }
        Ok(())
    }

    async fn restart(&self) -> Result<(), RunnerError> {
        self.rec.note("runner.restart");
        if self.fail_restart {
            return Err(RunnerError::Restart {
                reason: "instance wedged".into(),
            });
        }
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), RunnerError> {
        self.rec.note("runner.shutdown");
        if self.fail_shutdown {
            return Err(RunnerError::NotRunning);
        }
        Ok(())
    }
}

pub(crate) struct FakeSession {
    rec: Arc<Recorder>,
    invalid: bool,
    fail_enroll: bool,
    fail_shutdown: bool,
    querier: OnceLock<Arc<dyn Querier>>,
}

impl FakeSession {
    pub(crate) fn new(rec: Arc<Recorder>) -> Self {
        Self {
            rec,
            invalid: false,
            fail_enroll: false,
            fail_shutdown: false,
            querier: OnceLock::new(),
        }
    }

    /// Enrollment succeeds but reports the credential invalid.
    pub(crate) fn rejecting(mut self) -> Self {
        self.invalid = true;
        self
    }

    pub(crate) fn failing_enroll(mut self) -> Self {
        self.fail_enroll = true;
        self
    }

    pub(crate) fn failing_shutdown(mut self) -> Self {
        self.fail_shutdown = true;
        self
    }

    pub(crate) fn querier_bound(&self) -> bool {
        self.querier.get().is_some()
    }
}

#[async_trait]
impl Session for FakeSession {
    fn set_querier(&self, querier: Arc<dyn Querier>) {
        self.rec.note("session.set_querier");
        let _ = self.querier.set(querier);
    }

    async fn enroll(&self, _ctx: &CancellationToken) -> Result<Enrollment, SessionError> {
        self.rec.note("session.enroll");
        if self.fail_enroll {
            return Err(SessionError::Transport {
                reason: "connection refused".into(),
            });
        }
        Ok(Enrollment {
            node_key: "node-1".into(),
            invalid: self.invalid,
        })
    }

    async fn start(&self) {
        self.rec.note("session.start");
    }

    async fn shutdown(&self) -> Result<(), SessionError> {
        self.rec.note("session.shutdown");
        if self.fail_shutdown {
            return Err(SessionError::Shutdown {
                reason: "client hung".into(),
            });
        }
        Ok(())
    }
}
