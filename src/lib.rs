//! # extvisor
//!
//! **Extvisor** is the lifecycle supervisor for a management-agent extension:
//! it turns static options into a running, enrolled, cleanly-shutdownable
//! session coordinating a managed subprocess, a network enrollment handshake,
//! and an event/logging subsystem. Failures in any phase never leave child
//! resources orphaned.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!            Options (read-only)
//!                │
//!                ▼
//! ┌───────────────────────────────────────────────────────────┐
//! │ create_extension_runtime()                                │
//! │  - resolve_enroll_secret()     (inline > file > empty)    │
//! │  - max_bytes_per_batch()       (transport-aware, advisory)│
//! │  - make_session(SessionOptions)                           │
//! └──────┬──────────────────────────────────────────┬─────────┘
//!        ▼                                          ▼
//! ┌────────────────────────────┐        ┌──────────────────────┐
//! │ LifecycleActor             │        │ RunnerControl        │
//! │  execute():                │        │  restart()           │
//! │    Starting → Enrolling →  │        │  shutdown()          │
//! │    Running → Stopped       │        └──────────┬───────────┘
//! │  interrupt(trigger):       │                   │
//! │    session.shutdown()      │            Arc<dyn Runner>
//! │    runner.shutdown()       │                   │
//! └──────┬──────────────┬──────┘                   │
//!        ▼              ▼                          ▼
//!   Arc<Session>   Arc<Runner> ◄── set_querier ── (same handle)
//!        │              │
//!        └── publish ───┴────► Bus ────► attach() ────► Subscribe impls
//!                        (broadcast chan)                (LogWriter, ...)
//! ```
//!
//! ### Lifecycle
//! ```text
//! execute():
//!   ├─► runner.start()                    (fail → RunError::RunnerStart)
//!   ├─► session.set_querier(runner)       (set-once, before enrollment)
//!   ├─► session.enroll(token)             (fail → RunError::Enroll)
//!   │       └─ invalid=true → RunError::EnrollRejected (never wraps a nil error)
//!   ├─► session.start()
//!   ├─► publish ExtensionStarted
//!   └─► token.cancelled().await           (suspends, no polling)
//!
//! interrupt(trigger):                     (any phase, any task, any number of times)
//!   ├─► publish Interrupted (info)
//!   ├─► session.shutdown()                (fault published, never propagated)
//!   └─► runner.shutdown()                 (fault published, never propagated)
//! ```
//!
//! Failures inside `execute` are returned without teardown; resource release
//! is exclusively the interrupt path's job, so there is a single code path
//! for it regardless of which phase failed.
//!
//! ## Features
//! | Area              | Description                                             | Key types / traits                         |
//! |-------------------|---------------------------------------------------------|--------------------------------------------|
//! | **Lifecycle**     | Execute/interrupt state machine over session + runner.  | [`LifecycleActor`], [`LifecyclePhase`]     |
//! | **Control**       | Restart/forced shutdown of the subprocess.              | [`RunnerControl`]                          |
//! | **Collaborators** | Traits the host's session and runner must satisfy.      | [`Session`], [`Runner`], [`Querier`]       |
//! | **Policies**      | Secret resolution, transport-aware batch cap.           | [`resolve_enroll_secret`], [`max_bytes_per_batch`] |
//! | **Events**        | Structured key/value observability at info/debug.       | [`Bus`], [`Event`], [`EventKind`], [`Subscribe`] |
//! | **Errors**        | Typed, labelled errors along the lifecycle fault lines. | [`SetupError`], [`RunError`]               |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//! use extvisor::{
//!     cancel_on_signal, create_extension_runtime, Bus, Enrollment, Options, Querier,
//!     QueryRow, Runner, RunnerError, Session, SessionError, SessionOptions,
//! };
//!
//! struct NullRunner;
//!
//! #[async_trait]
//! impl Querier for NullRunner {
//!     async fn query(&self, _sql: &str) -> Result<Vec<QueryRow>, RunnerError> { Ok(Vec::new()) }
//! }
//!
//! #[async_trait]
//! impl Runner for NullRunner {
//!     async fn start(&self) -> Result<(), RunnerError> { Ok(()) }
//!     async fn restart(&self) -> Result<(), RunnerError> { Ok(()) }
//!     async fn shutdown(&self) -> Result<(), RunnerError> { Ok(()) }
//! }
//!
//! struct NullSession;
//!
//! #[async_trait]
//! impl Session for NullSession {
//!     fn set_querier(&self, _querier: Arc<dyn Querier>) {}
//!     async fn enroll(&self, _ctx: &CancellationToken) -> Result<Enrollment, SessionError> {
//!         Ok(Enrollment { node_key: "node".into(), invalid: false })
//!     }
//!     async fn start(&self) {}
//!     async fn shutdown(&self) -> Result<(), SessionError> { Ok(()) }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let token = CancellationToken::new();
//!     let bus = Bus::default();
//!
//!     let (actor, _control) = create_extension_runtime(
//!         &Options::default(),
//!         |_opts: SessionOptions| Ok(NullSession),
//!         Arc::new(NullRunner),
//!         bus,
//!         token.clone(),
//!     )?;
//!
//!     let _signal_task = cancel_on_signal(token.clone());
//!     let result = actor.execute().await;
//!     actor.interrupt(None).await;
//!     result?;
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod runner;
mod session;
mod subscribers;

// ---- Public re-exports ----

pub use config::Options;
pub use core::{
    cancel_on_signal, create_extension_runtime, max_bytes_per_batch, resolve_enroll_secret,
    LifecycleActor, LifecyclePhase, RunnerControl,
};
pub use error::{RunError, RunnerError, SessionError, SetupError};
pub use events::{Bus, Event, EventKind, Severity};
pub use runner::{Querier, QueryRow, Runner};
pub use session::{Enrollment, Session, SessionOptions};
pub use subscribers::{attach, Subscribe};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
