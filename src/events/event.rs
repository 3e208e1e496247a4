//! # Lifecycle events emitted by the extension runtime.
//!
//! [`EventKind`] classifies what happened; every kind carries a fixed
//! [`Severity`] (informational or debug), mirroring the structured key/value
//! logging contract the runtime owes its host. The [`Event`] struct carries
//! metadata such as timestamps, a failure reason, and batch-size details.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use extvisor::{Event, EventKind, Severity};
//!
//! let ev = Event::now(EventKind::BatchSizeAdvisory)
//!     .with_configured_mb(10)
//!     .with_limit_bytes(10 << 20);
//!
//! assert_eq!(ev.kind, EventKind::BatchSizeAdvisory);
//! assert_eq!(ev.kind.severity(), Severity::Info);
//! assert_eq!(ev.configured_mb, Some(10));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Logging severity attached to an event kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operator-relevant happenings (started, interrupted, advisories).
    Info,
    /// Sequencing detail useful when tracing a run.
    Debug,
}

impl Severity {
    /// Returns a short stable label (lowercase) for use in log lines.
    pub fn as_label(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }
}

/// Classification of lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// The configured batch cap exceeds the transport's recommended headroom.
    ///
    /// Advisory only; the configured value is used regardless. Sets:
    /// - `configured_mb`: the operator-configured cap (MB)
    /// - `limit_bytes`: the cap actually applied (bytes)
    BatchSizeAdvisory,

    /// The managed subprocess is being started.
    RunnerStarting,

    /// The runner was bound as the session's query executor.
    ///
    /// Happens exactly once per run, after the runner starts and before
    /// enrollment.
    QuerierBound,

    /// The enrollment round trip is being performed.
    Enrolling,

    /// Enrollment succeeded and the session's background work is running.
    ExtensionStarted,

    /// The run observed its cancellation signal and unblocked.
    ExtensionStopped,

    /// The interrupt path was entered.
    ///
    /// Sets:
    /// - `reason`: the triggering error, when one was supplied
    Interrupted,

    /// Session shutdown failed during interrupt (teardown continued).
    ///
    /// Sets:
    /// - `reason`: the session's failure message
    SessionShutdownFailed,

    /// Runner shutdown failed during interrupt (teardown continued).
    ///
    /// Sets:
    /// - `reason`: the runner's failure message
    RunnerShutdownFailed,

    /// A subprocess restart was requested through the control handle.
    RestartRequested,
}

impl EventKind {
    /// Returns the severity this kind is logged at.
    ///
    /// Advisories, the started/interrupted markers, and teardown failures are
    /// informational; sequencing detail is debug.
    pub fn severity(&self) -> Severity {
        match self {
            EventKind::BatchSizeAdvisory
            | EventKind::ExtensionStarted
            | EventKind::Interrupted
            | EventKind::SessionShutdownFailed
            | EventKind::RunnerShutdownFailed => Severity::Info,
            EventKind::RunnerStarting
            | EventKind::QuerierBound
            | EventKind::Enrolling
            | EventKind::ExtensionStopped
            | EventKind::RestartRequested => Severity::Debug,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            EventKind::BatchSizeAdvisory => "batch_size_advisory",
            EventKind::RunnerStarting => "runner_starting",
            EventKind::QuerierBound => "querier_bound",
            EventKind::Enrolling => "enrolling",
            EventKind::ExtensionStarted => "extension_started",
            EventKind::ExtensionStopped => "extension_stopped",
            EventKind::Interrupted => "interrupted",
            EventKind::SessionShutdownFailed => "session_shutdown_failed",
            EventKind::RunnerShutdownFailed => "runner_shutdown_failed",
            EventKind::RestartRequested => "restart_requested",
        }
    }
}

/// A single lifecycle event with metadata.
///
/// Only the fields relevant to a given [`EventKind`] are populated; the rest
/// stay `None`. Construct with [`Event::now`] and the `with_*` builders.
#[derive(Debug, Clone)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,
    /// Wall-clock timestamp taken at construction.
    pub at: SystemTime,
    /// Globally monotonic sequence number.
    pub seq: u64,
    /// Failure message or interrupt trigger, when one exists.
    pub reason: Option<String>,
    /// Operator-configured batch cap in megabytes (advisory events).
    pub configured_mb: Option<u64>,
    /// Applied batch cap in bytes (advisory events).
    pub limit_bytes: Option<usize>,
}

impl Event {
    /// Creates an event stamped with the current time and the next sequence
    /// number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            kind,
            at: SystemTime::now(),
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            reason: None,
            configured_mb: None,
            limit_bytes: None,
        }
    }

    /// Attaches a failure reason or interrupt trigger.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches the operator-configured batch cap (MB).
    pub fn with_configured_mb(mut self, mb: u64) -> Self {
        self.configured_mb = Some(mb);
        self
    }

    /// Attaches the applied batch cap (bytes).
    pub fn with_limit_bytes(mut self, bytes: usize) -> Self {
        self.limit_bytes = Some(bytes);
        self
    }
}
