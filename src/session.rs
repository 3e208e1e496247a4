//! # Extension session: the reporting/configuration endpoint.
//!
//! The session wraps the management-service client: it enrolls the host,
//! ships log batches, refreshes configuration, and polls for distributed
//! queries. All of that is the collaborator's concern — this crate constructs
//! the session from a derived [`SessionOptions`] and sequences its lifecycle:
//!
//! ```text
//! constructed ──► set_querier() ──► enroll() ──► start() ──► running ──► shutdown()
//! ```
//!
//! `shutdown()` must be idempotent from the caller's perspective: the
//! interrupt path invokes it even when `start()` never ran.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::SessionError;
use crate::runner::Querier;

/// Configuration derived once at construction and owned by the session.
///
/// Immutable after creation; see
/// [`create_extension_runtime`](crate::create_extension_runtime) for how the
/// fields are derived from [`Options`](crate::Options).
#[derive(Clone, Debug)]
pub struct SessionOptions {
    /// Resolved enrollment secret (inline value, or trimmed file contents).
    pub enroll_secret: String,
    /// Per-batch byte cap for shipped log records.
    pub max_bytes_per_batch: usize,
    /// Interval between log-shipping rounds.
    pub logging_interval: Duration,
    /// Run differential queries immediately after start.
    pub run_immediately: bool,
}

/// Result of an enrollment round trip.
///
/// Transient: this crate inspects `invalid` and drops the value. Persistence
/// of the node key, if any, belongs to the session collaborator.
#[derive(Clone, Debug)]
pub struct Enrollment {
    /// Identity assigned by the management service.
    pub node_key: String,
    /// The server processed the request but rejected the credential.
    pub invalid: bool,
}

/// The reporting/configuration endpoint object.
///
/// Implementations hold the network client and a set-once querier
/// back-reference (e.g. in a `std::sync::OnceLock`). The lifecycle actor
/// guarantees `set_querier` runs after the runner starts and before `enroll`,
/// so readers never observe an unbound querier — no locking is required
/// beyond the set-once cell.
#[async_trait]
pub trait Session: Send + Sync + 'static {
    /// Binds the query executor backing ad-hoc introspection queries.
    ///
    /// Called exactly once per run, before enrollment.
    fn set_querier(&self, querier: Arc<dyn Querier>);

    /// Performs the enrollment handshake with the management service.
    ///
    /// Returns the assigned identity and whether the credential was rejected.
    /// `ctx` is the run's governing cancellation signal; implementations may
    /// abort the round trip when it fires.
    async fn enroll(&self, ctx: &CancellationToken) -> Result<Enrollment, SessionError>;

    /// Starts the session's background work: log shipping, config refresh,
    /// distributed-query polling.
    async fn start(&self);

    /// Stops the session's background work.
    ///
    /// Safe to invoke even if `start` was never called or already failed.
    async fn shutdown(&self) -> Result<(), SessionError>;
}
