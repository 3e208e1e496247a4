//! # Subprocess runner and querier capabilities.
//!
//! The runner supervises the managed subprocess (the introspection engine the
//! extension augments with custom plugins). This crate never touches process
//! groups, signals, or binary discovery itself — it sequences calls against
//! these traits and owns the ordering guarantees.
//!
//! [`Runner`] is a supertrait of [`Querier`]: a live runner is exactly what
//! backs the session's ad-hoc query capability, so the lifecycle actor can
//! hand the same handle to the session as its query executor.
//!
//! ## Lifecycle
//! ```text
//! constructed (not started) ──► start() ──► [restart()]* ──► shutdown()
//! ```
//!
//! Implementations should tolerate `shutdown()` on a never-started or
//! already-stopped runner (return [`RunnerError::NotRunning`] or `Ok`); the
//! interrupt path may reach them in any phase.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::RunnerError;

/// A single introspection result row: column name to value.
pub type QueryRow = BTreeMap<String, String>;

/// Capability to run ad-hoc introspection queries against the live managed
/// subprocess.
///
/// Consumed by [`Session`](crate::Session) implementations, e.g. to gather
/// host identity details during enrollment. Bound exactly once per run, after
/// the runner starts and before enrollment.
#[async_trait]
pub trait Querier: Send + Sync + 'static {
    /// Executes `sql` against the managed instance and returns the result rows.
    async fn query(&self, sql: &str) -> Result<Vec<QueryRow>, RunnerError>;
}

/// Handle to the managed subprocess's supervisor.
///
/// Owned by the [`LifecycleActor`](crate::LifecycleActor); shared (non-owning,
/// via `Arc`) with the session for query execution only.
#[async_trait]
pub trait Runner: Querier {
    /// Launches the managed subprocess.
    async fn start(&self) -> Result<(), RunnerError>;

    /// Restarts the managed subprocess without touching enrollment state.
    async fn restart(&self) -> Result<(), RunnerError>;

    /// Stops the managed subprocess.
    ///
    /// Must be safe to call on a never-started or already-stopped runner.
    async fn shutdown(&self) -> Result<(), RunnerError>;
}
