//! Runtime core: lifecycle orchestration.
//!
//! This module contains the embedded implementation of the extvisor runtime.
//! The public API is the construction entry point
//! [`create_extension_runtime`] plus the objects it returns:
//! [`LifecycleActor`] and [`RunnerControl`].
//!
//! Internal modules:
//! - [`secret`]: resolves the enrollment credential from an inline value or a file;
//! - [`batch`]: derives the transport-aware per-batch byte cap;
//! - [`actor`]: the execute/interrupt state machine;
//! - [`runtime`]: construction wiring and the runner control handle;
//! - [`shutdown`]: cross-platform shutdown signal handling for hosts.

mod actor;
mod batch;
mod runtime;
mod secret;
mod shutdown;

#[cfg(test)]
pub(crate) mod testutil;

pub use actor::{LifecycleActor, LifecyclePhase};
pub use batch::max_bytes_per_batch;
pub use runtime::{create_extension_runtime, RunnerControl};
pub use secret::resolve_enroll_secret;
pub use shutdown::cancel_on_signal;
