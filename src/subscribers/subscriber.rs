//! # Event subscriber trait.
//!
//! [`Subscribe`] is the extension point for plugging custom event handlers
//! into the runtime: structured log shippers, metrics exporters, or test
//! collectors.
//!
//! ## Rules
//! - Handlers run on the listener task spawned by
//!   [`attach`](crate::attach), never in the publisher context.
//! - Events arrive in publish (`seq`) order.
//! - Handlers should use async I/O and avoid blocking the executor;
//!   publishers are never delayed either way, but sibling subscribers are.

use async_trait::async_trait;

use crate::events::Event;

/// Event subscriber for lifecycle observability.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Processes a single event.
    ///
    /// Called from the listener task, in publish order.
    async fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in logs.
    ///
    /// Prefer short, descriptive names (e.g., "metrics", "audit").
    /// The default uses `type_name::<Self>()`, which can be verbose —
    /// override it when possible.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
