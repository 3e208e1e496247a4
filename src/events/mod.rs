//! Runtime events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to lifecycle events emitted by the actor, the batch-size
//! policy, and the runner control handle.
//!
//! ## Contents
//! - [`EventKind`], [`Event`], [`Severity`] — event classification and payload
//! - [`Bus`] — thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `LifecycleActor`, `RunnerControl`,
//!   `max_bytes_per_batch` (advisory).
//! - **Consumers**: [`attach`](crate::attach) forwards events to user
//!   subscribers (the logger sink contract).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind, Severity};
