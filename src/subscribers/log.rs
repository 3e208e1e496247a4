//! # Simple logging subscriber for debugging and demos.
//!
//! [`LogWriter`] prints events to stdout as key/value lines at the severity
//! each event kind carries.
//!
//! ## Output format
//! ```text
//! [info] event=batch_size_advisory configured_mb=10 limit_bytes=10485760
//! [debug] event=runner_starting
//! [info] event=extension_started
//! [info] event=interrupted reason="enrollment lost"
//! [info] event=runner_shutdown_failed reason="shutdown failed: hung"
//! ```
//!
//! Enabled via the `logging` feature. Not intended for production use —
//! implement a custom [`Subscribe`] for real structured logging or metrics.

use async_trait::async_trait;

use crate::events::Event;
use crate::subscribers::Subscribe;

/// Simple stdout logging subscriber.
pub struct LogWriter;

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let mut line = format!(
            "[{}] event={}",
            e.kind.severity().as_label(),
            e.kind.as_label()
        );
        if let Some(reason) = &e.reason {
            line.push_str(&format!(" reason={reason:?}"));
        }
        if let Some(mb) = e.configured_mb {
            line.push_str(&format!(" configured_mb={mb}"));
        }
        if let Some(bytes) = e.limit_bytes {
            line.push_str(&format!(" limit_bytes={bytes}"));
        }
        println!("{line}");
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
