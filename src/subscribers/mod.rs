//! # Event subscribers: the logger-sink side of the runtime.
//!
//! This module provides the [`Subscribe`] trait, the [`attach`] helper that
//! drains the [`Bus`](crate::events::Bus) into a set of subscribers, and (with
//! the `logging` feature) a built-in [`LogWriter`].
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   LifecycleActor ── publish(Event) ──► Bus ──► attach() listener task
//!   RunnerControl  ──┘                              │
//!   batch policy   ──┘                              ├──► sub1.on_event(&Event)
//!                                                   ├──► sub2.on_event(&Event)
//!                                                   └──► subN.on_event(&Event)
//! ```
//!
//! Publishing never waits on subscribers: the bus send is non-blocking and the
//! listener runs on its own task. A subscriber that lags behind the bus
//! capacity skips the oldest events and keeps going.

mod subscriber;

#[cfg(feature = "logging")]
mod log;

pub use subscriber::Subscribe;

#[cfg(feature = "logging")]
pub use log::LogWriter;

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

use crate::events::Bus;

/// Spawns a listener task that forwards bus events to `subs` in order.
///
/// Subscribers are invoked sequentially per event; a slow subscriber delays
/// the ones after it for that event, but never the publishers. The task ends
/// when the bus (all senders) is dropped.
///
/// Returns the listener's [`JoinHandle`]; dropping it detaches the task.
pub fn attach(bus: &Bus, subs: Vec<Arc<dyn Subscribe>>) -> JoinHandle<()> {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => {
                    for sub in &subs {
                        sub.on_event(&ev).await;
                    }
                }
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, EventKind};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct Collector {
        seen: Mutex<Vec<EventKind>>,
    }

    #[async_trait]
    impl Subscribe for Collector {
        async fn on_event(&self, event: &Event) {
            self.seen.lock().unwrap().push(event.kind);
        }

        fn name(&self) -> &'static str {
            "collector"
        }
    }

    #[tokio::test]
    async fn listener_forwards_events_in_order() {
        let bus = Bus::new(16);
        let collector = Arc::new(Collector {
            seen: Mutex::new(Vec::new()),
        });
        let subs: Vec<Arc<dyn Subscribe>> = vec![collector.clone()];
        let handle = attach(&bus, subs);

        bus.publish(Event::now(EventKind::RunnerStarting));
        bus.publish(Event::now(EventKind::ExtensionStarted));
        drop(bus);
        handle.await.unwrap();

        assert_eq!(
            *collector.seen.lock().unwrap(),
            vec![EventKind::RunnerStarting, EventKind::ExtensionStarted]
        );
    }
}
