//! # Demo: minimal
//!
//! A full lifecycle against in-memory fakes: construct the runtime, execute,
//! restart the "subprocess" once mid-run, then interrupt on cancellation.
//!
//! ## Flow
//! ```text
//! Options ──► create_extension_runtime()
//!     ├─► attach(LogWriter)                 (events land on stdout)
//!     ├─► cancel_on_signal(token)           (Ctrl-C works too)
//!     ├─► spawn actor.execute()
//!     │     ├─► runner.start → set_querier → enroll → session.start
//!     │     └─► suspends on the token
//!     ├─► control.restart()                 (does not touch enrollment)
//!     ├─► token.cancel()                    (after a short demo delay)
//!     └─► actor.interrupt(None)             (session, then runner)
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example minimal --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use extvisor::{
    cancel_on_signal, create_extension_runtime, Bus, Enrollment, LogWriter, Options, Querier,
    QueryRow, Runner, RunnerError, Session, SessionError, SessionOptions, Subscribe,
};

/// Pretends to supervise a subprocess.
struct DemoRunner;

#[async_trait]
impl Querier for DemoRunner {
    async fn query(&self, sql: &str) -> Result<Vec<QueryRow>, RunnerError> {
        println!("[demo-runner] query: {sql}");
        Ok(Vec::new())
    }
}

#[async_trait]
impl Runner for DemoRunner {
    async fn start(&self) -> Result<(), RunnerError> {
        println!("[demo-runner] started");
        Ok(())
    }

    async fn restart(&self) -> Result<(), RunnerError> {
        println!("[demo-runner] restarted");
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), RunnerError> {
        println!("[demo-runner] shut down");
        Ok(())
    }
}

/// Pretends to talk to a management service.
struct DemoSession {
    opts: SessionOptions,
    querier: std::sync::OnceLock<Arc<dyn Querier>>,
}

#[async_trait]
impl Session for DemoSession {
    fn set_querier(&self, querier: Arc<dyn Querier>) {
        let _ = self.querier.set(querier);
    }

    async fn enroll(&self, _ctx: &CancellationToken) -> Result<Enrollment, SessionError> {
        // A real session would run identity queries through the querier here.
        if let Some(querier) = self.querier.get() {
            let _ = querier.query("select uuid from system_info").await;
        }
        println!(
            "[demo-session] enrolled (batch cap {} bytes)",
            self.opts.max_bytes_per_batch
        );
        Ok(Enrollment {
            node_key: "demo-node".into(),
            invalid: false,
        })
    }

    async fn start(&self) {
        println!("[demo-session] background work started");
    }

    async fn shutdown(&self) -> Result<(), SessionError> {
        println!("[demo-session] shut down");
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let opts = Options {
        enroll_secret: "demo-secret".into(),
        transport: "grpc".into(),
        log_max_bytes_per_batch: 10, // above the grpc recommendation: advisory fires
        ..Options::default()
    };

    let bus = Bus::default();
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter)];
    let _log_task = extvisor::attach(&bus, subs);

    let token = CancellationToken::new();
    let (actor, control) = create_extension_runtime(
        &opts,
        |session_opts| {
            Ok(DemoSession {
                opts: session_opts,
                querier: std::sync::OnceLock::new(),
            })
        },
        Arc::new(DemoRunner),
        bus,
        token.clone(),
    )?;

    let _signal_task = cancel_on_signal(token.clone());

    let actor = Arc::new(actor);
    let exec = tokio::spawn({
        let actor = actor.clone();
        async move { actor.execute().await }
    });

    // Let the run settle, then exercise the control handle.
    tokio::time::sleep(Duration::from_millis(200)).await;
    control.restart().await?;

    // End the demo after a moment (or press Ctrl-C earlier).
    tokio::select! {
        _ = tokio::time::sleep(Duration::from_secs(2)) => token.cancel(),
        _ = token.cancelled() => {}
    }

    actor.interrupt(None).await;
    exec.await??;
    Ok(())
}
