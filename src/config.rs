//! # Static configuration consumed at construction time.
//!
//! [`Options`] is the read-only input the hosting process assembles (from CLI
//! flags, environment, or a config file — parsing is the host's concern) and
//! hands to [`create_extension_runtime`](crate::create_extension_runtime).
//!
//! ## Field semantics
//! - At most one of `enroll_secret` / `enroll_secret_path` is meaningfully
//!   used; the inline secret, if non-empty, always wins.
//! - `log_max_bytes_per_batch` is expressed in **megabytes**, `0` = unset
//!   (the transport-aware default applies, see
//!   [`max_bytes_per_batch`](crate::max_bytes_per_batch)).
//! - The subprocess-facing fields (`binary_path`, `root_directory`, `verbose`,
//!   `extra_flags`) are passed through to [`Runner`](crate::Runner)
//!   implementations; this crate never interprets them.

use std::path::PathBuf;
use std::time::Duration;

/// Static options for one extension runtime.
///
/// Consumed read-only by construction; nothing mutates an `Options` after the
/// runtime is created.
#[derive(Clone, Debug)]
pub struct Options {
    /// Inline enrollment secret. Takes precedence over `enroll_secret_path`
    /// and is used verbatim, without trimming.
    pub enroll_secret: String,

    /// Path to a file whose trimmed contents are the enrollment secret.
    ///
    /// Only consulted when `enroll_secret` is empty. An unreadable path is
    /// fatal to construction ([`SetupError::SecretRead`](crate::SetupError)).
    pub enroll_secret_path: Option<PathBuf>,

    /// Transport kind used to talk to the management service (e.g. `"grpc"`,
    /// `"jsonrpc"`). Feeds the batch-size policy.
    pub transport: String,

    /// Per-batch byte cap for shipped log records, in **megabytes**.
    ///
    /// `0` = unset; the policy picks a transport-aware default.
    pub log_max_bytes_per_batch: u64,

    /// Interval between log-shipping rounds performed by the session.
    pub logging_interval: Duration,

    /// Run differential queries immediately after start instead of waiting
    /// for the first interval.
    pub run_immediately: bool,

    /// Path to the managed subprocess binary.
    pub binary_path: PathBuf,

    /// Root working directory handed to the managed subprocess.
    pub root_directory: PathBuf,

    /// Run the managed subprocess with verbose logging.
    pub verbose: bool,

    /// Extra flags appended to the managed subprocess command line.
    pub extra_flags: Vec<String>,
}

impl Default for Options {
    /// Defaults mirror a typical managed deployment:
    ///
    /// - no secret configured (enrollment is anonymous or fails, per session
    ///   policy)
    /// - `transport = "grpc"`
    /// - `log_max_bytes_per_batch = 0` (transport-aware default applies)
    /// - `logging_interval = 60s`
    fn default() -> Self {
        Self {
            enroll_secret: String::new(),
            enroll_secret_path: None,
            transport: "grpc".to_string(),
            log_max_bytes_per_batch: 0,
            logging_interval: Duration::from_secs(60),
            run_immediately: false,
            binary_path: PathBuf::new(),
            root_directory: PathBuf::new(),
            verbose: false,
            extra_flags: Vec::new(),
        }
    }
}
