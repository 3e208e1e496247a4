//! # Transport-aware per-batch byte cap.
//!
//! Batch size is a tradeoff: too low and a large result can never be sent,
//! too high and a low-bandwidth connection may time out mid-batch. gRPC adds
//! a hard frame-size ceiling around 4MB, so its default leaves headroom at
//! 3MB; other transports default to 5MB.
//!
//! An explicit operator choice is never overridden: when the configured value
//! sits above the gRPC recommendation, the policy publishes a
//! [`BatchSizeAdvisory`](crate::EventKind::BatchSizeAdvisory) and proceeds
//! with the configured value regardless. The advisory threshold is 3,
//! compared in the same units as the configured input (megabytes, pre-shift).

use crate::events::{Bus, Event, EventKind};

/// Default cap for gRPC transports: headroom under the ~4MB frame limit.
pub const GRPC_DEFAULT_BYTES: usize = 3 << 20;

/// Default cap for all other transports.
pub const DEFAULT_BYTES: usize = 5 << 20;

/// Advisory threshold for gRPC, in megabytes.
pub const GRPC_ADVISORY_MB: u64 = 3;

/// Derives the per-batch byte cap from the configured value (MB, 0 = unset)
/// and the transport kind.
pub fn max_bytes_per_batch(configured_mb: u64, transport: &str, bus: &Bus) -> usize {
    if configured_mb != 0 {
        // Saturate rather than overflow on absurd operator values.
        let limit = usize::try_from(configured_mb)
            .unwrap_or(usize::MAX)
            .saturating_mul(1 << 20);
        if transport == "grpc" && configured_mb > GRPC_ADVISORY_MB {
            bus.publish(
                Event::now(EventKind::BatchSizeAdvisory)
                    .with_reason("configured batch cap is above the grpc recommended maximum of 3MB; expect mid-batch errors")
                    .with_configured_mb(configured_mb)
                    .with_limit_bytes(limit),
            );
        }
        limit
    } else if transport == "grpc" {
        GRPC_DEFAULT_BYTES
    } else {
        DEFAULT_BYTES
    }
}
