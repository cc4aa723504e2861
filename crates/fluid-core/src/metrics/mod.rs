//! Metrics abstraction for runtime info resolution.
//!
//! Backends (prometheus, statsd, etc) implement [`MetricsBackend`] and are injected into
//! [`crate::RuntimeInfoBuilder`]; the engine cache reports through the same handle.
mod backend;
pub use backend::{BuildOutcome, LookupOutcome, MetricsBackend, MetricsHandle};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
