use std::sync::Arc;

use crate::error::CoreError;

/// Outcome of one runtime info build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// Runtime info assembled.
    Success,
    /// Runtime object does not exist.
    NotFound,
    /// Cluster lookup failed.
    BackendError,
}

impl BuildOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            BuildOutcome::Success => "success",
            BuildOutcome::NotFound => "not_found",
            BuildOutcome::BackendError => "backend_error",
        }
    }

    pub fn of<T>(res: &Result<T, CoreError>) -> Self {
        match res {
            Ok(_) => BuildOutcome::Success,
            Err(CoreError::RuntimeNotFound { .. }) => BuildOutcome::NotFound,
            Err(_) => BuildOutcome::BackendError,
        }
    }
}

/// Outcome of a single cluster lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Found,
    NotFound,
    Error,
}

impl LookupOutcome {
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            LookupOutcome::Found => "found",
            LookupOutcome::NotFound => "not_found",
            LookupOutcome::Error => "error",
        }
    }
}

/// Backend metrics collection interface.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record a resolution answered from the engine's cache slot.
    ///
    /// # Arguments
    /// - `engine`: engine kind tag
    fn record_cache_hit(&self, engine: &str);
    /// Record a finished build with outcome and duration.
    ///
    /// # Arguments
    /// - `engine`: engine kind tag
    /// - `outcome`: how the build ended
    /// - `duration_ms`: build time in milliseconds, lookups included
    fn record_build(&self, engine: &str, outcome: BuildOutcome, duration_ms: u64);
    /// Record one cluster lookup.
    ///
    /// # Arguments
    /// - `resource`: looked up resource (`runtime`, `daemonset`, `dataset`)
    /// - `outcome`: found, absent or failed
    fn record_lookup(&self, resource: &str, outcome: LookupOutcome);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
