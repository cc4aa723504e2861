//! Prometheus metrics backend for runtime info resolution.
//!
//! This crate provides a [`PrometheusMetrics`] implementation of [`fluid_core::MetricsBackend`].
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use fluid_core::{MemoryCluster, RuntimeInfoBuilder};
//! use fluid_prometheus::PrometheusMetrics;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let metrics = PrometheusMetrics::new()?;
//! let builder = RuntimeInfoBuilder::new(Arc::new(MemoryCluster::new()))
//!     .with_metrics(Arc::new(metrics.clone()));
//!
//! // Expose with your HTTP framework of choice:
//! // let encoder = prometheus::TextEncoder::new();
//! // encoder.encode(&metrics.gather(), &mut buffer)?;
//! # let _ = builder;
//! # Ok(())
//! # }
//! ```
//!
//! ## Metrics
//! - `fluid_runtime_info_cache_hits_total{engine}` - Counter
//! - `fluid_runtime_info_builds_total{engine, outcome}` - Counter
//! - `fluid_runtime_info_build_duration_seconds{engine}` - Histogram
//! - `fluid_cluster_lookups_total{resource, outcome}` - Counter
mod backend;
pub use backend::PrometheusMetrics;

pub use prometheus::{Encoder, Registry, TextEncoder};
