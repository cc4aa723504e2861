pub mod access;
pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;

pub use access::{
    AccessError, ClusterReader, ClusterSnapshot, MemoryCluster, ReaderHandle, Resource,
};
pub use builder::RuntimeInfoBuilder;
pub use config::ResolveConfig;
pub use engine::Engine;
pub use error::CoreError;
pub use metrics::{BuildOutcome, LookupOutcome, MetricsBackend, MetricsHandle, NoOpMetrics};

pub mod prelude {
    pub use crate::access::{AccessError, ClusterReader, MemoryCluster};
    pub use crate::builder::RuntimeInfoBuilder;
    pub use crate::config::ResolveConfig;
    pub use crate::engine::Engine;
    pub use crate::error::CoreError;
}
