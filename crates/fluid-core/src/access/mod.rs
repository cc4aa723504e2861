//! Read-only access to the cluster objects runtime resolution depends on.
//!
//! Every lookup distinguishes three outcomes:
//! - `Ok(Some(view))`: the object exists;
//! - `Ok(None)`: the object does not exist, a normal answer callers interpret;
//! - `Err(AccessError)`: the store could not answer; never to be read as absence.
mod error;
pub use error::{AccessError, Resource};

mod memory;
pub use memory::{ClusterSnapshot, MemoryCluster};

use std::sync::Arc;

use async_trait::async_trait;
use fluid_model::{DaemonSetView, DatasetRef, EngineKind, RuntimeDescriptor};

/// Cluster object store lookups used by [`crate::RuntimeInfoBuilder`].
#[async_trait]
pub trait ClusterReader: Send + Sync {
    /// Fetch the runtime custom resource of `kind` named `name` in `namespace`.
    async fn get_runtime(
        &self,
        kind: EngineKind,
        name: &str,
        namespace: &str,
    ) -> Result<Option<RuntimeDescriptor>, AccessError>;

    /// Fetch a DaemonSet by name.
    async fn get_daemonset(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Option<DaemonSetView>, AccessError>;

    /// Fetch the Dataset named `name` in `namespace`.
    async fn get_dataset(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Option<DatasetRef>, AccessError>;
}

/// Shared handle to a cluster reader.
pub type ReaderHandle = Arc<dyn ClusterReader>;
