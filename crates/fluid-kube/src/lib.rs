//! Kubernetes-backed [`fluid_core::ClusterReader`].
//!
//! Runtime and Dataset custom resources are read as dynamic objects, the worker DaemonSet
//! as the typed `apps/v1` resource. A missing object is `Ok(None)`; any other API error
//! is a backend error.
mod convert;
pub use convert::{daemonset_view, dataset_ref, runtime_descriptor};

mod reader;
pub use reader::KubeCluster;
