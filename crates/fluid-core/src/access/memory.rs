use std::{
    collections::HashMap,
    sync::{
        PoisonError, RwLock,
        atomic::{AtomicU64, Ordering},
    },
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::trace;

use fluid_model::{DaemonSetView, DatasetRef, EngineKind, RuntimeDescriptor};

use crate::access::{AccessError, ClusterReader, Resource};

type ObjectKey = (String, String);

/// Serializable dump of cluster state, used to seed a [`MemoryCluster`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterSnapshot {
    pub runtimes: Vec<RuntimeDescriptor>,
    pub daemonsets: Vec<DaemonSetView>,
    pub datasets: Vec<DatasetRef>,
}

#[derive(Default)]
struct Objects {
    runtimes: HashMap<(EngineKind, String, String), RuntimeDescriptor>,
    daemonsets: HashMap<ObjectKey, DaemonSetView>,
    datasets: HashMap<ObjectKey, DatasetRef>,
    failures: HashMap<Resource, String>,
}

/// In-memory cluster store.
///
/// Objects can be added or removed while readers hold the store, lookups are counted per
/// resource, and backend failures can be injected per resource.
#[derive(Default)]
pub struct MemoryCluster {
    objects: RwLock<Objects>,
    runtime_lookups: AtomicU64,
    daemonset_lookups: AtomicU64,
    dataset_lookups: AtomicU64,
}

fn key(namespace: &str, name: &str) -> ObjectKey {
    (namespace.to_string(), name.to_string())
}

impl MemoryCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store holding every object of `snapshot`.
    pub fn from_snapshot(snapshot: ClusterSnapshot) -> Self {
        let cluster = Self::new();
        for rt in snapshot.runtimes {
            cluster.insert_runtime(rt);
        }
        for ds in snapshot.daemonsets {
            cluster.insert_daemonset(ds);
        }
        for dataset in snapshot.datasets {
            cluster.insert_dataset(dataset);
        }
        cluster
    }

    pub fn insert_runtime(&self, runtime: RuntimeDescriptor) {
        let k = (runtime.kind, runtime.namespace.clone(), runtime.name.clone());
        self.write().runtimes.insert(k, runtime);
    }

    pub fn remove_runtime(&self, kind: EngineKind, name: &str, namespace: &str) {
        let k = (kind, namespace.to_string(), name.to_string());
        self.write().runtimes.remove(&k);
    }

    pub fn insert_daemonset(&self, ds: DaemonSetView) {
        let k = key(&ds.namespace, &ds.name);
        self.write().daemonsets.insert(k, ds);
    }

    pub fn insert_dataset(&self, dataset: DatasetRef) {
        let k = key(&dataset.namespace, &dataset.name);
        self.write().datasets.insert(k, dataset);
    }

    pub fn remove_dataset(&self, name: &str, namespace: &str) {
        self.write().datasets.remove(&key(namespace, name));
    }

    /// Make every lookup of `resource` fail with `message` until [`Self::heal`].
    pub fn fail(&self, resource: Resource, message: impl Into<String>) {
        self.write().failures.insert(resource, message.into());
    }

    pub fn heal(&self, resource: Resource) {
        self.write().failures.remove(&resource);
    }

    /// Number of lookups served (or failed) for `resource`.
    pub fn lookups(&self, resource: Resource) -> u64 {
        self.counter(resource).load(Ordering::Relaxed)
    }

    pub fn total_lookups(&self) -> u64 {
        [Resource::Runtime, Resource::DaemonSet, Resource::Dataset]
            .into_iter()
            .map(|r| self.lookups(r))
            .sum()
    }

    fn counter(&self, resource: Resource) -> &AtomicU64 {
        match resource {
            Resource::Runtime => &self.runtime_lookups,
            Resource::DaemonSet => &self.daemonset_lookups,
            Resource::Dataset => &self.dataset_lookups,
        }
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Objects> {
        self.objects.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Count the lookup, then run `f` unless a failure is injected for `resource`.
    fn lookup<T>(
        &self,
        resource: Resource,
        f: impl FnOnce(&Objects) -> Option<T>,
    ) -> Result<Option<T>, AccessError> {
        self.counter(resource).fetch_add(1, Ordering::Relaxed);

        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(message) = objects.failures.get(&resource) {
            return Err(AccessError::backend(resource, message.clone()));
        }
        Ok(f(&objects))
    }
}

#[async_trait]
impl ClusterReader for MemoryCluster {
    async fn get_runtime(
        &self,
        kind: EngineKind,
        name: &str,
        namespace: &str,
    ) -> Result<Option<RuntimeDescriptor>, AccessError> {
        trace!(%kind, name, namespace, "memory runtime lookup");
        let k = (kind, namespace.to_string(), name.to_string());
        self.lookup(Resource::Runtime, |o| o.runtimes.get(&k).cloned())
    }

    async fn get_daemonset(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Option<DaemonSetView>, AccessError> {
        let k = key(namespace, name);
        self.lookup(Resource::DaemonSet, |o| o.daemonsets.get(&k).cloned())
    }

    async fn get_dataset(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Option<DatasetRef>, AccessError> {
        let k = key(namespace, name);
        self.lookup(Resource::Dataset, |o| o.datasets.get(&k).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lookups_distinguish_found_and_absent() {
        let cluster = MemoryCluster::new();
        cluster.insert_runtime(RuntimeDescriptor::new(EngineKind::Jindo, "hbase", "fluid"));

        let found = cluster
            .get_runtime(EngineKind::Jindo, "hbase", "fluid")
            .await
            .unwrap();
        assert_eq!(found.map(|r| r.name), Some("hbase".to_string()));

        let other_ns = cluster
            .get_runtime(EngineKind::Jindo, "hbase", "default")
            .await
            .unwrap();
        assert!(other_ns.is_none());

        let other_kind = cluster
            .get_runtime(EngineKind::Alluxio, "hbase", "fluid")
            .await
            .unwrap();
        assert!(other_kind.is_none());

        assert_eq!(cluster.lookups(Resource::Runtime), 3);
        assert_eq!(cluster.total_lookups(), 3);
    }

    #[tokio::test]
    async fn injected_failure_is_an_error_not_absence() {
        let cluster = MemoryCluster::new();
        cluster.insert_dataset(DatasetRef::new("hadoop", "fluid"));
        cluster.fail(Resource::Dataset, "apiserver unreachable");

        let err = cluster.get_dataset("hadoop", "fluid").await.unwrap_err();
        assert!(matches!(
            err,
            AccessError::Backend {
                resource: Resource::Dataset,
                ..
            }
        ));
        assert_eq!(err.resource(), Some(Resource::Dataset));
        assert_eq!(cluster.lookups(Resource::Dataset), 1);

        cluster.heal(Resource::Dataset);
        let found = cluster.get_dataset("hadoop", "fluid").await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn remove_makes_objects_absent() {
        let cluster = MemoryCluster::new();
        cluster.insert_runtime(RuntimeDescriptor::new(EngineKind::Alluxio, "a", "ns"));
        cluster.insert_dataset(DatasetRef::new("a", "ns"));

        cluster.remove_runtime(EngineKind::Alluxio, "a", "ns");
        cluster.remove_dataset("a", "ns");

        assert!(
            cluster
                .get_runtime(EngineKind::Alluxio, "a", "ns")
                .await
                .unwrap()
                .is_none()
        );
        assert!(cluster.get_dataset("a", "ns").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn snapshot_loads_from_json() {
        let json = r#"{
            "runtimes": [{"name": "hbase", "namespace": "fluid", "kind": "jindo"}],
            "daemonsets": [{
                "name": "hbase-worker",
                "namespace": "fluid",
                "nodeSelector": {"data.fluid.io/storage-fluid_hbase": "selector"}
            }]
        }"#;
        let snapshot: ClusterSnapshot = serde_json::from_str(json).unwrap();
        let cluster = MemoryCluster::from_snapshot(snapshot);

        let ds = cluster
            .get_daemonset("hbase-worker", "fluid")
            .await
            .unwrap()
            .expect("daemonset loaded");
        assert!(ds.selects_on("data.fluid.io/storage-fluid_hbase"));
        assert!(cluster.get_dataset("hbase", "fluid").await.unwrap().is_none());
    }
}
