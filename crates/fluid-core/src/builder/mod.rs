//! Assembles [`RuntimeInfo`] from cluster state.
//!
//! Resolution needs only the runtime object to exist. The worker selector key is derived
//! from identity, so a runtime whose DaemonSet has not been reconciled yet still resolves.
//! A missing Dataset is a valid state, not an error.
use std::{sync::Arc, time::Instant};

use tracing::{debug, info, instrument, warn};

use fluid_model::{EngineKind, RuntimeInfo};

use crate::{
    access::{AccessError, ClusterReader, Resource},
    config::ResolveConfig,
    error::CoreError,
    metrics::{BuildOutcome, LookupOutcome, MetricsHandle, noop_metrics},
};

/// Builds runtime info from an injected [`ClusterReader`].
///
/// The builder holds no per-runtime state and can be shared by many engines.
#[derive(Clone)]
pub struct RuntimeInfoBuilder {
    reader: Arc<dyn ClusterReader>,
    config: ResolveConfig,
    metrics: MetricsHandle,
}

impl RuntimeInfoBuilder {
    /// Create a builder with default config and no-op metrics.
    pub fn new(reader: Arc<dyn ClusterReader>) -> Self {
        Self {
            reader,
            config: ResolveConfig::default(),
            metrics: noop_metrics(),
        }
    }

    pub fn with_config(mut self, config: ResolveConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsHandle {
        &self.metrics
    }

    /// Resolve runtime info for the runtime `(kind, name, namespace)`.
    ///
    /// Steps:
    /// 1. Read the runtime object; absent → [`CoreError::RuntimeNotFound`].
    /// 2. Take the engine kind from the object and derive the worker selector key.
    /// 3. Optionally check the worker DaemonSet against that key and flag a legacy selector.
    /// 4. Read the Dataset of the same name; absent → no bound dataset.
    ///
    /// Lookup failures are returned as [`CoreError::Access`], never read as absence.
    #[instrument(level = "debug", skip(self, kind), fields(kind = %kind))]
    pub async fn build(
        &self,
        kind: EngineKind,
        name: &str,
        namespace: &str,
    ) -> Result<RuntimeInfo, CoreError> {
        let started = Instant::now();
        let res = self.resolve(kind, name, namespace).await;

        let elapsed = started.elapsed().as_millis() as u64;
        self.metrics
            .record_build(kind.as_str(), BuildOutcome::of(&res), elapsed);
        res
    }

    async fn resolve(
        &self,
        kind: EngineKind,
        name: &str,
        namespace: &str,
    ) -> Result<RuntimeInfo, CoreError> {
        let lookup = self.reader.get_runtime(kind, name, namespace).await;
        let descriptor =
            self.observe(Resource::Runtime, lookup)?
                .ok_or_else(|| CoreError::RuntimeNotFound {
                    kind,
                    name: name.to_string(),
                    namespace: namespace.to_string(),
                })?;

        if descriptor.kind != kind {
            debug!(found = %descriptor.kind, "runtime object reports a different engine kind");
        }
        let mut info = RuntimeInfo::new(descriptor.kind, name, namespace)
            .with_fuse_node_selector(descriptor.fuse_node_selector);

        if self.config.verify_worker_selector {
            let deprecated = self.verify_worker(&info).await?;
            info = info.with_deprecated_node_label(deprecated);
        }

        let lookup = self.reader.get_dataset(name, namespace).await;
        let dataset = self.observe(Resource::Dataset, lookup)?;
        match &dataset {
            Some(ds) => debug!(dataset = %ds, "dataset bound"),
            None => debug!("no dataset bound"),
        }

        Ok(info.with_bound_dataset(dataset))
    }

    /// Check the worker DaemonSet selector. Returns `true` if it selects on the legacy key.
    async fn verify_worker(&self, info: &RuntimeInfo) -> Result<bool, CoreError> {
        let worker = info.worker_name();
        let lookup = self.reader.get_daemonset(&worker, info.namespace()).await;

        let Some(ds) = self.observe(Resource::DaemonSet, lookup)? else {
            debug!(worker = %worker, "worker daemonset not reconciled yet");
            return Ok(false);
        };
        if ds.selects_on(info.worker_node_selector_key()) {
            debug!(worker = %worker, "worker daemonset selector matches");
            return Ok(false);
        }

        let legacy = info.legacy_node_selector_key();
        if ds.selects_on(&legacy) {
            info!(
                worker = %worker,
                label = %legacy,
                "worker daemonset uses deprecated storage label"
            );
            return Ok(true);
        }
        warn!(
            worker = %worker,
            expected = info.worker_node_selector_key(),
            found = ?ds.node_selector,
            "worker daemonset does not select on the runtime storage key"
        );
        Ok(false)
    }

    fn observe<T>(
        &self,
        resource: Resource,
        res: Result<Option<T>, AccessError>,
    ) -> Result<Option<T>, AccessError> {
        let outcome = match &res {
            Ok(Some(_)) => LookupOutcome::Found,
            Ok(None) => LookupOutcome::NotFound,
            Err(e) => {
                let failed = e.resource().unwrap_or(resource);
                warn!(resource = %failed, error = %e, "cluster lookup failed");
                LookupOutcome::Error
            }
        };
        self.metrics.record_lookup(resource.as_label(), outcome);
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::MemoryCluster;
    use fluid_model::{DaemonSetView, DatasetRef, Labels, RuntimeDescriptor};

    fn cluster() -> Arc<MemoryCluster> {
        let cluster = Arc::new(MemoryCluster::new());
        cluster.insert_runtime(RuntimeDescriptor::new(EngineKind::Jindo, "hbase", "fluid"));
        cluster
    }

    fn selector(key: &str) -> Labels {
        [(key, "selector")].into_iter().collect()
    }

    #[tokio::test]
    async fn builds_without_daemonset_or_dataset() {
        let cluster = cluster();
        let builder = RuntimeInfoBuilder::new(cluster.clone());

        let info = builder
            .build(EngineKind::Jindo, "hbase", "fluid")
            .await
            .expect("runtime exists");

        assert_eq!(info.name(), "hbase");
        assert_eq!(info.namespace(), "fluid");
        assert_eq!(info.engine_kind(), EngineKind::Jindo);
        assert_eq!(
            info.worker_node_selector_key(),
            "data.fluid.io/storage-fluid_hbase"
        );
        assert!(info.bound_dataset().is_none());
        assert_eq!(cluster.lookups(Resource::DaemonSet), 0);
    }

    #[tokio::test]
    async fn copies_fuse_selector_and_dataset() {
        let cluster = Arc::new(MemoryCluster::new());
        cluster.insert_runtime(
            RuntimeDescriptor::new(EngineKind::Alluxio, "hadoop", "fluid")
                .with_fuse_node_selector(selector("fuse-node")),
        );
        cluster.insert_dataset(DatasetRef::new("hadoop", "fluid").with_uid("uid-1"));

        let info = RuntimeInfoBuilder::new(cluster)
            .build(EngineKind::Alluxio, "hadoop", "fluid")
            .await
            .unwrap();

        assert_eq!(info.fuse_node_selector().get("fuse-node"), Some("selector"));
        let ds = info.bound_dataset().expect("dataset bound");
        assert_eq!(ds.name, "hadoop");
        assert_eq!(ds.uid.as_deref(), Some("uid-1"));
    }

    #[tokio::test]
    async fn missing_runtime_is_not_found() {
        let builder = RuntimeInfoBuilder::new(cluster());

        let err = builder
            .build(EngineKind::Jindo, "spark", "fluid")
            .await
            .unwrap_err();

        assert!(err.is_not_found(), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn runtime_backend_error_propagates() {
        let cluster = cluster();
        cluster.fail(Resource::Runtime, "connection refused");

        let err = RuntimeInfoBuilder::new(cluster.clone())
            .build(EngineKind::Jindo, "hbase", "fluid")
            .await
            .unwrap_err();

        match err {
            CoreError::Access(AccessError::Backend { resource, message }) => {
                assert_eq!(resource, Resource::Runtime);
                assert_eq!(message, "connection refused");
            }
            other => panic!("expected backend error, got {other:?}"),
        }
        assert_eq!(cluster.lookups(Resource::Dataset), 0);
    }

    #[tokio::test]
    async fn dataset_backend_error_is_not_absence() {
        let cluster = cluster();
        cluster.fail(Resource::Dataset, "timeout");

        let err = RuntimeInfoBuilder::new(cluster)
            .build(EngineKind::Jindo, "hbase", "fluid")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Access(AccessError::Backend {
                resource: Resource::Dataset,
                ..
            })
        ));
    }

    fn checking_builder(cluster: Arc<MemoryCluster>) -> RuntimeInfoBuilder {
        RuntimeInfoBuilder::new(cluster)
            .with_config(ResolveConfig::default().with_verify_worker_selector(true))
    }

    #[tokio::test]
    async fn worker_check_tolerates_missing_daemonset() {
        let cluster = cluster();
        let info = checking_builder(cluster.clone())
            .build(EngineKind::Jindo, "hbase", "fluid")
            .await
            .unwrap();

        assert!(!info.deprecated_node_label());
        assert_eq!(cluster.lookups(Resource::DaemonSet), 1);
    }

    #[tokio::test]
    async fn worker_on_legacy_key_is_flagged_deprecated() {
        let cluster = cluster();
        cluster.insert_daemonset(DaemonSetView::new(
            "hbase-worker",
            "fluid",
            selector("data.fluid.io/storage-fluid-hbase"),
        ));

        let info = checking_builder(cluster)
            .build(EngineKind::Jindo, "hbase", "fluid")
            .await
            .unwrap();

        assert!(info.deprecated_node_label());
        assert_eq!(
            info.worker_node_selector_key(),
            "data.fluid.io/storage-fluid_hbase"
        );
    }

    #[tokio::test]
    async fn worker_on_current_key_is_not_deprecated() {
        let cluster = cluster();
        cluster.insert_daemonset(DaemonSetView::new(
            "hbase-worker",
            "fluid",
            selector("data.fluid.io/storage-fluid_hbase"),
        ));

        let info = checking_builder(cluster)
            .build(EngineKind::Jindo, "hbase", "fluid")
            .await
            .unwrap();

        assert!(!info.deprecated_node_label());
    }

    #[tokio::test]
    async fn worker_on_foreign_selector_is_not_deprecated() {
        let cluster = cluster();
        cluster.insert_daemonset(DaemonSetView::new(
            "hbase-worker",
            "fluid",
            selector("data.fluid.io/storage-fluid-hadoop"),
        ));

        let info = checking_builder(cluster)
            .build(EngineKind::Jindo, "hbase", "fluid")
            .await
            .unwrap();

        assert!(!info.deprecated_node_label());
    }

    #[tokio::test]
    async fn legacy_worker_is_ignored_without_check() {
        let cluster = cluster();
        cluster.insert_daemonset(DaemonSetView::new(
            "hbase-worker",
            "fluid",
            selector("data.fluid.io/storage-fluid-hbase"),
        ));

        let info = RuntimeInfoBuilder::new(cluster.clone())
            .build(EngineKind::Jindo, "hbase", "fluid")
            .await
            .unwrap();

        assert!(!info.deprecated_node_label());
        assert_eq!(cluster.lookups(Resource::DaemonSet), 0);
    }

    #[tokio::test]
    async fn worker_check_propagates_backend_errors() {
        let cluster = cluster();
        cluster.fail(Resource::DaemonSet, "forbidden");

        let err = checking_builder(cluster)
            .build(EngineKind::Jindo, "hbase", "fluid")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CoreError::Access(AccessError::Backend {
                resource: Resource::DaemonSet,
                ..
            })
        ));
    }
}
