use serde::Serialize;

use crate::{
    CapacityMedium, DatasetRef, EngineKind, Labels,
    codec::{capacity_label_key, common_label_key, fuse_label_key, legacy_storage_selector_key},
};

/// Resolved runtime metadata for one engine instance.
///
/// Fields are private and there are no setters: once shared, a value never changes.
/// A fresh resolution produces a fresh value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeInfo {
    name: String,
    namespace: String,
    engine_kind: EngineKind,
    worker_node_selector_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bound_dataset: Option<DatasetRef>,
    #[serde(skip_serializing_if = "Labels::is_empty")]
    fuse_node_selector: Labels,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    deprecated_node_label: bool,
}

impl RuntimeInfo {
    /// Build runtime info from identity alone.
    ///
    /// The worker selector key is derived here through [`EngineKind::worker_selector_key`].
    pub fn new(kind: EngineKind, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        let name = name.into();
        let namespace = namespace.into();
        let worker_node_selector_key = kind.worker_selector_key(&namespace, &name);

        Self {
            name,
            namespace,
            engine_kind: kind,
            worker_node_selector_key,
            bound_dataset: None,
            fuse_node_selector: Labels::default(),
            deprecated_node_label: false,
        }
    }

    pub fn with_bound_dataset(mut self, dataset: Option<DatasetRef>) -> Self {
        self.bound_dataset = dataset;
        self
    }

    pub fn with_fuse_node_selector(mut self, selector: Labels) -> Self {
        self.fuse_node_selector = selector;
        self
    }

    pub fn with_deprecated_node_label(mut self, deprecated: bool) -> Self {
        self.deprecated_node_label = deprecated;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn engine_kind(&self) -> EngineKind {
        self.engine_kind
    }

    /// Node-selector key pinning cache workers to nodes with capacity for this runtime.
    pub fn worker_node_selector_key(&self) -> &str {
        &self.worker_node_selector_key
    }

    /// Dataset currently bound to this runtime, if any.
    pub fn bound_dataset(&self) -> Option<&DatasetRef> {
        self.bound_dataset.as_ref()
    }

    pub fn fuse_node_selector(&self) -> &Labels {
        &self.fuse_node_selector
    }

    /// Whether the worker DaemonSet was found selecting on the legacy storage key.
    pub fn deprecated_node_label(&self) -> bool {
        self.deprecated_node_label
    }

    /// Storage key older releases used for this runtime.
    pub fn legacy_node_selector_key(&self) -> String {
        legacy_storage_selector_key(&self.namespace, &self.name)
    }

    /// Name of the worker DaemonSet expected for this runtime.
    pub fn worker_name(&self) -> String {
        self.engine_kind.worker_name(&self.name)
    }

    pub fn common_label(&self) -> String {
        common_label_key(&self.namespace, &self.name)
    }

    pub fn capacity_label(&self, medium: CapacityMedium) -> String {
        capacity_label_key(self.engine_kind, medium, &self.namespace, &self.name)
    }

    pub fn fuse_label(&self) -> String {
        fuse_label_key(&self.namespace, &self.name)
    }
}
