use k8s_openapi::api::apps::v1::DaemonSet;
use kube::api::DynamicObject;
use serde_json::Value;

use fluid_core::{AccessError, Resource};
use fluid_model::{DaemonSetView, DatasetRef, EngineKind, Labels, RuntimeDescriptor};

/// Runtime descriptor from a runtime custom resource.
///
/// Reads `spec.fuse.nodeSelector` when present.
pub fn runtime_descriptor(
    kind: EngineKind,
    name: &str,
    namespace: &str,
    obj: &DynamicObject,
) -> Result<RuntimeDescriptor, AccessError> {
    let selector = match obj.data.pointer("/spec/fuse/nodeSelector") {
        None | Some(Value::Null) => Labels::default(),
        Some(value) => string_map(value).map_err(|reason| AccessError::Malformed {
            resource: Resource::Runtime,
            name: name.to_string(),
            namespace: namespace.to_string(),
            reason: format!("spec.fuse.nodeSelector: {reason}"),
        })?,
    };

    Ok(RuntimeDescriptor::new(kind, name, namespace).with_fuse_node_selector(selector))
}

/// Dataset reference from a Dataset custom resource, keeping its UID.
pub fn dataset_ref(name: &str, namespace: &str, obj: &DynamicObject) -> DatasetRef {
    let dataset = DatasetRef::new(name, namespace);
    match &obj.metadata.uid {
        Some(uid) => dataset.with_uid(uid.clone()),
        None => dataset,
    }
}

/// DaemonSet reduced to its pod template node selector.
pub fn daemonset_view(name: &str, namespace: &str, ds: DaemonSet) -> DaemonSetView {
    let node_selector = ds
        .spec
        .and_then(|spec| spec.template.spec)
        .and_then(|pod| pod.node_selector)
        .map(Labels::from)
        .unwrap_or_default();

    DaemonSetView::new(name, namespace, node_selector)
}

fn string_map(value: &Value) -> Result<Labels, String> {
    let Value::Object(map) = value else {
        return Err("expected an object".to_string());
    };

    map.iter()
        .map(|(k, v)| match v {
            Value::String(s) => Ok((k.clone(), s.clone())),
            other => Err(format!("value of {k:?} is not a string: {other}")),
        })
        .collect()
}
