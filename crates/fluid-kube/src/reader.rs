use async_trait::async_trait;
use k8s_openapi::api::apps::v1::DaemonSet;
use kube::{
    Api, Client,
    api::{ApiResource, DynamicObject, GroupVersionKind},
};
use tracing::{debug, instrument};

use fluid_core::{AccessError, ClusterReader, Resource};
use fluid_model::{API_GROUP, API_VERSION, DaemonSetView, DatasetRef, EngineKind, RuntimeDescriptor};

use crate::convert::{daemonset_view, dataset_ref, runtime_descriptor};

const DATASET_KIND: &str = "Dataset";

/// Cluster reader backed by the Kubernetes API.
#[derive(Clone)]
pub struct KubeCluster {
    client: Client,
}

impl KubeCluster {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect with the inferred config (in-cluster or kubeconfig).
    pub async fn try_default() -> Result<Self, AccessError> {
        let client = Client::try_default()
            .await
            .map_err(|e| AccessError::Connect(e.to_string()))?;
        Ok(Self::new(client))
    }

    fn dynamic(&self, namespace: &str, kind: &str) -> Api<DynamicObject> {
        let gvk = GroupVersionKind::gvk(API_GROUP, API_VERSION, kind);
        Api::namespaced_with(self.client.clone(), namespace, &ApiResource::from_gvk(&gvk))
    }
}

#[async_trait]
impl ClusterReader for KubeCluster {
    #[instrument(level = "debug", skip(self, kind), fields(kind = %kind))]
    async fn get_runtime(
        &self,
        kind: EngineKind,
        name: &str,
        namespace: &str,
    ) -> Result<Option<RuntimeDescriptor>, AccessError> {
        let api = self.dynamic(namespace, kind.resource_kind());
        let obj = api
            .get_opt(name)
            .await
            .map_err(|e| AccessError::backend(Resource::Runtime, e.to_string()))?;

        match obj {
            Some(obj) => runtime_descriptor(kind, name, namespace, &obj).map(Some),
            None => {
                debug!("runtime object not found");
                Ok(None)
            }
        }
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_daemonset(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Option<DaemonSetView>, AccessError> {
        let api: Api<DaemonSet> = Api::namespaced(self.client.clone(), namespace);
        let ds = api
            .get_opt(name)
            .await
            .map_err(|e| AccessError::backend(Resource::DaemonSet, e.to_string()))?;

        Ok(ds.map(|ds| daemonset_view(name, namespace, ds)))
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_dataset(
        &self,
        name: &str,
        namespace: &str,
    ) -> Result<Option<DatasetRef>, AccessError> {
        let api = self.dynamic(namespace, DATASET_KIND);
        let obj = api
            .get_opt(name)
            .await
            .map_err(|e| AccessError::backend(Resource::Dataset, e.to_string()))?;

        Ok(obj.map(|obj| dataset_ref(name, namespace, &obj)))
    }
}
