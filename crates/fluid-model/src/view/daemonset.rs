use serde::{Deserialize, Serialize};

use crate::Labels;

/// Worker DaemonSet reduced to its pod template node selector.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaemonSetView {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub node_selector: Labels,
}

impl DaemonSetView {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        node_selector: Labels,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            node_selector,
        }
    }

    /// Returns `true` if the pod template selects nodes on `key`.
    pub fn selects_on(&self, key: &str) -> bool {
        self.node_selector.contains_key(key)
    }
}
