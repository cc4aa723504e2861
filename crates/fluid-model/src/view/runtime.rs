use serde::{Deserialize, Serialize};

use crate::{EngineKind, Labels};

/// Runtime custom resource as seen by the resolver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeDescriptor {
    /// Runtime object name.
    pub name: String,
    /// Namespace the runtime lives in.
    pub namespace: String,
    /// Engine implementing this runtime.
    pub kind: EngineKind,
    /// Node selector applied to the fuse client (`spec.fuse.nodeSelector`).
    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub fuse_node_selector: Labels,
}

impl RuntimeDescriptor {
    pub fn new(kind: EngineKind, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            kind,
            fuse_node_selector: Labels::default(),
        }
    }

    /// Replace the fuse node selector.
    pub fn with_fuse_node_selector(mut self, selector: Labels) -> Self {
        self.fuse_node_selector = selector;
        self
    }
}
