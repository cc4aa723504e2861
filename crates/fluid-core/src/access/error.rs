use std::fmt;

use thiserror::Error;

/// Kind of cluster object a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Runtime,
    DaemonSet,
    Dataset,
}

impl Resource {
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            Resource::Runtime => "runtime",
            Resource::DaemonSet => "daemonset",
            Resource::Dataset => "dataset",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

#[derive(Debug, Error)]
pub enum AccessError {
    #[error("{resource} lookup failed: {message}")]
    Backend { resource: Resource, message: String },

    #[error("malformed {resource} {namespace}/{name}: {reason}")]
    Malformed {
        resource: Resource,
        name: String,
        namespace: String,
        reason: String,
    },

    #[error("cluster connection failed: {0}")]
    Connect(String),
}

impl AccessError {
    pub fn backend(resource: Resource, message: impl Into<String>) -> Self {
        AccessError::Backend {
            resource,
            message: message.into(),
        }
    }

    /// Resource the failed lookup targeted, if the failure came from a lookup.
    pub fn resource(&self) -> Option<Resource> {
        match self {
            AccessError::Backend { resource, .. } | AccessError::Malformed { resource, .. } => {
                Some(*resource)
            }
            AccessError::Connect(_) => None,
        }
    }
}
