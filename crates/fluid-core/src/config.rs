use serde::{Deserialize, Serialize};

/// Resolution settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Also read the worker DaemonSet and warn when its node selector does not
    /// carry the derived key. Never changes the resolved value.
    pub verify_worker_selector: bool,
}

impl ResolveConfig {
    pub fn with_verify_worker_selector(mut self, enabled: bool) -> Self {
        self.verify_worker_selector = enabled;
        self
    }
}
