use thiserror::Error;

use fluid_model::{EngineKind, ModelError};

use crate::access::AccessError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("runtime not found: {kind} {namespace}/{name}")]
    RuntimeNotFound {
        kind: EngineKind,
        name: String,
        namespace: String,
    },

    #[error("cluster access failed: {0}")]
    Access(#[from] AccessError),

    #[error("invalid engine: {0}")]
    Model(#[from] ModelError),
}

impl CoreError {
    /// Returns `true` if the runtime object itself is missing.
    ///
    /// Such failures clear up on their own once the runtime is created.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::RuntimeNotFound { .. })
    }
}
