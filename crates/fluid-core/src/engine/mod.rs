//! Per-engine runtime info cache.
//!
//! An [`Engine`] resolves its [`RuntimeInfo`] at most once. The slot moves from empty to
//! filled on the first successful build and never changes afterwards; failed builds leave
//! it empty so the next call retries.
use std::{fmt, sync::Arc};

use tokio::sync::OnceCell;
use tracing::{info, instrument, trace};

use fluid_model::{EngineKind, ModelError, RuntimeInfo};

use crate::{builder::RuntimeInfoBuilder, error::CoreError};

/// Controller-side handle on one deployed runtime.
pub struct Engine {
    kind: EngineKind,
    name: String,
    namespace: String,
    builder: RuntimeInfoBuilder,
    runtime_info: OnceCell<Arc<RuntimeInfo>>,
}

impl Engine {
    /// Create an engine with an empty runtime info slot.
    ///
    /// Fails if `name` or `namespace` is empty.
    pub fn new(
        kind: EngineKind,
        name: impl Into<String>,
        namespace: impl Into<String>,
        builder: RuntimeInfoBuilder,
    ) -> Result<Self, CoreError> {
        let name = name.into();
        let namespace = namespace.into();
        if name.is_empty() {
            return Err(ModelError::MissingField("name").into());
        }
        if namespace.is_empty() {
            return Err(ModelError::MissingField("namespace").into());
        }

        Ok(Self {
            kind,
            name,
            namespace,
            builder,
            runtime_info: OnceCell::new(),
        })
    }

    /// Fill the slot up front; later calls to [`Engine::runtime_info`] return `info` as is.
    pub fn with_runtime_info(mut self, info: RuntimeInfo) -> Self {
        self.runtime_info = OnceCell::from(Arc::new(info));
        self
    }

    pub fn kind(&self) -> EngineKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Cached runtime info, without resolving.
    pub fn cached(&self) -> Option<Arc<RuntimeInfo>> {
        self.runtime_info.get().cloned()
    }

    /// Return the runtime info, building it on first use.
    ///
    /// Once cached, calls do no cluster I/O. Concurrent callers on an empty slot share a
    /// single build. If the returned future is dropped mid-build the slot stays empty.
    #[instrument(
        level = "debug",
        skip(self),
        fields(kind = %self.kind, name = %self.name, namespace = %self.namespace)
    )]
    pub async fn runtime_info(&self) -> Result<Arc<RuntimeInfo>, CoreError> {
        if let Some(info) = self.runtime_info.get() {
            trace!("runtime info served from cache");
            self.builder.metrics().record_cache_hit(self.kind.as_str());
            return Ok(Arc::clone(info));
        }

        let info = self
            .runtime_info
            .get_or_try_init(|| async {
                let info = self
                    .builder
                    .build(self.kind, &self.name, &self.namespace)
                    .await?;
                info!(
                    selector = info.worker_node_selector_key(),
                    dataset = ?info.bound_dataset().map(|d| d.to_string()),
                    "runtime info resolved"
                );
                Ok::<_, CoreError>(Arc::new(info))
            })
            .await?;
        Ok(Arc::clone(info))
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("cached", &self.runtime_info.initialized())
            .finish()
    }
}
