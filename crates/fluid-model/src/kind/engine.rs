use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    codec,
    domain::WORKER_SUFFIX,
    error::{ModelError, ModelResult},
};

/// Cache-engine implementation backing a runtime.
///
/// The set is closed: every runtime custom resource served under
/// [`crate::API_GROUP`] maps to exactly one variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum EngineKind {
    Alluxio,
    Jindo,
    JuiceFs,
    GooseFs,
    Thin,
    Efc,
    Vineyard,
}

impl EngineKind {
    /// Every supported kind.
    pub const ALL: [EngineKind; 7] = [
        EngineKind::Alluxio,
        EngineKind::Jindo,
        EngineKind::JuiceFs,
        EngineKind::GooseFs,
        EngineKind::Thin,
        EngineKind::Efc,
        EngineKind::Vineyard,
    ];

    /// Short lowercase tag used in labels, metrics and config.
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineKind::Alluxio => "alluxio",
            EngineKind::Jindo => "jindo",
            EngineKind::JuiceFs => "juicefs",
            EngineKind::GooseFs => "goosefs",
            EngineKind::Thin => "thin",
            EngineKind::Efc => "efc",
            EngineKind::Vineyard => "vineyard",
        }
    }

    /// Kind of the runtime custom resource (e.g. `JindoRuntime`).
    pub fn resource_kind(&self) -> &'static str {
        match self {
            EngineKind::Alluxio => "AlluxioRuntime",
            EngineKind::Jindo => "JindoRuntime",
            EngineKind::JuiceFs => "JuiceFSRuntime",
            EngineKind::GooseFs => "GooseFSRuntime",
            EngineKind::Thin => "ThinRuntime",
            EngineKind::Efc => "EFCRuntime",
            EngineKind::Vineyard => "VineyardRuntime",
        }
    }

    /// Name of the worker DaemonSet generated for runtime `name`.
    pub fn worker_name(&self, name: &str) -> String {
        format!("{name}{WORKER_SUFFIX}")
    }

    /// Node-selector key pinning this kind's workers to nodes with capacity for
    /// the runtime `(namespace, name)`.
    ///
    /// All kinds currently share the generic storage key.
    pub fn worker_selector_key(&self, namespace: &str, name: &str) -> String {
        codec::storage_selector_key(namespace, name)
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = ModelError;

    /// Accepts the short tag or the resource kind, case-insensitively.
    fn from_str(s: &str) -> ModelResult<Self> {
        let norm = s.trim().to_ascii_lowercase();
        let tag = norm.strip_suffix("runtime").unwrap_or(&norm);

        EngineKind::ALL
            .into_iter()
            .find(|k| k.as_str() == tag)
            .ok_or_else(|| ModelError::UnknownEngineKind(s.to_string()))
    }
}

impl TryFrom<String> for EngineKind {
    type Error = ModelError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<EngineKind> for String {
    fn from(k: EngineKind) -> Self {
        k.as_str().to_string()
    }
}
