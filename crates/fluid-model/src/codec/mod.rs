//! Label codec: derives node-selector and capacity label keys from a runtime identity.
//!
//! Every key has the shape `{domain}/{prefix}{namespace}_{name}`.
//! Keys are one-directional; nothing here parses a key back into an identity.
//!
//! The name segment (after `/`) is kept within [`LABEL_NAME_MAX_LEN`] characters.
//! Longer segments are cut and suffixed with `__{sha256 hex prefix}` of the identity.
//! A plain segment holds exactly one `_`, a shortened one at least two, so no shortened
//! key can equal the plain key of another identity.
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    EngineKind,
    domain::{
        CAPACITY_LABEL_PREFIX, COMMON_LABEL_DOMAIN, COMMON_LABEL_PREFIX, FUSE_LABEL_PREFIX,
        HASH_MARKER, HASH_SUFFIX_LEN, IDENTITY_SEPARATOR, LABEL_NAME_MAX_LEN,
        LEGACY_IDENTITY_SEPARATOR, STORAGE_LABEL_DOMAIN, STORAGE_LABEL_PREFIX,
    },
};

/// Storage medium a capacity label accounts for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CapacityMedium {
    Memory,
    Disk,
    Total,
}

impl CapacityMedium {
    /// Single-letter code embedded in the label key.
    pub fn code(&self) -> &'static str {
        match self {
            CapacityMedium::Memory => "m",
            CapacityMedium::Disk => "d",
            CapacityMedium::Total => "t",
        }
    }
}

impl fmt::Display for CapacityMedium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CapacityMedium::Memory => "memory",
            CapacityMedium::Disk => "disk",
            CapacityMedium::Total => "total",
        })
    }
}

/// Node-selector key marking nodes that hold cache storage for `(namespace, name)`.
///
/// Format: `data.fluid.io/storage-{namespace}_{name}`.
pub fn storage_selector_key(namespace: &str, name: &str) -> String {
    label_key(STORAGE_LABEL_DOMAIN, STORAGE_LABEL_PREFIX, namespace, name)
}

/// Storage selector key written by older releases: `data.fluid.io/storage-{namespace}-{name}`.
///
/// Only used to recognise workers that still select on it; never shortened.
pub fn legacy_storage_selector_key(namespace: &str, name: &str) -> String {
    format!(
        "{STORAGE_LABEL_DOMAIN}/{STORAGE_LABEL_PREFIX}{namespace}{LEGACY_IDENTITY_SEPARATOR}{name}"
    )
}

/// Label set on every node serving the runtime, whatever the medium.
///
/// Format: `fluid.io/s-{namespace}_{name}`.
pub fn common_label_key(namespace: &str, name: &str) -> String {
    label_key(COMMON_LABEL_DOMAIN, COMMON_LABEL_PREFIX, namespace, name)
}

/// Capacity label for one medium.
///
/// Format: `fluid.io/s-h-{kind}-{medium}-{namespace}_{name}`.
pub fn capacity_label_key(
    kind: EngineKind,
    medium: CapacityMedium,
    namespace: &str,
    name: &str,
) -> String {
    let prefix = format!(
        "{CAPACITY_LABEL_PREFIX}{kind}-{code}-",
        kind = kind.as_str(),
        code = medium.code()
    );
    label_key(COMMON_LABEL_DOMAIN, &prefix, namespace, name)
}

/// Label marking nodes where the runtime's fuse client runs.
///
/// Format: `fluid.io/f-{namespace}_{name}`.
pub fn fuse_label_key(namespace: &str, name: &str) -> String {
    label_key(COMMON_LABEL_DOMAIN, FUSE_LABEL_PREFIX, namespace, name)
}

fn label_key(domain: &str, prefix: &str, namespace: &str, name: &str) -> String {
    let identity = format!("{namespace}{IDENTITY_SEPARATOR}{name}");
    let segment = format!("{prefix}{identity}");
    if segment.chars().count() <= LABEL_NAME_MAX_LEN {
        return format!("{domain}/{segment}");
    }
    format!("{domain}/{}", shorten(&segment, &identity))
}

/// Cut `segment` so that `{cut}__{digest}` fits the label name limit.
fn shorten(segment: &str, identity: &str) -> String {
    let keep = LABEL_NAME_MAX_LEN - HASH_SUFFIX_LEN - HASH_MARKER.len();
    let cut: String = segment.chars().take(keep).collect();
    // label names must end with an alphanumeric char before the suffix separator
    let cut = cut.trim_end_matches(|c: char| !c.is_ascii_alphanumeric());

    format!("{cut}{HASH_MARKER}{}", digest_prefix(identity))
}

fn digest_prefix(identity: &str) -> String {
    let mut hex: String = Sha256::digest(identity.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect();
    hex.truncate(HASH_SUFFIX_LEN);
    hex
}
