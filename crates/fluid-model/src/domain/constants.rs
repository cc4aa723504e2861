//! Well-known strings shared by the model layer.
//!
//! Label formats live here so that every component deriving a key agrees on it.

/// API group of every runtime and dataset custom resource.
pub const API_GROUP: &str = "data.fluid.io";

/// API version served for runtime and dataset custom resources.
pub const API_VERSION: &str = "v1alpha1";

/// Suffix appended to a runtime name to get its worker DaemonSet name.
pub const WORKER_SUFFIX: &str = "-worker";

/// Maximum length of the name segment of a label key (the part after `/`).
pub const LABEL_NAME_MAX_LEN: usize = 63;

/// Joins namespace and name inside a label key.
///
/// `_` is not allowed in namespaces or object names, so `{namespace}_{name}` never
/// collides for distinct pairs.
pub(crate) const IDENTITY_SEPARATOR: char = '_';

/// Joins namespace and name in the storage key of older releases.
pub(crate) const LEGACY_IDENTITY_SEPARATOR: char = '-';

/// Separates a cut label name from its digest.
///
/// Plain names hold a single `_`, so a double one only appears in shortened names.
pub(crate) const HASH_MARKER: &str = "__";

/// Number of hex digest chars appended when a label name must be shortened.
pub(crate) const HASH_SUFFIX_LEN: usize = 10;

pub(crate) const STORAGE_LABEL_DOMAIN: &str = "data.fluid.io";
pub(crate) const STORAGE_LABEL_PREFIX: &str = "storage-";

pub(crate) const COMMON_LABEL_DOMAIN: &str = "fluid.io";
pub(crate) const COMMON_LABEL_PREFIX: &str = "s-";
pub(crate) const CAPACITY_LABEL_PREFIX: &str = "s-h-";
pub(crate) const FUSE_LABEL_PREFIX: &str = "f-";
