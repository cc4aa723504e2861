mod labels;
pub use labels::Labels;

mod constants;
pub use constants::{API_GROUP, API_VERSION, LABEL_NAME_MAX_LEN, WORKER_SUFFIX};
pub(crate) use constants::{
    CAPACITY_LABEL_PREFIX, COMMON_LABEL_DOMAIN, COMMON_LABEL_PREFIX, FUSE_LABEL_PREFIX,
    HASH_MARKER, HASH_SUFFIX_LEN, IDENTITY_SEPARATOR, LEGACY_IDENTITY_SEPARATOR,
    STORAGE_LABEL_DOMAIN, STORAGE_LABEL_PREFIX,
};

