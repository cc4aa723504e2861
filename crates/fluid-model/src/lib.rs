mod domain;
pub use domain::{API_GROUP, API_VERSION, LABEL_NAME_MAX_LEN, Labels, WORKER_SUFFIX};

mod error;
pub use error::{ModelError, ModelResult};

mod kind;
pub use kind::EngineKind;

pub mod codec;
pub use codec::CapacityMedium;

mod view;
pub use view::{DaemonSetView, DatasetRef, RuntimeDescriptor};

mod info;
pub use info::RuntimeInfo;
