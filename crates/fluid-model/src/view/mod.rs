//! Read-only views of the cluster objects the resolver consumes.
//!
//! Views carry only the fields resolution needs; accessors build them from whatever
//! representation their backend returns.
mod runtime;
pub use runtime::RuntimeDescriptor;

mod daemonset;
pub use daemonset::DaemonSetView;

mod dataset;
pub use dataset::DatasetRef;
