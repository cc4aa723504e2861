use serde::Serialize;

use fluid_model::{CapacityMedium, RuntimeInfo};

/// Printed result: the runtime info plus the label keys derived from it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    #[serde(flatten)]
    pub info: &'a RuntimeInfo,
    pub worker_name: String,
    pub labels: DerivedLabels,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedLabels {
    pub common: String,
    pub fuse: String,
    pub memory: String,
    pub disk: String,
    pub total: String,
}

impl<'a> Report<'a> {
    pub fn new(info: &'a RuntimeInfo) -> Self {
        Self {
            info,
            worker_name: info.worker_name(),
            labels: DerivedLabels {
                common: info.common_label(),
                fuse: info.fuse_label(),
                memory: info.capacity_label(CapacityMedium::Memory),
                disk: info.capacity_label(CapacityMedium::Disk),
                total: info.capacity_label(CapacityMedium::Total),
            },
        }
    }
}
