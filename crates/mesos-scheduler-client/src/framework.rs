//! Registration descriptor (`FrameworkInfo`) assembled from config.

use std::collections::HashMap;

use mesos_scheduler_proto::framework_info::{capability, Capability};
use mesos_scheduler_proto::offer_filters::{MinAllocatableResources, ResourceQuantities};
use mesos_scheduler_proto::value::Scalar;
use mesos_scheduler_proto::{FrameworkId, FrameworkInfo, OfferFilters};

use crate::config::SchedulerConfig;

pub const SCALAR_CPU: &str = "cpus";
pub const SCALAR_GPU: &str = "gpus";
pub const SCALAR_MEM: &str = "mem";
pub const SCALAR_DISK: &str = "disk";
pub const RANGE_PORTS: &str = "ports";
/// Role key matching every role in `FrameworkInfo.offer_filters`.
pub const ROLE_ALL: &str = "*";

pub const DEFAULT_USER: &str = "root";
pub const DEFAULT_FRAMEWORK_NAME: &str = "mesos-scheduler-client";

/// Build the `FrameworkInfo` sent with `SUBSCRIBE`.
///
/// Minimum allocatable quantities become an offer filter for all roles,
/// added only when at least one quantity is set. GPU minimums are only
/// honoured together with the `GPU_RESOURCES` capability.
pub fn build_framework_info(config: &SchedulerConfig, framework_id: &FrameworkId) -> FrameworkInfo {
    let mut info = FrameworkInfo {
        id: Some(framework_id.clone()),
        user: non_blank(config.user.as_deref()).unwrap_or(DEFAULT_USER).to_string(),
        name: non_blank(config.name.as_deref())
            .unwrap_or(DEFAULT_FRAMEWORK_NAME)
            .to_string(),
        roles: config.roles.clone(),
        ..Default::default()
    };

    if config.failover_timeout > 0.0 {
        info.failover_timeout = Some(config.failover_timeout);
    }

    let mut minimums = Vec::new();
    push_quantity(&mut minimums, SCALAR_CPU, config.min_allocatable_cpu);
    push_quantity(&mut minimums, SCALAR_MEM, config.min_allocatable_mem);
    push_quantity(&mut minimums, SCALAR_DISK, config.min_allocatable_disk);

    if config.enable_gpu_resources {
        info.capabilities.push(Capability {
            r#type: Some(capability::Type::GpuResources as i32),
        });
        push_quantity(&mut minimums, SCALAR_GPU, config.min_allocatable_gpu);
    }

    if !minimums.is_empty() {
        info.offer_filters.insert(
            ROLE_ALL.to_string(),
            OfferFilters {
                min_allocatable_resources: Some(MinAllocatableResources {
                    quantities: minimums,
                }),
            },
        );
    }

    info
}

fn push_quantity(minimums: &mut Vec<ResourceQuantities>, name: &str, value: f64) {
    if value > 0.0 {
        minimums.push(ResourceQuantities {
            quantities: HashMap::from([(name.to_string(), Scalar { value })]),
        });
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
