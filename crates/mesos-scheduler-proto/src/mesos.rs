//! `mesos.v1` messages used by the scheduler API.
//!
//! Field numbers mirror `include/mesos/v1/mesos.proto`. Only the subset the
//! scheduler client reads or writes is modelled; anything else on the wire is
//! skipped by the decoder as an unknown field.

use std::collections::HashMap;

// ── Identifiers ────────────────────────────────────────────────

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct FrameworkId {
    #[prost(string, required, tag = "1")]
    pub value: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct OfferId {
    #[prost(string, required, tag = "1")]
    pub value: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct AgentId {
    #[prost(string, required, tag = "1")]
    pub value: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct TaskId {
    #[prost(string, required, tag = "1")]
    pub value: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ExecutorId {
    #[prost(string, required, tag = "1")]
    pub value: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct OperationId {
    #[prost(string, required, tag = "1")]
    pub value: String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ResourceProviderId {
    #[prost(string, required, tag = "1")]
    pub value: String,
}

macro_rules! id_from_str {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl From<&str> for $ty {
                fn from(value: &str) -> Self {
                    Self { value: value.to_string() }
                }
            }

            impl From<String> for $ty {
                fn from(value: String) -> Self {
                    Self { value }
                }
            }

            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&self.value)
                }
            }
        )+
    };
}

id_from_str!(
    FrameworkId,
    OfferId,
    AgentId,
    TaskId,
    ExecutorId,
    OperationId,
    ResourceProviderId,
);

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Uuid {
    #[prost(bytes = "vec", required, tag = "1")]
    pub value: Vec<u8>,
}

// ── Values and resources ───────────────────────────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Value {
    #[prost(enumeration = "value::Type", required, tag = "1")]
    pub r#type: i32,
    #[prost(message, optional, tag = "2")]
    pub scalar: Option<value::Scalar>,
    #[prost(message, optional, tag = "3")]
    pub ranges: Option<value::Ranges>,
    #[prost(message, optional, tag = "4")]
    pub set: Option<value::Set>,
    #[prost(message, optional, tag = "5")]
    pub text: Option<value::Text>,
}

pub mod value {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
        Scalar = 0,
        Ranges = 1,
        Set = 2,
        Text = 3,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Scalar {
        #[prost(double, required, tag = "1")]
        pub value: f64,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Range {
        #[prost(uint64, required, tag = "1")]
        pub begin: u64,
        #[prost(uint64, required, tag = "2")]
        pub end: u64,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Ranges {
        #[prost(message, repeated, tag = "1")]
        pub range: Vec<Range>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Set {
        #[prost(string, repeated, tag = "1")]
        pub item: Vec<String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Text {
        #[prost(string, required, tag = "1")]
        pub value: String,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Resource {
    #[prost(string, required, tag = "1")]
    pub name: String,
    #[prost(enumeration = "value::Type", required, tag = "2")]
    pub r#type: i32,
    #[prost(message, optional, tag = "3")]
    pub scalar: Option<value::Scalar>,
    #[prost(message, optional, tag = "4")]
    pub ranges: Option<value::Ranges>,
    #[prost(message, optional, tag = "5")]
    pub set: Option<value::Set>,
    #[prost(string, optional, tag = "6")]
    pub role: Option<String>,
    #[prost(message, optional, tag = "12")]
    pub provider_id: Option<ResourceProviderId>,
}

impl Resource {
    /// A scalar resource such as `cpus` or `mem`.
    pub fn scalar(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            r#type: value::Type::Scalar as i32,
            scalar: Some(value::Scalar { value }),
            ..Default::default()
        }
    }
}

// ── Framework registration ─────────────────────────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FrameworkInfo {
    #[prost(string, required, tag = "1")]
    pub user: String,
    #[prost(string, required, tag = "2")]
    pub name: String,
    #[prost(message, optional, tag = "3")]
    pub id: Option<FrameworkId>,
    #[prost(double, optional, tag = "4")]
    pub failover_timeout: Option<f64>,
    #[prost(bool, optional, tag = "5")]
    pub checkpoint: Option<bool>,
    #[prost(string, optional, tag = "7")]
    pub hostname: Option<String>,
    #[prost(string, optional, tag = "8")]
    pub principal: Option<String>,
    #[prost(string, optional, tag = "9")]
    pub webui_url: Option<String>,
    #[prost(message, repeated, tag = "10")]
    pub capabilities: Vec<framework_info::Capability>,
    #[prost(string, repeated, tag = "12")]
    pub roles: Vec<String>,
    #[prost(map = "string, message", tag = "13")]
    pub offer_filters: HashMap<String, OfferFilters>,
}

pub mod framework_info {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Capability {
        #[prost(enumeration = "capability::Type", optional, tag = "1")]
        pub r#type: Option<i32>,
    }

    pub mod capability {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum Type {
            Unknown = 0,
            RevocableResources = 1,
            TaskKillingState = 2,
            GpuResources = 3,
            SharedResources = 4,
            PartitionAware = 5,
            MultiRole = 6,
            ReservationRefinement = 7,
            RegionAware = 8,
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OfferFilters {
    #[prost(message, optional, tag = "1")]
    pub min_allocatable_resources: Option<offer_filters::MinAllocatableResources>,
}

pub mod offer_filters {
    use std::collections::HashMap;

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ResourceQuantities {
        #[prost(map = "string, message", tag = "1")]
        pub quantities: HashMap<String, super::value::Scalar>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct MinAllocatableResources {
        #[prost(message, repeated, tag = "1")]
        pub quantities: Vec<ResourceQuantities>,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Filters {
    #[prost(double, optional, tag = "1")]
    pub refuse_seconds: Option<f64>,
}

// ── Masters ────────────────────────────────────────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Address {
    #[prost(string, optional, tag = "1")]
    pub hostname: Option<String>,
    #[prost(string, optional, tag = "2")]
    pub ip: Option<String>,
    #[prost(int32, required, tag = "3")]
    pub port: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MasterInfo {
    #[prost(string, required, tag = "1")]
    pub id: String,
    #[prost(uint32, required, tag = "2")]
    pub ip: u32,
    #[prost(uint32, required, tag = "3")]
    pub port: u32,
    #[prost(string, optional, tag = "4")]
    pub pid: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub hostname: Option<String>,
    #[prost(string, optional, tag = "6")]
    pub version: Option<String>,
    #[prost(message, optional, tag = "7")]
    pub address: Option<Address>,
}

// ── Offers and tasks ───────────────────────────────────────────

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Offer {
    #[prost(message, required, tag = "1")]
    pub id: OfferId,
    #[prost(message, required, tag = "2")]
    pub framework_id: FrameworkId,
    #[prost(message, required, tag = "3")]
    pub agent_id: AgentId,
    #[prost(string, required, tag = "4")]
    pub hostname: String,
    #[prost(message, repeated, tag = "5")]
    pub resources: Vec<Resource>,
    #[prost(message, repeated, tag = "6")]
    pub executor_ids: Vec<ExecutorId>,
}

pub mod offer {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Operation {
        #[prost(enumeration = "operation::Type", optional, tag = "1")]
        pub r#type: Option<i32>,
        #[prost(message, optional, tag = "2")]
        pub launch: Option<operation::Launch>,
        #[prost(message, optional, tag = "12")]
        pub id: Option<super::OperationId>,
    }

    pub mod operation {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
        #[repr(i32)]
        pub enum Type {
            Unknown = 0,
            Launch = 1,
            Reserve = 2,
            Unreserve = 3,
            Create = 4,
            Destroy = 5,
            LaunchGroup = 6,
            GrowVolume = 11,
            ShrinkVolume = 12,
            CreateDisk = 13,
            DestroyDisk = 14,
        }

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Launch {
            #[prost(message, repeated, tag = "1")]
            pub task_infos: Vec<super::super::TaskInfo>,
        }
    }

    impl Operation {
        /// A `LAUNCH` operation for the given tasks.
        pub fn launch(task_infos: Vec<super::TaskInfo>) -> Self {
            Self {
                r#type: Some(operation::Type::Launch as i32),
                launch: Some(operation::Launch { task_infos }),
                id: None,
            }
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CommandInfo {
    #[prost(string, optional, tag = "3")]
    pub value: Option<String>,
    #[prost(string, optional, tag = "5")]
    pub user: Option<String>,
    #[prost(bool, optional, tag = "6")]
    pub shell: Option<bool>,
    #[prost(string, repeated, tag = "7")]
    pub arguments: Vec<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TaskInfo {
    #[prost(string, required, tag = "1")]
    pub name: String,
    #[prost(message, required, tag = "2")]
    pub task_id: TaskId,
    #[prost(message, required, tag = "3")]
    pub agent_id: AgentId,
    #[prost(message, repeated, tag = "4")]
    pub resources: Vec<Resource>,
    #[prost(bytes = "vec", optional, tag = "6")]
    pub data: Option<Vec<u8>>,
    #[prost(message, optional, tag = "7")]
    pub command: Option<CommandInfo>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TaskState {
    TaskStarting = 0,
    TaskRunning = 1,
    TaskFinished = 2,
    TaskFailed = 3,
    TaskKilled = 4,
    TaskLost = 5,
    TaskStaging = 6,
    TaskError = 7,
    TaskKilling = 8,
    TaskDropped = 9,
    TaskUnreachable = 10,
    TaskGone = 11,
    TaskGoneByOperator = 12,
    TaskUnknown = 13,
}

impl TaskState {
    /// The name used in the `.proto` definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            TaskState::TaskStarting => "TASK_STARTING",
            TaskState::TaskRunning => "TASK_RUNNING",
            TaskState::TaskFinished => "TASK_FINISHED",
            TaskState::TaskFailed => "TASK_FAILED",
            TaskState::TaskKilled => "TASK_KILLED",
            TaskState::TaskLost => "TASK_LOST",
            TaskState::TaskStaging => "TASK_STAGING",
            TaskState::TaskError => "TASK_ERROR",
            TaskState::TaskKilling => "TASK_KILLING",
            TaskState::TaskDropped => "TASK_DROPPED",
            TaskState::TaskUnreachable => "TASK_UNREACHABLE",
            TaskState::TaskGone => "TASK_GONE",
            TaskState::TaskGoneByOperator => "TASK_GONE_BY_OPERATOR",
            TaskState::TaskUnknown => "TASK_UNKNOWN",
        }
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TaskStatus {
    #[prost(message, required, tag = "1")]
    pub task_id: TaskId,
    #[prost(enumeration = "TaskState", required, tag = "2")]
    pub state: i32,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub data: Option<Vec<u8>>,
    #[prost(string, optional, tag = "4")]
    pub message: Option<String>,
    #[prost(message, optional, tag = "5")]
    pub agent_id: Option<AgentId>,
    #[prost(double, optional, tag = "6")]
    pub timestamp: Option<f64>,
    #[prost(message, optional, tag = "7")]
    pub executor_id: Option<ExecutorId>,
    #[prost(bool, optional, tag = "8")]
    pub healthy: Option<bool>,
    #[prost(bytes = "vec", optional, tag = "11")]
    pub uuid: Option<Vec<u8>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum OperationState {
    OperationUnsupported = 0,
    OperationFinished = 1,
    OperationFailed = 2,
    OperationError = 3,
    OperationDropped = 4,
    OperationUnknown = 5,
    OperationPending = 6,
    OperationUnreachable = 7,
    OperationGoneByOperator = 8,
    OperationRecovering = 9,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct OperationStatus {
    #[prost(message, optional, tag = "1")]
    pub operation_id: Option<OperationId>,
    #[prost(enumeration = "OperationState", required, tag = "2")]
    pub state: i32,
    #[prost(string, optional, tag = "3")]
    pub message: Option<String>,
    #[prost(message, repeated, tag = "4")]
    pub converted_resources: Vec<Resource>,
    #[prost(message, optional, tag = "5")]
    pub uuid: Option<Uuid>,
    #[prost(message, optional, tag = "6")]
    pub agent_id: Option<AgentId>,
    #[prost(message, optional, tag = "7")]
    pub resource_provider_id: Option<ResourceProviderId>,
}

#[cfg(test)]
mod tests {
    use prost::Message;

    use super::*;

    #[test]
    fn framework_id_wire_format() {
        let id = FrameworkId::from("fw-1");
        // field 1, wire type 2, length 4, "fw-1"
        assert_eq!(id.encode_to_vec(), b"\x0a\x04fw-1");
    }

    #[test]
    fn scalar_resource_helper() {
        let res = Resource::scalar("cpus", 0.5);
        assert_eq!(res.r#type(), value::Type::Scalar);
        assert_eq!(res.scalar.unwrap().value, 0.5);
    }

    #[test]
    fn task_status_defaults_to_starting() {
        let status = TaskStatus::default();
        assert_eq!(status.state(), TaskState::TaskStarting);
    }

    #[test]
    fn unknown_fields_are_skipped() {
        // FrameworkID with an extra unknown varint field 9 = 1.
        let bytes = b"\x0a\x02id\x48\x01";
        let id = FrameworkId::decode(&bytes[..]).unwrap();
        assert_eq!(id.value, "id");
    }
}
