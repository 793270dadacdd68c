//! `mesos.v1.scheduler`: the `Call` and `Event` envelopes.
//!
//! Field numbers mirror `include/mesos/v1/scheduler/scheduler.proto`.

use crate::mesos::{
    AgentId, ExecutorId, Filters, FrameworkId, FrameworkInfo, MasterInfo, Offer, OfferId,
    OperationId, OperationStatus, ResourceProviderId, TaskId, TaskStatus,
};

// ── Event ──────────────────────────────────────────────────────

/// A message pushed by the master on the subscription stream.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Event {
    #[prost(enumeration = "event::Type", optional, tag = "1")]
    pub r#type: Option<i32>,
    #[prost(message, optional, tag = "2")]
    pub subscribed: Option<event::Subscribed>,
    #[prost(message, optional, tag = "3")]
    pub offers: Option<event::Offers>,
    #[prost(message, optional, tag = "4")]
    pub rescind: Option<event::Rescind>,
    #[prost(message, optional, tag = "5")]
    pub update: Option<event::Update>,
    #[prost(message, optional, tag = "6")]
    pub message: Option<event::Message>,
    #[prost(message, optional, tag = "7")]
    pub failure: Option<event::Failure>,
    #[prost(message, optional, tag = "8")]
    pub error: Option<event::Error>,
    #[prost(message, optional, tag = "10")]
    pub rescind_inverse_offer: Option<event::RescindInverseOffer>,
    #[prost(message, optional, tag = "11")]
    pub update_operation_status: Option<event::UpdateOperationStatus>,
}

pub mod event {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
        Unknown = 0,
        Subscribed = 1,
        Offers = 2,
        Rescind = 3,
        Update = 4,
        Message = 5,
        Failure = 6,
        Error = 7,
        Heartbeat = 8,
        InverseOffers = 9,
        RescindInverseOffer = 10,
        UpdateOperationStatus = 11,
    }

    impl Type {
        /// The name used in the `.proto` definition.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Type::Unknown => "UNKNOWN",
                Type::Subscribed => "SUBSCRIBED",
                Type::Offers => "OFFERS",
                Type::Rescind => "RESCIND",
                Type::Update => "UPDATE",
                Type::Message => "MESSAGE",
                Type::Failure => "FAILURE",
                Type::Error => "ERROR",
                Type::Heartbeat => "HEARTBEAT",
                Type::InverseOffers => "INVERSE_OFFERS",
                Type::RescindInverseOffer => "RESCIND_INVERSE_OFFER",
                Type::UpdateOperationStatus => "UPDATE_OPERATION_STATUS",
            }
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Subscribed {
        #[prost(message, required, tag = "1")]
        pub framework_id: FrameworkId,
        #[prost(double, optional, tag = "2")]
        pub heartbeat_interval_seconds: Option<f64>,
        #[prost(message, optional, tag = "3")]
        pub master_info: Option<MasterInfo>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Offers {
        #[prost(message, repeated, tag = "1")]
        pub offers: Vec<Offer>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Rescind {
        #[prost(message, required, tag = "1")]
        pub offer_id: OfferId,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct RescindInverseOffer {
        #[prost(message, required, tag = "1")]
        pub inverse_offer_id: OfferId,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Update {
        #[prost(message, required, tag = "1")]
        pub status: TaskStatus,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct UpdateOperationStatus {
        #[prost(message, required, tag = "1")]
        pub status: OperationStatus,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Message {
        #[prost(message, required, tag = "1")]
        pub agent_id: AgentId,
        #[prost(message, required, tag = "2")]
        pub executor_id: ExecutorId,
        #[prost(bytes = "vec", required, tag = "3")]
        pub data: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Failure {
        #[prost(message, optional, tag = "1")]
        pub agent_id: Option<AgentId>,
        #[prost(message, optional, tag = "2")]
        pub executor_id: Option<ExecutorId>,
        #[prost(int32, optional, tag = "3")]
        pub status: Option<i32>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Error {
        #[prost(string, required, tag = "1")]
        pub message: String,
    }
}

impl Event {
    /// A `SUBSCRIBED` event for `framework_id`.
    pub fn subscribed(framework_id: FrameworkId, heartbeat_interval_seconds: Option<f64>) -> Self {
        Self {
            r#type: Some(event::Type::Subscribed as i32),
            subscribed: Some(event::Subscribed {
                framework_id,
                heartbeat_interval_seconds,
                master_info: None,
            }),
            ..Default::default()
        }
    }

    /// An `ERROR` event carrying `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            r#type: Some(event::Type::Error as i32),
            error: Some(event::Error {
                message: message.into(),
            }),
            ..Default::default()
        }
    }

    /// A bare event of the given type (`HEARTBEAT` and friends).
    pub fn of_type(ty: event::Type) -> Self {
        Self {
            r#type: Some(ty as i32),
            ..Default::default()
        }
    }
}

// ── Call ───────────────────────────────────────────────────────

/// A message sent by the scheduler to the master.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Call {
    #[prost(message, optional, tag = "1")]
    pub framework_id: Option<FrameworkId>,
    #[prost(enumeration = "call::Type", optional, tag = "2")]
    pub r#type: Option<i32>,
    #[prost(message, optional, tag = "3")]
    pub subscribe: Option<call::Subscribe>,
    #[prost(message, optional, tag = "4")]
    pub accept: Option<call::Accept>,
    #[prost(message, optional, tag = "5")]
    pub decline: Option<call::Decline>,
    #[prost(message, optional, tag = "6")]
    pub kill: Option<call::Kill>,
    #[prost(message, optional, tag = "7")]
    pub shutdown: Option<call::Shutdown>,
    #[prost(message, optional, tag = "8")]
    pub acknowledge: Option<call::Acknowledge>,
    #[prost(message, optional, tag = "9")]
    pub reconcile: Option<call::Reconcile>,
    // 10-14 carry MESSAGE, REQUEST and the inverse-offer calls.
    #[prost(message, optional, tag = "15")]
    pub revive: Option<call::Revive>,
    #[prost(message, optional, tag = "16")]
    pub suppress: Option<call::Suppress>,
    #[prost(message, optional, tag = "17")]
    pub acknowledge_operation_status: Option<call::AcknowledgeOperationStatus>,
    #[prost(message, optional, tag = "18")]
    pub reconcile_operations: Option<call::ReconcileOperations>,
}

pub mod call {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
        Unknown = 0,
        Subscribe = 1,
        Teardown = 2,
        Accept = 3,
        Decline = 4,
        Revive = 5,
        Kill = 6,
        Shutdown = 7,
        Acknowledge = 8,
        Reconcile = 9,
        Message = 10,
        Request = 11,
        Suppress = 12,
        AcceptInverseOffers = 13,
        DeclineInverseOffers = 14,
        AcknowledgeOperationStatus = 15,
        ReconcileOperations = 16,
        UpdateFramework = 17,
    }

    impl Type {
        /// The name used in the `.proto` definition.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Type::Unknown => "UNKNOWN",
                Type::Subscribe => "SUBSCRIBE",
                Type::Teardown => "TEARDOWN",
                Type::Accept => "ACCEPT",
                Type::Decline => "DECLINE",
                Type::Revive => "REVIVE",
                Type::Kill => "KILL",
                Type::Shutdown => "SHUTDOWN",
                Type::Acknowledge => "ACKNOWLEDGE",
                Type::Reconcile => "RECONCILE",
                Type::Message => "MESSAGE",
                Type::Request => "REQUEST",
                Type::Suppress => "SUPPRESS",
                Type::AcceptInverseOffers => "ACCEPT_INVERSE_OFFERS",
                Type::DeclineInverseOffers => "DECLINE_INVERSE_OFFERS",
                Type::AcknowledgeOperationStatus => "ACKNOWLEDGE_OPERATION_STATUS",
                Type::ReconcileOperations => "RECONCILE_OPERATIONS",
                Type::UpdateFramework => "UPDATE_FRAMEWORK",
            }
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Subscribe {
        #[prost(message, required, tag = "1")]
        pub framework_info: FrameworkInfo,
        #[prost(string, repeated, tag = "2")]
        pub suppressed_roles: Vec<String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Accept {
        #[prost(message, repeated, tag = "1")]
        pub offer_ids: Vec<OfferId>,
        #[prost(message, repeated, tag = "2")]
        pub operations: Vec<crate::mesos::offer::Operation>,
        #[prost(message, optional, tag = "3")]
        pub filters: Option<Filters>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Decline {
        #[prost(message, repeated, tag = "1")]
        pub offer_ids: Vec<OfferId>,
        #[prost(message, optional, tag = "2")]
        pub filters: Option<Filters>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Revive {
        #[prost(string, repeated, tag = "1")]
        pub roles: Vec<String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Suppress {
        #[prost(string, repeated, tag = "1")]
        pub roles: Vec<String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Kill {
        #[prost(message, required, tag = "1")]
        pub task_id: TaskId,
        #[prost(message, optional, tag = "2")]
        pub agent_id: Option<AgentId>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Shutdown {
        #[prost(message, required, tag = "1")]
        pub executor_id: ExecutorId,
        #[prost(message, required, tag = "2")]
        pub agent_id: AgentId,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Acknowledge {
        #[prost(message, required, tag = "1")]
        pub agent_id: AgentId,
        #[prost(message, required, tag = "2")]
        pub task_id: TaskId,
        #[prost(bytes = "vec", required, tag = "3")]
        pub uuid: Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct AcknowledgeOperationStatus {
        #[prost(message, optional, tag = "1")]
        pub agent_id: Option<AgentId>,
        #[prost(message, optional, tag = "2")]
        pub resource_provider_id: Option<ResourceProviderId>,
        #[prost(bytes = "vec", required, tag = "3")]
        pub uuid: Vec<u8>,
        #[prost(message, required, tag = "4")]
        pub operation_id: OperationId,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Reconcile {
        #[prost(message, repeated, tag = "1")]
        pub tasks: Vec<reconcile::Task>,
    }

    pub mod reconcile {
        use crate::mesos::{AgentId, ResourceProviderId, TaskId};

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Task {
            #[prost(message, required, tag = "1")]
            pub task_id: TaskId,
            #[prost(message, optional, tag = "2")]
            pub agent_id: Option<AgentId>,
            #[prost(message, optional, tag = "3")]
            pub resource_provider_id: Option<ResourceProviderId>,
        }
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct ReconcileOperations {
        #[prost(message, repeated, tag = "1")]
        pub operations: Vec<reconcile_operations::Operation>,
    }

    pub mod reconcile_operations {
        use crate::mesos::{AgentId, OperationId, ResourceProviderId};

        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct Operation {
            #[prost(message, required, tag = "1")]
            pub operation_id: OperationId,
            #[prost(message, optional, tag = "2")]
            pub agent_id: Option<AgentId>,
            #[prost(message, optional, tag = "3")]
            pub resource_provider_id: Option<ResourceProviderId>,
        }
    }
}
