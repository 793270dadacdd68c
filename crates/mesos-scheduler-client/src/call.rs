//! Builders for scheduler `Call` messages.

use mesos_scheduler_proto::call::{self, reconcile, reconcile_operations};
use mesos_scheduler_proto::offer::Operation;
use mesos_scheduler_proto::{
    AgentId, Call, Filters, FrameworkId, FrameworkInfo, Message, OfferId, OperationStatus, TaskId,
    TaskStatus,
};

/// Stamps every call with the session's framework ID.
#[derive(Debug, Clone)]
pub struct CallEncoder {
    framework_id: FrameworkId,
}

impl CallEncoder {
    pub fn new(framework_id: FrameworkId) -> Self {
        Self { framework_id }
    }

    pub fn framework_id(&self) -> &FrameworkId {
        &self.framework_id
    }

    fn call(&self, ty: call::Type) -> Call {
        Call {
            framework_id: Some(self.framework_id.clone()),
            r#type: Some(ty as i32),
            ..Default::default()
        }
    }

    pub fn subscribe(&self, framework_info: FrameworkInfo) -> Call {
        Call {
            subscribe: Some(call::Subscribe {
                framework_info,
                suppressed_roles: Vec::new(),
            }),
            ..self.call(call::Type::Subscribe)
        }
    }

    pub fn teardown(&self) -> Call {
        self.call(call::Type::Teardown)
    }

    pub fn accept(
        &self,
        offer_ids: Vec<OfferId>,
        operations: Vec<Operation>,
        refuse_seconds: Option<f64>,
    ) -> Call {
        Call {
            accept: Some(call::Accept {
                offer_ids,
                operations,
                filters: filters(refuse_seconds),
            }),
            ..self.call(call::Type::Accept)
        }
    }

    pub fn decline(&self, offer_ids: Vec<OfferId>, refuse_seconds: Option<f64>) -> Call {
        Call {
            decline: Some(call::Decline {
                offer_ids,
                filters: filters(refuse_seconds),
            }),
            ..self.call(call::Type::Decline)
        }
    }

    /// Acknowledge a task status update. Agent ID and UUID are copied from
    /// the status; a status without a UUID needs no acknowledgement.
    pub fn acknowledge(&self, status: &TaskStatus) -> Call {
        Call {
            acknowledge: Some(call::Acknowledge {
                agent_id: status.agent_id.clone().unwrap_or_default(),
                task_id: status.task_id.clone(),
                uuid: status.uuid.clone().unwrap_or_default(),
            }),
            ..self.call(call::Type::Acknowledge)
        }
    }

    pub fn acknowledge_operation_status(&self, status: &OperationStatus) -> Call {
        Call {
            acknowledge_operation_status: Some(call::AcknowledgeOperationStatus {
                agent_id: status.agent_id.clone(),
                resource_provider_id: status.resource_provider_id.clone(),
                uuid: status
                    .uuid
                    .as_ref()
                    .map(|u| u.value.clone())
                    .unwrap_or_default(),
                operation_id: status.operation_id.clone().unwrap_or_default(),
            }),
            ..self.call(call::Type::AcknowledgeOperationStatus)
        }
    }

    pub fn kill(&self, task_id: TaskId, agent_id: Option<AgentId>) -> Call {
        Call {
            kill: Some(call::Kill { task_id, agent_id }),
            ..self.call(call::Type::Kill)
        }
    }

    pub fn reconcile(&self, tasks: Vec<reconcile::Task>) -> Call {
        Call {
            reconcile: Some(call::Reconcile { tasks }),
            ..self.call(call::Type::Reconcile)
        }
    }

    pub fn reconcile_operations(&self, operations: Vec<reconcile_operations::Operation>) -> Call {
        Call {
            reconcile_operations: Some(call::ReconcileOperations { operations }),
            ..self.call(call::Type::ReconcileOperations)
        }
    }

    pub fn revive(&self, roles: Vec<String>) -> Call {
        Call {
            revive: Some(call::Revive { roles }),
            ..self.call(call::Type::Revive)
        }
    }

    pub fn suppress(&self, roles: Vec<String>) -> Call {
        Call {
            suppress: Some(call::Suppress { roles }),
            ..self.call(call::Type::Suppress)
        }
    }
}

/// Serialize a call for the request body.
pub fn encode(call: &Call) -> Vec<u8> {
    call.encode_to_vec()
}

/// Protocol name of a call's type, for logging.
pub fn type_name(call: &Call) -> &'static str {
    call.r#type().as_str_name()
}

fn filters(refuse_seconds: Option<f64>) -> Option<Filters> {
    refuse_seconds.map(|refuse_seconds| Filters {
        refuse_seconds: Some(refuse_seconds),
    })
}
