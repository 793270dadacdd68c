//! Handle for issuing calls on a subscribed session.

use std::sync::Arc;

use mesos_scheduler_proto::call::{reconcile, reconcile_operations};
use mesos_scheduler_proto::offer::Operation;
use mesos_scheduler_proto::{AgentId, Call, FrameworkId, OfferId, OperationStatus, TaskId, TaskStatus};
use tracing::error;

use crate::call;
use crate::error::SendError;
use crate::scheduler::Session;

/// Sends calls to the master that owns the current subscription.
///
/// Cheap to clone and safe to use from any task. The call methods never
/// fail: a rejected or undeliverable call is logged and counted in
/// [`send_failures`](Self::send_failures). Use [`send`](Self::send) to get
/// the result instead.
#[derive(Clone)]
pub struct RemoteHandle {
    session: Arc<Session>,
}

impl RemoteHandle {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    pub fn master_url(&self) -> &str {
        self.session.master_url()
    }

    pub fn framework_id(&self) -> &FrameworkId {
        self.session.encoder().framework_id()
    }

    pub fn stream_id(&self) -> &str {
        self.session.stream_id()
    }

    /// Calls that could not be delivered or were rejected so far.
    pub fn send_failures(&self) -> u64 {
        self.session.send_failures()
    }

    /// Whether the session has not been closed yet.
    pub fn is_running(&self) -> bool {
        self.session.is_running()
    }

    /// Send an arbitrary call and report the outcome.
    pub async fn send(&self, call: Call) -> Result<(), SendError> {
        self.session.send(&call).await
    }

    pub async fn accept(
        &self,
        offer_ids: Vec<OfferId>,
        operations: Vec<Operation>,
        refuse_seconds: Option<f64>,
    ) {
        let call = self.session.encoder().accept(offer_ids, operations, refuse_seconds);
        self.dispatch(call).await;
    }

    pub async fn decline(&self, offer_ids: Vec<OfferId>, refuse_seconds: Option<f64>) {
        let call = self.session.encoder().decline(offer_ids, refuse_seconds);
        self.dispatch(call).await;
    }

    pub async fn acknowledge(&self, status: &TaskStatus) {
        let call = self.session.encoder().acknowledge(status);
        self.dispatch(call).await;
    }

    pub async fn acknowledge_operation_status(&self, status: &OperationStatus) {
        let call = self.session.encoder().acknowledge_operation_status(status);
        self.dispatch(call).await;
    }

    pub async fn kill(&self, task_id: TaskId, agent_id: Option<AgentId>) {
        let call = self.session.encoder().kill(task_id, agent_id);
        self.dispatch(call).await;
    }

    pub async fn reconcile(&self, tasks: Vec<reconcile::Task>) {
        let call = self.session.encoder().reconcile(tasks);
        self.dispatch(call).await;
    }

    pub async fn reconcile_operations(&self, operations: Vec<reconcile_operations::Operation>) {
        let call = self.session.encoder().reconcile_operations(operations);
        self.dispatch(call).await;
    }

    pub async fn revive(&self, roles: Vec<String>) {
        let call = self.session.encoder().revive(roles);
        self.dispatch(call).await;
    }

    pub async fn suppress(&self, roles: Vec<String>) {
        let call = self.session.encoder().suppress(roles);
        self.dispatch(call).await;
    }

    /// Unregister the framework, then close the session.
    pub async fn teardown(&self) {
        let call = self.session.encoder().teardown();
        self.dispatch(call).await;
        self.session.close();
    }

    /// Close the session without unregistering. The master keeps the
    /// framework for its failover timeout.
    pub fn exit(&self) {
        self.session.close();
    }

    async fn dispatch(&self, call: Call) {
        if let Err(e) = self.session.send(&call).await {
            self.session.record_send_failure();
            error!(
                call = call::type_name(&call),
                framework_id = %self.framework_id(),
                error = %e,
                "failed to send call to master"
            );
        }
    }
}

impl std::fmt::Debug for RemoteHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteHandle")
            .field("master_url", &self.master_url())
            .field("framework_id", &self.framework_id().value)
            .field("stream_id", &self.stream_id())
            .finish()
    }
}
