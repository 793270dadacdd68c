//! Application callbacks driven by the event loop.

use std::future::Future;

use mesos_scheduler_proto::{Event, event};

use crate::error::SchedulerError;
use crate::remote::RemoteHandle;

/// Receives the lifecycle notifications and events of one session.
///
/// Callbacks run sequentially on the event loop task, so a slow handler
/// delays the next event. `on_subscribe` runs at most once, before every
/// event that follows the `SUBSCRIBED` frame; exactly one of
/// `on_disconnect`, `on_terminate` or `on_exit` ends the session.
///
/// An `Err` from `on_subscribe` or `on_event` is logged and the session
/// continues. The same holds for a panic.
pub trait EventHandler: Send + 'static {
    /// The master accepted the subscription. `remote` stays valid for the
    /// whole session and may be cloned into other tasks.
    fn on_subscribe(
        &mut self,
        _remote: RemoteHandle,
        _subscribed: event::Subscribed,
    ) -> impl Future<Output = anyhow::Result<()>> + Send {
        async { Ok(()) }
    }

    /// Every event other than the first `SUBSCRIBED`, including heartbeats.
    /// An `ERROR` before subscription ends the session instead.
    fn on_event(&mut self, _event: Event) -> impl Future<Output = anyhow::Result<()>> + Send {
        async { Ok(()) }
    }

    /// The master closed the stream while the session was running.
    fn on_disconnect(&mut self) -> impl Future<Output = ()> + Send {
        async {}
    }

    /// The session failed: no leader, subscribe refused, or a broken stream.
    fn on_terminate(&mut self, _error: SchedulerError) -> impl Future<Output = ()> + Send {
        async {}
    }

    /// The session was closed locally.
    fn on_exit(&mut self) -> impl Future<Output = ()> + Send {
        async {}
    }
}
