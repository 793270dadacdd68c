//! mesos-scheduler-client: a client for the Mesos v1 HTTP scheduler API.
//!
//! Discovers the leading master, subscribes a framework, decodes the
//! RecordIO event stream and hands events to an application
//! [`EventHandler`]. Calls go back to the master through a cloneable
//! [`RemoteHandle`].
//!
//! # Architecture
//!
//! ```text
//! SchedulerBuilder::start()
//!   ├── LeaderResolver (HTTP /redirect or coordination service)
//!   ├── POST SUBSCRIBE → Mesos-Stream-Id + chunked body
//!   └── spawned event loop
//!       ├── EventStream (RecordIO → Event)
//!       ├── EventHandler callbacks (errors and panics contained)
//!       └── terminal state → Scheduler::join()
//!
//! RemoteHandle
//!   └── CallEncoder → POST /api/v1/scheduler (Mesos-Stream-Id)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use mesos_scheduler_client::{EventHandler, RemoteHandle, Scheduler, SchedulerConfig};
//! use mesos_scheduler_client::proto::{event, Event};
//!
//! struct Decliner(Option<RemoteHandle>);
//!
//! impl EventHandler for Decliner {
//!     async fn on_subscribe(&mut self, remote: RemoteHandle, _: event::Subscribed) -> anyhow::Result<()> {
//!         self.0 = Some(remote);
//!         Ok(())
//!     }
//!
//!     async fn on_event(&mut self, event: Event) -> anyhow::Result<()> {
//!         if let (Some(remote), Some(offers)) = (&self.0, event.offers) {
//!             let ids = offers.offers.into_iter().map(|o| o.id).collect();
//!             remote.decline(ids, Some(5.0)).await;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! # async fn run() -> anyhow::Result<()> {
//! let scheduler = Scheduler::builder(SchedulerConfig::new("http://master:5050"))
//!     .start(Decliner(None))
//!     .await?;
//! scheduler.join().await;
//! # Ok(())
//! # }
//! ```

pub mod call;
pub mod config;
pub mod error;
pub mod framework;
pub mod handler;
pub mod recordio;
pub mod remote;
pub mod resolver;
pub mod scheduler;
pub mod tls;
pub mod transport;

pub use mesos_scheduler_proto as proto;

pub use call::CallEncoder;
pub use config::SchedulerConfig;
pub use error::{
    ConfigError, DecodeError, NoLeaderError, SchedulerError, SchedulerResult, SendError,
    TransportError,
};
pub use framework::build_framework_info;
pub use handler::EventHandler;
pub use recordio::{EventStream, RecordIoDecoder, encode_record};
pub use remote::RemoteHandle;
pub use resolver::{
    CoordinationStore, HttpLeaderResolver, LeaderResolver, StaticLeaderResolver, ZkLeaderResolver,
    ZkUrl,
};
pub use scheduler::{Scheduler, SchedulerBuilder, SessionState};
pub use transport::HttpTransport;
