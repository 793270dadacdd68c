//! Connection lifecycle of a scheduler session.
//!
//! ```text
//! INIT -> RESOLVING -> SUBSCRIBING -> SUBSCRIBED -> STREAMING
//!      -> { DISCONNECTED | TERMINATED | CLOSED }
//! ```
//!
//! Resolving and subscribing run inline on the caller's task. Once the
//! master answers with a stream ID, a single spawned task reads the event
//! stream and drives the [`EventHandler`]. The terminal state is published
//! exactly once, after the matching handler callback has returned.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::io;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use bytes::Bytes;
use futures_core::Stream;
use futures_util::{FutureExt, StreamExt, TryStreamExt};
use http::header::ACCEPT;
use http::{StatusCode, Uri};
use http_body_util::BodyStream;
use hyper::body::Incoming;
use mesos_scheduler_proto::{Call, FrameworkId, FrameworkInfo, event};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::call::{self, CallEncoder};
use crate::config::SchedulerConfig;
use crate::error::{SchedulerError, SchedulerResult, SendError};
use crate::framework::build_framework_info;
use crate::handler::EventHandler;
use crate::recordio::{ByteStream, EventStream};
use crate::remote::RemoteHandle;
use crate::resolver::{self, CoordinationStore, LeaderResolver};
use crate::transport::{self, HttpTransport, PROTOBUF, STREAM_ID_HEADER};

/// Path of the v1 scheduler API on a master.
pub const SCHEDULER_API_PATH: &str = "/api/v1/scheduler";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Init,
    Resolving,
    Subscribing,
    Subscribed,
    Streaming,
    /// The master closed the stream.
    Disconnected,
    /// The session failed.
    Terminated,
    /// The session was closed locally.
    Closed,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Disconnected | Self::Terminated | Self::Closed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "INIT",
            Self::Resolving => "RESOLVING",
            Self::Subscribing => "SUBSCRIBING",
            Self::Subscribed => "SUBSCRIBED",
            Self::Streaming => "STREAMING",
            Self::Disconnected => "DISCONNECTED",
            Self::Terminated => "TERMINATED",
            Self::Closed => "CLOSED",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State shared by the event loop and every [`RemoteHandle`].
pub(crate) struct Session {
    master_url: String,
    endpoint: Uri,
    stream_id: String,
    encoder: CallEncoder,
    transport: HttpTransport,
    running: AtomicBool,
    shutdown: watch::Sender<bool>,
    send_failures: AtomicU64,
}

impl Session {
    pub(crate) fn new(
        master_url: String,
        endpoint: Uri,
        stream_id: String,
        encoder: CallEncoder,
        transport: HttpTransport,
    ) -> Self {
        let (shutdown, _) = watch::channel(false);
        Self {
            master_url,
            endpoint,
            stream_id,
            encoder,
            transport,
            running: AtomicBool::new(true),
            shutdown,
            send_failures: AtomicU64::new(0),
        }
    }

    pub(crate) fn master_url(&self) -> &str {
        &self.master_url
    }

    pub(crate) fn stream_id(&self) -> &str {
        &self.stream_id
    }

    pub(crate) fn encoder(&self) -> &CallEncoder {
        &self.encoder
    }

    pub(crate) fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub(crate) fn send_failures(&self) -> u64 {
        self.send_failures.load(Ordering::Relaxed)
    }

    pub(crate) fn record_send_failure(&self) {
        self.send_failures.fetch_add(1, Ordering::Relaxed);
    }

    fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown.subscribe()
    }

    /// Stop the session. Returns `false` if it was already stopped.
    pub(crate) fn close(&self) -> bool {
        let was_running = self.running.swap(false, Ordering::SeqCst);
        if was_running {
            info!(framework_id = %self.encoder.framework_id(), "closing scheduler session");
            self.shutdown.send_replace(true);
        }
        was_running
    }

    /// POST a call on this session.
    pub(crate) async fn send(&self, call: &Call) -> Result<(), SendError> {
        let name = call::type_name(call);
        debug!(call = name, "sending call");

        let response = self
            .transport
            .post(
                &self.endpoint,
                &[(STREAM_ID_HEADER, self.stream_id.as_str())],
                call::encode(call),
            )
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = transport::read_error_body(response.into_body()).await;
        warn!(call = name, status = status.as_u16(), %body, "master rejected call");
        Err(SendError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

/// Configures and starts a [`Scheduler`].
pub struct SchedulerBuilder {
    config: SchedulerConfig,
    framework_info: Option<FrameworkInfo>,
    resolver: Option<Box<dyn LeaderResolver>>,
    store: Option<Arc<dyn CoordinationStore>>,
}

impl SchedulerBuilder {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            framework_info: None,
            resolver: None,
            store: None,
        }
    }

    /// Register with this descriptor instead of one built from config.
    pub fn framework_info(mut self, info: FrameworkInfo) -> Self {
        self.framework_info = Some(info);
        self
    }

    /// Replace the resolver chosen from `master_url`.
    pub fn leader_resolver(mut self, resolver: impl LeaderResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Coordination service used for `zk://` master references.
    pub fn coordination_store(mut self, store: Arc<dyn CoordinationStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Resolve the leader, subscribe and start the event loop.
    ///
    /// Only configuration errors are returned. Failures while resolving or
    /// subscribing are delivered to `on_terminate` and leave the returned
    /// scheduler in [`SessionState::Terminated`].
    pub async fn start<H: EventHandler>(self, mut handler: H) -> SchedulerResult<Scheduler> {
        let Self {
            config,
            framework_info,
            resolver,
            store,
        } = self;
        config.validate()?;

        let framework_id = match config.framework_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => FrameworkId::from(id),
            _ => FrameworkId::from(uuid::Uuid::new_v4().to_string()),
        };
        let mut framework_info =
            framework_info.unwrap_or_else(|| build_framework_info(&config, &framework_id));
        if framework_info.id.is_none() {
            framework_info.id = Some(framework_id.clone());
        }

        let transport = HttpTransport::new(config.disable_tls_verification)?;
        let resolver = resolver.unwrap_or_else(|| {
            resolver::for_master(&config.master_url, transport.clone(), store)
        });
        let encoder = CallEncoder::new(framework_id.clone());
        let (state_tx, state_rx) = watch::channel(SessionState::Init);

        let mut scheduler = Scheduler {
            state: state_rx,
            session: None,
            framework_id,
            framework_info,
            master_url: config.master_url.clone(),
        };

        let subscription = match subscribe(
            &transport,
            resolver.as_ref(),
            &encoder,
            &scheduler.framework_info,
            &state_tx,
        )
        .await
        {
            Ok(subscription) => subscription,
            Err(e) => {
                error!(master = %config.master_url, error = %e, "scheduler failed to subscribe");
                isolate("on_terminate", handler.on_terminate(e)).await;
                state_tx.send_replace(SessionState::Terminated);
                return Ok(scheduler);
            }
        };

        let session = Arc::new(Session::new(
            subscription.leader,
            subscription.endpoint,
            subscription.stream_id,
            encoder,
            transport,
        ));
        state_tx.send_replace(SessionState::Subscribed);

        let events = EventStream::new(subscription.body, config.max_record_size);
        tokio::spawn(run_event_loop(Arc::clone(&session), events, handler, state_tx));

        scheduler.session = Some(session);
        Ok(scheduler)
    }
}

struct Subscription {
    leader: String,
    endpoint: Uri,
    stream_id: String,
    body: ByteStream,
}

async fn subscribe(
    transport: &HttpTransport,
    resolver: &dyn LeaderResolver,
    encoder: &CallEncoder,
    framework_info: &FrameworkInfo,
    state: &watch::Sender<SessionState>,
) -> SchedulerResult<Subscription> {
    state.send_replace(SessionState::Resolving);
    let leader = resolver.resolve().await?;
    let leader = leader.trim_end_matches('/').to_string();

    state.send_replace(SessionState::Subscribing);
    let endpoint = transport::parse_uri(&format!("{leader}{SCHEDULER_API_PATH}"))?;
    info!(master = %leader, framework_id = %encoder.framework_id(), "connecting to master");

    let call = encoder.subscribe(framework_info.clone());
    let response = transport
        .post(&endpoint, &[(ACCEPT, PROTOBUF)], call::encode(&call))
        .await?;

    let status = response.status();
    if status != StatusCode::OK {
        let body = transport::read_error_body(response.into_body()).await;
        return Err(SchedulerError::Subscribe {
            status: status.as_u16(),
            body,
        });
    }

    let stream_id = response
        .headers()
        .get(&STREAM_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(SchedulerError::MissingStreamId)?;
    info!(%stream_id, "subscription stream opened");

    Ok(Subscription {
        leader,
        endpoint,
        stream_id,
        body: body_stream(response.into_body()),
    })
}

fn body_stream(body: Incoming) -> ByteStream {
    Box::pin(
        BodyStream::new(body)
            .try_filter_map(|frame| async move { Ok(frame.into_data().ok()) })
            .map_err(io::Error::other),
    )
}

enum Outcome {
    Disconnected,
    Terminated(SchedulerError),
    Closed,
}

async fn run_event_loop<H, S>(
    session: Arc<Session>,
    mut events: EventStream<S>,
    mut handler: H,
    state: watch::Sender<SessionState>,
) where
    H: EventHandler,
    S: Stream<Item = Result<Bytes, io::Error>> + Unpin + Send,
{
    let mut shutdown = session.shutdown_signal();
    state.send_replace(SessionState::Streaming);
    let mut subscribed = false;

    let outcome = loop {
        if !session.is_running() {
            break Outcome::Closed;
        }

        let next = tokio::select! {
            biased;
            Ok(()) = shutdown.changed() => continue,
            next = events.next() => next,
        };

        let event = match next {
            Some(Ok(event)) => event,
            Some(Err(e)) if session.is_running() => break Outcome::Terminated(e.into()),
            None if session.is_running() => break Outcome::Disconnected,
            _ => break Outcome::Closed,
        };

        let ty = event.r#type();
        debug!(event = ty.as_str_name(), "received event");

        if !subscribed {
            match ty {
                event::Type::Subscribed => {
                    let info = event.subscribed.unwrap_or_default();
                    subscribed = true;
                    info!(
                        framework_id = %info.framework_id,
                        master = %session.master_url(),
                        "registered with master"
                    );
                    let remote = RemoteHandle::new(Arc::clone(&session));
                    deliver("on_subscribe", handler.on_subscribe(remote, info)).await;
                    continue;
                }
                event::Type::Error => {
                    let message = event.error.map(|e| e.message).unwrap_or_default();
                    error!(%message, "master reported an error before subscription");
                    break Outcome::Terminated(SchedulerError::Rejected(message));
                }
                _ => {}
            }
        }

        deliver("on_event", handler.on_event(event)).await;
    };

    // Release the connection before reporting the outcome.
    drop(events);
    session.running.store(false, Ordering::SeqCst);

    let terminal = match outcome {
        Outcome::Disconnected => {
            info!(master = %session.master_url(), "master closed the event stream");
            isolate("on_disconnect", handler.on_disconnect()).await;
            SessionState::Disconnected
        }
        Outcome::Terminated(e) => {
            error!(master = %session.master_url(), error = %e, "scheduler session terminated");
            isolate("on_terminate", handler.on_terminate(e)).await;
            SessionState::Terminated
        }
        Outcome::Closed => {
            info!(master = %session.master_url(), "scheduler session closed");
            isolate("on_exit", handler.on_exit()).await;
            SessionState::Closed
        }
    };
    state.send_replace(terminal);
}

/// Run a handler callback, logging a returned error.
async fn deliver<F>(callback: &'static str, fut: F)
where
    F: Future<Output = anyhow::Result<()>>,
{
    if let Some(Err(e)) = isolate(callback, fut).await {
        error!(callback, error = %format!("{e:#}"), "event handler failed");
    }
}

/// Run a handler callback, containing any panic.
async fn isolate<F: Future>(callback: &'static str, fut: F) -> Option<F::Output> {
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(output) => Some(output),
        Err(panic) => {
            error!(callback, panic = panic_message(panic.as_ref()), "event handler panicked");
            None
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

/// A started scheduler session.
pub struct Scheduler {
    state: watch::Receiver<SessionState>,
    session: Option<Arc<Session>>,
    framework_id: FrameworkId,
    framework_info: FrameworkInfo,
    master_url: String,
}

impl Scheduler {
    pub fn builder(config: SchedulerConfig) -> SchedulerBuilder {
        SchedulerBuilder::new(config)
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Wait until the session reaches a terminal state.
    pub async fn join(&self) -> SessionState {
        let mut state = self.state.clone();
        if let Ok(terminal) = state.wait_for(|s| s.is_terminal()).await {
            return *terminal;
        }
        *state.borrow()
    }

    /// Stop reading events. Idempotent, and a no-op before subscription.
    pub fn close(&self) {
        if let Some(session) = &self.session {
            session.close();
        }
    }

    /// Call handle, available once the master accepted the subscription.
    pub fn remote(&self) -> Option<RemoteHandle> {
        self.session.as_ref().map(|s| RemoteHandle::new(Arc::clone(s)))
    }

    /// The leading master when subscribed, the configured master otherwise.
    pub fn master_url(&self) -> &str {
        self.session
            .as_ref()
            .map(|s| s.master_url())
            .unwrap_or(&self.master_url)
    }

    pub fn framework_id(&self) -> &FrameworkId {
        &self.framework_id
    }

    pub fn framework_info(&self) -> &FrameworkInfo {
        &self.framework_info
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use bytes::BytesMut;
    use futures_util::stream;
    use mesos_scheduler_proto::{Event, Message};

    use super::*;
    use crate::recordio::{DEFAULT_MAX_RECORD_SIZE, encode_record};

    #[derive(Clone, Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<String>>>,
        panic_on_offers: bool,
        fail_on_heartbeat: bool,
    }

    impl Recorder {
        fn push(&self, entry: impl Into<String>) {
            self.calls.lock().unwrap().push(entry.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl EventHandler for Recorder {
        async fn on_subscribe(
            &mut self,
            remote: RemoteHandle,
            subscribed: event::Subscribed,
        ) -> anyhow::Result<()> {
            assert_eq!(remote.stream_id(), "stream-1");
            self.push(format!("subscribe:{}", subscribed.framework_id));
            Ok(())
        }

        async fn on_event(&mut self, event: Event) -> anyhow::Result<()> {
            let ty = event.r#type();
            self.push(format!("event:{}", ty.as_str_name()));
            if self.panic_on_offers && ty == event::Type::Offers {
                panic!("offer handling blew up");
            }
            if self.fail_on_heartbeat && ty == event::Type::Heartbeat {
                anyhow::bail!("heartbeat rejected");
            }
            Ok(())
        }

        async fn on_disconnect(&mut self) {
            self.push("disconnect");
        }

        async fn on_terminate(&mut self, error: SchedulerError) {
            self.push(format!("terminate:{error}"));
        }

        async fn on_exit(&mut self) {
            self.push("exit");
        }
    }

    fn session() -> Arc<Session> {
        Arc::new(Session::new(
            "http://127.0.0.1:5050".to_string(),
            Uri::from_static("http://127.0.0.1:5050/api/v1/scheduler"),
            "stream-1".to_string(),
            CallEncoder::new(FrameworkId::from("fw-1")),
            HttpTransport::new(false).unwrap(),
        ))
    }

    fn frames(events: &[Event]) -> Bytes {
        let mut out = BytesMut::new();
        for event in events {
            out.extend_from_slice(&encode_record(&event.encode_to_vec()));
        }
        out.freeze()
    }

    fn subscribed() -> Event {
        Event::subscribed(FrameworkId::from("fw-1"), Some(15.0))
    }

    async fn run<S>(session: Arc<Session>, chunks: S, handler: Recorder) -> SessionState
    where
        S: Stream<Item = Result<Bytes, io::Error>> + Unpin + Send + 'static,
    {
        let (state_tx, mut state_rx) = watch::channel(SessionState::Subscribed);
        tokio::spawn(run_event_loop(
            session,
            EventStream::new(chunks, DEFAULT_MAX_RECORD_SIZE),
            handler,
            state_tx,
        ));
        let state = tokio::time::timeout(
            Duration::from_secs(5),
            state_rx.wait_for(|s| s.is_terminal()),
        )
        .await
        .expect("event loop did not finish")
        .unwrap();
        *state
    }

    #[tokio::test]
    async fn subscribe_runs_first_even_within_one_chunk() {
        let handler = Recorder::default();
        let wire = frames(&[
            subscribed(),
            Event::of_type(event::Type::Heartbeat),
            Event::of_type(event::Type::Offers),
        ]);
        let state = run(session(), stream::iter(vec![Ok(wire)]), handler.clone()).await;

        assert_eq!(state, SessionState::Disconnected);
        assert_eq!(
            handler.calls(),
            vec!["subscribe:fw-1", "event:HEARTBEAT", "event:OFFERS", "disconnect"]
        );
    }

    #[tokio::test]
    async fn second_subscribed_goes_to_on_event() {
        let handler = Recorder::default();
        let wire = frames(&[subscribed(), subscribed()]);
        run(session(), stream::iter(vec![Ok(wire)]), handler.clone()).await;
        assert_eq!(
            handler.calls(),
            vec!["subscribe:fw-1", "event:SUBSCRIBED", "disconnect"]
        );
    }

    #[tokio::test]
    async fn error_before_subscribe_terminates() {
        let handler = Recorder::default();
        let wire = frames(&[Event::error("framework has been removed"), subscribed()]);
        let state = run(session(), stream::iter(vec![Ok(wire)]), handler.clone()).await;

        assert_eq!(state, SessionState::Terminated);
        assert_eq!(
            handler.calls(),
            vec!["terminate:error subscribing to master: framework has been removed"]
        );
    }

    #[tokio::test]
    async fn error_after_subscribe_is_an_event() {
        let handler = Recorder::default();
        let wire = frames(&[subscribed(), Event::error("oops")]);
        let state = run(session(), stream::iter(vec![Ok(wire)]), handler.clone()).await;

        assert_eq!(state, SessionState::Disconnected);
        assert_eq!(handler.calls(), vec!["subscribe:fw-1", "event:ERROR", "disconnect"]);
    }

    #[tokio::test]
    async fn events_before_subscribed_are_forwarded() {
        let handler = Recorder::default();
        let wire = frames(&[
            Event::of_type(event::Type::Heartbeat),
            subscribed(),
            Event::of_type(event::Type::Offers),
        ]);
        run(session(), stream::iter(vec![Ok(wire)]), handler.clone()).await;
        assert_eq!(
            handler.calls(),
            vec!["event:HEARTBEAT", "subscribe:fw-1", "event:OFFERS", "disconnect"]
        );
    }

    #[tokio::test]
    async fn subscribed_without_payload_still_subscribes() {
        let handler = Recorder::default();
        let wire = frames(&[
            Event::of_type(event::Type::Subscribed),
            Event::of_type(event::Type::Heartbeat),
        ]);
        run(session(), stream::iter(vec![Ok(wire)]), handler.clone()).await;
        assert_eq!(
            handler.calls(),
            vec!["subscribe:", "event:HEARTBEAT", "disconnect"]
        );
    }

    #[tokio::test]
    async fn handler_failures_do_not_stop_the_loop() {
        let handler = Recorder {
            panic_on_offers: true,
            fail_on_heartbeat: true,
            ..Default::default()
        };
        let wire = frames(&[
            subscribed(),
            Event::of_type(event::Type::Offers),
            Event::of_type(event::Type::Heartbeat),
            Event::of_type(event::Type::Rescind),
        ]);
        let state = run(session(), stream::iter(vec![Ok(wire)]), handler.clone()).await;

        assert_eq!(state, SessionState::Disconnected);
        assert_eq!(
            handler.calls(),
            vec![
                "subscribe:fw-1",
                "event:OFFERS",
                "event:HEARTBEAT",
                "event:RESCIND",
                "disconnect"
            ]
        );
    }

    #[tokio::test]
    async fn truncated_stream_terminates() {
        let handler = Recorder::default();
        let mut wire = BytesMut::from(&frames(&[subscribed()])[..]);
        wire.extend_from_slice(b"100\nshort");
        let state = run(session(), stream::iter(vec![Ok(wire.freeze())]), handler.clone()).await;

        assert_eq!(state, SessionState::Terminated);
        let calls = handler.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].starts_with("terminate:event stream error"));
    }

    #[tokio::test]
    async fn close_while_waiting_for_events() {
        let handler = Recorder::default();
        let session = session();
        let chunks = stream::iter(vec![Ok(frames(&[subscribed()]))]).chain(stream::pending());

        let closer = Arc::clone(&session);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            closer.close();
        });
        let state = run(Arc::clone(&session), chunks, handler.clone()).await;

        assert_eq!(state, SessionState::Closed);
        assert_eq!(handler.calls(), vec!["subscribe:fw-1", "exit"]);
        assert!(!session.is_running());
    }

    #[tokio::test]
    async fn close_before_loop_starts() {
        let handler = Recorder::default();
        let session = session();
        session.close();
        let state = run(session, stream::pending(), handler.clone()).await;

        assert_eq!(state, SessionState::Closed);
        assert_eq!(handler.calls(), vec!["exit"]);
    }

    #[test]
    fn close_is_idempotent() {
        let session = session();
        assert!(session.close());
        assert!(!session.close());
        assert!(!session.is_running());
    }

    #[test]
    fn terminal_states() {
        assert!(SessionState::Closed.is_terminal());
        assert!(SessionState::Disconnected.is_terminal());
        assert!(SessionState::Terminated.is_terminal());
        assert!(!SessionState::Streaming.is_terminal());
        assert_eq!(SessionState::Subscribing.to_string(), "SUBSCRIBING");
    }

    #[tokio::test]
    async fn start_with_empty_master_is_config_error() {
        let result = SchedulerBuilder::new(SchedulerConfig::default())
            .start(Recorder::default())
            .await;
        assert!(matches!(result, Err(SchedulerError::Config(_))));
    }

    #[tokio::test]
    async fn start_with_failing_resolver_terminates() {
        struct NoLeader;
        impl LeaderResolver for NoLeader {
            fn resolve(&self) -> resolver::BoxFuture<'_, Result<String, crate::error::NoLeaderError>> {
                Box::pin(async { Err(crate::error::NoLeaderError::NotElected) })
            }
        }

        let handler = Recorder::default();
        let scheduler = SchedulerBuilder::new(SchedulerConfig::new("http://m1:5050"))
            .leader_resolver(NoLeader)
            .start(handler.clone())
            .await
            .unwrap();

        assert_eq!(scheduler.join().await, SessionState::Terminated);
        assert!(scheduler.remote().is_none());
        assert_eq!(scheduler.master_url(), "http://m1:5050");
        assert_eq!(
            handler.calls(),
            vec!["terminate:no leading master: an elected master cannot be found"]
        );
        // Close before a session exists does nothing.
        scheduler.close();
    }

    #[tokio::test]
    async fn framework_id_defaults_to_uuid() {
        let scheduler = SchedulerBuilder::new(SchedulerConfig::new("http://m1:5050"))
            .leader_resolver(resolver::StaticLeaderResolver("not a url".to_string()))
            .start(Recorder::default())
            .await
            .unwrap();

        assert!(uuid::Uuid::parse_str(&scheduler.framework_id().value).is_ok());
        assert_eq!(scheduler.framework_info().id.as_ref(), Some(scheduler.framework_id()));
        assert_eq!(scheduler.state(), SessionState::Terminated);
    }
}
