//! In-process fake Mesos master for integration tests.

#![allow(dead_code)]

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;
use axum::routing::{get, post};
use futures_util::stream;
use mesos_scheduler_client::proto::{Call, Event, FrameworkId, Message, call, event};
use mesos_scheduler_client::{EventHandler, RemoteHandle, SchedulerError, encode_record};
use tokio::sync::mpsc;

pub const STREAM_ID: &str = "stream-1";

struct MasterState {
    redirect_status: StatusCode,
    redirect_location: Option<String>,
    subscribe_status: StatusCode,
    stream_id: Option<String>,
    call_status: StatusCode,
    events: Option<mpsc::UnboundedReceiver<Bytes>>,
    calls: Vec<RecordedCall>,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub call: Call,
    pub stream_id: Option<String>,
    pub accept: Option<String>,
}

/// A master serving `/redirect` and `/api/v1/scheduler` on 127.0.0.1.
pub struct FakeMaster {
    pub addr: SocketAddr,
    state: Arc<Mutex<MasterState>>,
    events_tx: Mutex<Option<mpsc::UnboundedSender<Bytes>>>,
}

impl FakeMaster {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let state = Arc::new(Mutex::new(MasterState {
            redirect_status: StatusCode::TEMPORARY_REDIRECT,
            redirect_location: Some(format!("//{addr}")),
            subscribe_status: StatusCode::OK,
            stream_id: Some(STREAM_ID.to_string()),
            call_status: StatusCode::ACCEPTED,
            events: Some(events_rx),
            calls: Vec::new(),
        }));

        let router = Router::new()
            .route("/redirect", get(redirect))
            .route("/api/v1/scheduler", post(scheduler_api))
            .with_state(Arc::clone(&state));
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Self {
            addr,
            state,
            events_tx: Mutex::new(Some(events_tx)),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn set_redirect(&self, status: StatusCode, location: Option<&str>) {
        let mut state = self.state.lock().unwrap();
        state.redirect_status = status;
        state.redirect_location = location.map(str::to_string);
    }

    pub fn set_subscribe_status(&self, status: StatusCode) {
        self.state.lock().unwrap().subscribe_status = status;
    }

    pub fn set_stream_id(&self, stream_id: Option<&str>) {
        self.state.lock().unwrap().stream_id = stream_id.map(str::to_string);
    }

    pub fn set_call_status(&self, status: StatusCode) {
        self.state.lock().unwrap().call_status = status;
    }

    /// Push an event onto the subscription stream.
    pub fn send(&self, event: &Event) {
        self.send_raw(encode_record(&event.encode_to_vec()));
    }

    pub fn send_raw(&self, bytes: Bytes) {
        if let Some(tx) = self.events_tx.lock().unwrap().as_ref() {
            tx.send(bytes).unwrap();
        }
    }

    /// End the subscription stream.
    pub fn end_stream(&self) {
        self.events_tx.lock().unwrap().take();
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Wait until a call of the given type has been received.
    pub async fn wait_for_call(&self, ty: call::Type) -> RecordedCall {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(found) = self.calls().into_iter().find(|c| c.call.r#type() == ty) {
                return found;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "no {} call received",
                ty.as_str_name()
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}

async fn redirect(State(state): State<Arc<Mutex<MasterState>>>) -> Response {
    let state = state.lock().unwrap();
    let mut response = axum::http::Response::builder().status(state.redirect_status);
    if let Some(location) = &state.redirect_location {
        response = response.header(header::LOCATION, location);
    }
    response.body(Body::empty()).unwrap()
}

async fn scheduler_api(
    State(state): State<Arc<Mutex<MasterState>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let call = Call::decode(body).unwrap();
    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    let mut state = state.lock().unwrap();
    state.calls.push(RecordedCall {
        call: call.clone(),
        stream_id: header_value("mesos-stream-id"),
        accept: header_value("accept"),
    });

    if call.r#type() != call::Type::Subscribe {
        return axum::http::Response::builder()
            .status(state.call_status)
            .body(Body::from(if state.call_status.is_success() {
                ""
            } else {
                "call rejected"
            }))
            .unwrap();
    }

    if state.subscribe_status != StatusCode::OK {
        return axum::http::Response::builder()
            .status(state.subscribe_status)
            .body(Body::from("framework is not allowed"))
            .unwrap();
    }

    let Some(events) = state.events.take() else {
        return axum::http::Response::builder()
            .status(StatusCode::CONFLICT)
            .body(Body::from("already subscribed"))
            .unwrap();
    };
    let body = stream::unfold(events, |mut rx| async move {
        rx.recv().await.map(|bytes| (Ok::<_, Infallible>(bytes), rx))
    });

    let mut response = axum::http::Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/recordio");
    if let Some(stream_id) = &state.stream_id {
        response = response.header("mesos-stream-id", stream_id);
    }
    response.body(Body::from_stream(body)).unwrap()
}

/// Callback observed by a test.
#[derive(Debug)]
pub enum Note {
    Subscribed(RemoteHandle, event::Subscribed),
    Event(Event),
    Disconnected,
    Terminated(SchedulerError),
    Exited,
}

/// Forwards every callback to a channel.
pub struct Probe {
    tx: mpsc::UnboundedSender<Note>,
}

impl Probe {
    pub fn new() -> (Self, Notes) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, Notes { rx })
    }
}

impl EventHandler for Probe {
    async fn on_subscribe(
        &mut self,
        remote: RemoteHandle,
        subscribed: event::Subscribed,
    ) -> anyhow::Result<()> {
        let _ = self.tx.send(Note::Subscribed(remote, subscribed));
        Ok(())
    }

    async fn on_event(&mut self, event: Event) -> anyhow::Result<()> {
        let _ = self.tx.send(Note::Event(event));
        Ok(())
    }

    async fn on_disconnect(&mut self) {
        let _ = self.tx.send(Note::Disconnected);
    }

    async fn on_terminate(&mut self, error: SchedulerError) {
        let _ = self.tx.send(Note::Terminated(error));
    }

    async fn on_exit(&mut self) {
        let _ = self.tx.send(Note::Exited);
    }
}

pub struct Notes {
    rx: mpsc::UnboundedReceiver<Note>,
}

impl Notes {
    pub async fn next(&mut self) -> Note {
        tokio::time::timeout(Duration::from_secs(5), self.rx.recv())
            .await
            .expect("timed out waiting for a callback")
            .expect("handler dropped")
    }

    /// Whether another callback arrives within a short grace period.
    pub async fn is_quiet(&mut self) -> bool {
        !matches!(
            tokio::time::timeout(Duration::from_millis(100), self.rx.recv()).await,
            Ok(Some(_))
        )
    }
}

pub fn subscribed_event(framework_id: &FrameworkId) -> Event {
    Event::subscribed(framework_id.clone(), Some(15.0))
}

/// A port on 127.0.0.1 with nothing listening.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}
