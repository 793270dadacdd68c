//! HTTP/1.1 transport to the masters.
//!
//! Every exchange opens its own connection (plain TCP or rustls) and
//! drives it with `hyper::client::conn::http1`. Subscribe responses keep
//! their connection alive for as long as the body is being read, so
//! calls never share a connection with the event stream.

use std::sync::Arc;

use bytes::Bytes;
use http::header::{self, HeaderName, HeaderValue};
use http::{Method, Request, Response, Uri};
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::Incoming;
use hyper_util::rt::TokioIo;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tracing::debug;

use crate::error::TransportError;
use crate::tls;

/// Content type of every protobuf request and response body.
pub const PROTOBUF: &str = "application/x-protobuf";

/// Header carrying the session token issued on subscribe.
pub const STREAM_ID_HEADER: HeaderName = HeaderName::from_static("mesos-stream-id");

/// Upper bound on a diagnostic body read from an error response.
const MAX_ERROR_BODY: usize = 64 * 1024;

trait Io: AsyncRead + AsyncWrite + Unpin + Send {}
impl<T: AsyncRead + AsyncWrite + Unpin + Send> Io for T {}

/// Connection factory shared by the resolver, the subscriber and calls.
#[derive(Clone)]
pub struct HttpTransport {
    tls: Arc<rustls::ClientConfig>,
}

impl HttpTransport {
    pub fn new(disable_tls_verification: bool) -> Result<Self, TransportError> {
        Ok(Self {
            tls: tls::client_config(disable_tls_verification)?,
        })
    }

    /// `GET uri` without following redirects.
    pub async fn get(&self, uri: &Uri) -> Result<Response<Incoming>, TransportError> {
        self.request(Method::GET, uri, &[], Bytes::new()).await
    }

    /// `POST uri` with a protobuf body.
    pub async fn post(
        &self,
        uri: &Uri,
        headers: &[(HeaderName, &str)],
        body: Vec<u8>,
    ) -> Result<Response<Incoming>, TransportError> {
        let mut all = Vec::with_capacity(headers.len() + 1);
        all.push((header::CONTENT_TYPE, PROTOBUF));
        all.extend(headers.iter().cloned());
        self.request(Method::POST, uri, &all, Bytes::from(body)).await
    }

    async fn request(
        &self,
        method: Method,
        uri: &Uri,
        headers: &[(HeaderName, &str)],
        body: Bytes,
    ) -> Result<Response<Incoming>, TransportError> {
        let https = match uri.scheme_str() {
            Some("http") => false,
            Some("https") => true,
            _ => return Err(TransportError::InvalidUrl(format!("unsupported scheme in {uri}"))),
        };
        let authority = uri
            .authority()
            .ok_or_else(|| TransportError::InvalidUrl(format!("missing host in {uri}")))?;
        let host = authority.host().trim_start_matches('[').trim_end_matches(']');
        let port = authority.port_u16().unwrap_or(if https { 443 } else { 80 });

        let stream = TcpStream::connect((host, port))
            .await
            .map_err(|source| TransportError::Connect {
                addr: format!("{host}:{port}"),
                source,
            })?;
        let _ = stream.set_nodelay(true);

        let io: Box<dyn Io> = if https {
            let server_name = rustls::pki_types::ServerName::try_from(host.to_string())
                .map_err(|e| TransportError::Tls(format!("invalid server name '{host}': {e}")))?;
            let tls_stream = TlsConnector::from(Arc::clone(&self.tls))
                .connect(server_name, stream)
                .await
                .map_err(|e| TransportError::Tls(format!("handshake with {host}:{port}: {e}")))?;
            Box::new(tls_stream)
        } else {
            Box::new(stream)
        };

        let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(io)).await?;

        // Drive the connection in the background; it ends when the
        // response body is dropped or fully read.
        let addr = format!("{host}:{port}");
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                debug!(%addr, error = %e, "master connection closed with error");
            }
        });

        let path = uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::HOST, authority.as_str());
        for (name, value) in headers {
            builder = builder.header(name, HeaderValue::from_str(value).map_err(http::Error::from)?);
        }
        let req = builder.body(Full::new(body))?;

        Ok(sender.send_request(req).await?)
    }
}

/// Parse a URL into a `Uri`.
pub fn parse_uri(url: &str) -> Result<Uri, TransportError> {
    url.parse::<Uri>()
        .map_err(|e| TransportError::InvalidUrl(format!("{url}: {e}")))
}

/// Read at most 64 KiB of an error response for diagnostics.
pub async fn read_error_body(body: Incoming) -> String {
    match Limited::new(body, MAX_ERROR_BODY).collect().await {
        Ok(collected) => String::from_utf8_lossy(&collected.to_bytes()).into_owned(),
        Err(e) => format!("<body unavailable: {e}>"),
    }
}
