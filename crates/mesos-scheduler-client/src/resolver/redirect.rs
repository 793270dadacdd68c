use http::StatusCode;
use http::header::LOCATION;
use tracing::{debug, info};

use super::{BoxFuture, LeaderResolver};
use crate::error::{NoLeaderError, TransportError};
use crate::transport::{self, HttpTransport};

/// Asks a master's `/redirect` endpoint where the leader is.
///
/// A leading or non-leading master answers `307` with a scheme-relative
/// `Location` (`//host:port`); `503` means no leader is elected.
#[derive(Clone)]
pub struct HttpLeaderResolver {
    master_url: String,
    transport: HttpTransport,
}

impl HttpLeaderResolver {
    pub fn new(master_url: impl Into<String>, transport: HttpTransport) -> Self {
        let master_url = master_url.into().trim_end_matches('/').to_string();
        Self {
            master_url,
            transport,
        }
    }

    async fn probe(&self) -> Result<String, NoLeaderError> {
        let url = format!("{}/redirect", self.master_url);
        let uri = transport::parse_uri(&url).map_err(no_leader)?;
        let scheme = uri.scheme_str().unwrap_or("http").to_string();

        debug!(%url, "probing for leading master");
        let response = self.transport.get(&uri).await.map_err(no_leader)?;

        match response.status() {
            StatusCode::TEMPORARY_REDIRECT => {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .filter(|v| !v.is_empty())
                    .ok_or(NoLeaderError::MissingLocation)?;
                let leader = format!("{scheme}:{location}");
                info!(%leader, "discovered leading master");
                Ok(leader)
            }
            StatusCode::SERVICE_UNAVAILABLE => Err(NoLeaderError::NotElected),
            status => Err(NoLeaderError::UnexpectedStatus(status.as_u16())),
        }
    }
}

fn no_leader(err: TransportError) -> NoLeaderError {
    match err {
        TransportError::InvalidUrl(msg) => NoLeaderError::InvalidUrl(msg),
        other => other.into(),
    }
}

impl LeaderResolver for HttpLeaderResolver {
    fn resolve(&self) -> BoxFuture<'_, Result<String, NoLeaderError>> {
        Box::pin(self.probe())
    }
}
