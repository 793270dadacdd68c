//! Error types for the scheduler client.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for scheduler lifecycle operations.
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Failures of a single HTTP exchange with a master.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("tls error: {0}")]
    Tls(String),

    #[error("http error: {0}")]
    Http(#[from] hyper::Error),

    #[error("request error: {0}")]
    Request(#[from] http::Error),
}

/// The leading master could not be determined.
#[derive(Debug, Error)]
pub enum NoLeaderError {
    #[error("an elected master cannot be found")]
    NotElected,

    #[error("master redirect is missing a Location header")]
    MissingLocation,

    #[error("unable to determine the current leader (status {0})")]
    UnexpectedStatus(u16),

    #[error("invalid master url: {0}")]
    InvalidUrl(String),

    #[error("invalid master info: {0}")]
    InvalidMasterInfo(String),

    #[error("no coordination store configured for {0}")]
    CoordinationUnavailable(String),

    #[error("coordination store error: {0}")]
    Coordination(String),

    #[error("leader probe failed: {0}")]
    Transport(#[from] TransportError),
}

/// The subscription stream could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid record length {0:?}")]
    InvalidLength(String),

    #[error("record length line exceeds {limit} bytes")]
    LengthLineTooLong { limit: usize },

    #[error("record of {len} bytes exceeds maximum {limit}")]
    RecordTooLarge { len: usize, limit: usize },

    #[error("stream ended inside a record ({buffered} bytes buffered)")]
    Truncated { buffered: usize },

    #[error("invalid event payload: {0}")]
    Payload(#[from] prost::DecodeError),

    #[error("stream read error: {0}")]
    Io(#[from] std::io::Error),
}

/// A call was not accepted by the master.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("master rejected call with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("call could not be delivered: {0}")]
    Transport(#[from] TransportError),
}

/// Invalid or unreadable scheduler configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("master_url configuration is required")]
    MissingMaster,

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Errors surfaced by the scheduler lifecycle.
///
/// Anything raised before the stream opens reaches the handler through
/// `on_terminate`; during streaming only decode and transport failures
/// end the session.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("no leading master: {0}")]
    NoLeader(#[from] NoLeaderError),

    #[error("scheduler was unable to subscribe (status {status}): {body}")]
    Subscribe { status: u16, body: String },

    #[error("subscribe response is missing the Mesos-Stream-Id header")]
    MissingStreamId,

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("event stream error: {0}")]
    Decode(#[from] DecodeError),

    #[error("error subscribing to master: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_leader_wraps_into_scheduler_error() {
        let err: SchedulerError = NoLeaderError::NotElected.into();
        assert!(matches!(err, SchedulerError::NoLeader(NoLeaderError::NotElected)));
        assert_eq!(
            err.to_string(),
            "no leading master: an elected master cannot be found"
        );
    }

    #[test]
    fn config_error_is_transparent() {
        let err: SchedulerError = ConfigError::MissingMaster.into();
        assert_eq!(err.to_string(), "master_url configuration is required");
    }

    #[test]
    fn decode_error_messages() {
        let err = DecodeError::RecordTooLarge { len: 10, limit: 4 };
        assert_eq!(err.to_string(), "record of 10 bytes exceeds maximum 4");
    }
}
