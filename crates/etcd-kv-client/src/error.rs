use std::path::PathBuf;

pub type Result<O> = std::result::Result<O, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("rpc failed: {0}")]
    Transport(#[from] tonic::Status),
    #[error("failed to connect: {0}")]
    Connect(#[from] tonic::transport::Error),
    #[error("invalid endpoint: {0}")]
    Address(#[from] crate::address::Error),
    #[error("failed to read ca certificate {path:?}: {source}")]
    Certificate {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("https endpoint {0} given without a ca certificate")]
    MissingCertificate(String),
    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),
}

impl Error {
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Error::Protocol(_))
    }
}

/// A response from the server that cannot happen under the watch protocol.
///
/// These indicate a version or transport mismatch and end the affected watch.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolViolation {
    #[error("watch {watch_id} was acknowledged with {count} events attached")]
    CreatedWithEvents { watch_id: i64, count: usize },
    #[error("received {count} events before the watch was acknowledged")]
    EventsBeforeCreated { count: usize },
    #[error("watch {watch_id} was acknowledged twice")]
    DuplicateCreated { watch_id: i64 },
    #[error("unknown event type {0}")]
    UnknownEventType(i32),
    #[error("event is missing its key-value")]
    MissingKeyValue,
    #[error("previous key-value belongs to a different key")]
    MismatchedPreviousKey,
}
