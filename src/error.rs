use std::{
    fmt::{Display, Formatter},
    str::Utf8Error,
};
use thiserror::Error;

/// All error kinds
#[derive(Debug, Error)]
pub enum Error {
    /// Raised if an error occurs within the driver
    #[error("Client error: {0}")]
    Client(String),
    /// Raised if an error occurs in the [`Config`](crate::client::Config) parsing
    #[error("Config error: {0}")]
    Config(String),
    /// Error returned by the Redis server
    #[error("Redis error: {0}")]
    Redis(RedisError),
    /// The reply stream could not be aligned with the wire protocol
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    /// A failure raised inside or around a pipeline scope, carrying its cause
    #[error("Pipeline error: {0}")]
    Pipeline(#[source] Box<Error>),
    /// IO error when reaching the Redis server
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Utf8Error> for Error {
    fn from(e: Utf8Error) -> Self {
        Error::Client(e.to_string())
    }
}

impl Error {
    /// After one of these the stream is no longer assumed aligned and the
    /// transport must be disconnected before further use.
    pub(crate) fn invalidates_connection(&self) -> bool {
        matches!(self, Error::MalformedResponse(_) | Error::Io(_))
    }
}

/// Error issued by the Redis server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisError {
    pub message: String,
}

impl From<&str> for RedisError {
    /// Builds an error from the text of a `-` reply line. The first 4 bytes
    /// (the conventional `ERR ` prefix) are always dropped.
    fn from(line: &str) -> Self {
        Self {
            message: line.get(4..).unwrap_or_default().to_owned(),
        }
    }
}

impl Display for RedisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
