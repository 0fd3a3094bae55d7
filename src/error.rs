//! Error types for the Migadu client.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Error type for all Migadu client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A required client setting was empty at construction time.
    #[error("no {0} supplied")]
    MissingField(&'static str),
    /// Underlying HTTP client error (connect, DNS, TLS, body read).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// The client-level timeout elapsed before the exchange completed.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    /// The API answered with anything other than `200 OK`.
    #[error("status code: {}, response body: {}", .status.as_u16(), String::from_utf8_lossy(.body))]
    Status {
        /// Status code returned by the API.
        status: StatusCode,
        /// Raw response body.
        body: Vec<u8>,
    },
    /// Request body could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),
    /// Response body did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),
    /// Failure of a named client operation.
    #[error("{operation}: {source}")]
    Operation {
        /// Name of the public operation that failed, e.g. `get_mailbox`.
        operation: &'static str,
        /// The underlying failure.
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error with the name of the operation that produced it.
    pub(crate) fn context(self, operation: &'static str) -> Self {
        Error::Operation {
            operation,
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through any operation wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Operation { source, .. } => source.root(),
            other => other,
        }
    }

    /// The outermost operation name, if this error was wrapped by one.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Error::Operation { operation, .. } => Some(*operation),
            _ => None,
        }
    }

    /// Status code of a non-200 response.
    pub fn status(&self) -> Option<StatusCode> {
        match self.root() {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw body of a non-200 response.
    pub fn body(&self) -> Option<&[u8]> {
        match self.root() {
            Error::Status { body, .. } => Some(body.as_slice()),
            _ => None,
        }
    }

    /// Whether the request ran out of time.
    pub fn is_timeout(&self) -> bool {
        match self.root() {
            Error::Timeout(_) => true,
            Error::Http(err) => err.is_timeout(),
            _ => false,
        }
    }
}
