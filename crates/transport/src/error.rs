use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;

/// Convenience alias for transport results.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur on a record connection.
#[derive(Clone, Debug, Error)]
pub enum Error {
    /// The endpoint URL could not be turned into a handshake request.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The transport could not be established (DNS/TCP/handshake failure).
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The connection is closed, locally or after a failed operation.
    #[error("connection closed")]
    ConnectionClosed,

    /// The server rejected the handshake with a plain HTTP response.
    ///
    /// The body is preserved verbatim so callers can decode the server's
    /// structured error.
    #[error("handshake rejected with status {status}")]
    Rejected {
        /// HTTP status of the rejection.
        status: u16,
        /// Raw response body.
        body: Bytes,
    },

    /// I/O failure on the established stream.
    #[error("websocket i/o failure: {0}")]
    Io(Arc<std::io::Error>),
}
