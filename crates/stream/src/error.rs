use serde::Deserialize;
use thiserror::Error;

/// Convenience alias for streaming results.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur on the streaming record paths.
#[derive(Debug, Error)]
pub enum Error {
    /// Log names must be non-empty; the server is authoritative beyond that.
    #[error("log name must not be empty")]
    InvalidLogName,

    /// Host and log name do not form a valid record endpoint URL.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Unrecognized whence anchor, rejected before any connection attempt.
    #[error("unrecognized whence {0:?} (expected \"origin\" or \"end\")")]
    InvalidWhence(String),

    /// The server refused to open the stream.
    #[error("stream open rejected ({status}): {message}")]
    Rejected {
        /// HTTP status of the rejected handshake.
        status: u16,
        /// Server-supplied machine-readable code, empty when absent.
        code: String,
        /// Human-readable server message.
        message: String,
    },

    /// Failure on the underlying record transport.
    #[error(transparent)]
    Transport(#[from] logwire_transport::Error),
}

impl Error {
    /// Maps a connection-open failure, decoding the server's structured
    /// `{code, message}` body out of a handshake rejection.
    pub(crate) fn from_open(error: logwire_transport::Error) -> Self {
        #[derive(Deserialize)]
        struct Body {
            code: String,
            message: String,
        }

        match error {
            logwire_transport::Error::Rejected { status, body } => {
                match serde_json::from_slice::<Body>(&body) {
                    Ok(parsed) => Self::Rejected {
                        status,
                        code: parsed.code,
                        message: parsed.message,
                    },
                    Err(_) => Self::Rejected {
                        status,
                        code: String::new(),
                        message: String::from_utf8_lossy(&body).into_owned(),
                    },
                }
            }
            other => Self::Transport(other),
        }
    }
}
