use serde::Deserialize;
use thiserror::Error;

/// Convenience alias for client results.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the administrative client.
#[derive(Debug, Error)]
pub enum Error {
    /// The server explicitly rejected the request.
    #[error("server error (status {status}, code {code:?}): {message}")]
    Api {
        /// HTTP status of the response.
        status: u16,
        /// Server-supplied machine-readable code, empty when absent.
        code: String,
        /// Human-readable server message.
        message: String,
    },

    /// The HTTP request itself failed.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Copying backup bytes into the caller's sink failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Opening a streaming producer or consumer failed.
    #[error(transparent)]
    Stream(#[from] logwire_stream::Error),
}

impl Error {
    /// Builds an [`Error::Api`] from a non-success response body, decoding
    /// the server's `{code, message}` JSON when present.
    pub(crate) fn api(status: u16, body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct Body {
            code: String,
            message: String,
        }

        match serde_json::from_slice::<Body>(body) {
            Ok(parsed) => Self::Api {
                status,
                code: parsed.code,
                message: parsed.message,
            },
            Err(_) => Self::Api {
                status,
                code: String::new(),
                message: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }
}
