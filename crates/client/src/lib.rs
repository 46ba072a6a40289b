//! HTTP client for the log service's administrative surface, plus
//! conveniences for opening streaming producers and consumers.
//!
//! Every operation is fire-once by contract: no retries, no backoff. A
//! non-success response surfaces the server's `{code, message}` verdict
//! verbatim as [`Error::Api`]. Resilience layered on top of this client
//! must account for duplicate-append risk itself.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;
mod types;

pub use error::{Error, Result};
pub use types::{LogConfig, LogInfo, ProduceAck};

pub use logwire_stream::{Consumer, Position, Producer, UNBOUNDED, Whence};

use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Host:port of a locally run service instance.
pub const DEFAULT_HOST: &str = "localhost:7123";

/// Client for one log service instance, addressed by `host` (address:port).
///
/// Cheap to clone; the underlying HTTP connection pool is shared.
#[derive(Clone, Debug)]
pub struct LogClient {
    http: Client,
    host: String,
}

impl Default for LogClient {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}

impl LogClient {
    /// Creates a client addressing the service at `host`.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            host: host.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.host)
    }

    /// Lists every log on the server.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] on a non-success response, [`Error::Http`] on
    /// transport failure.
    pub async fn list_logs(&self) -> Result<Vec<LogInfo>> {
        let response = self.http.get(self.url("/logs")).send().await?;
        Ok(ok(response).await?.json().await?)
    }

    /// Fetches the descriptor of one log.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] on a non-success response (including unknown logs),
    /// [`Error::Http`] on transport failure.
    pub async fn get_log(&self, name: &str) -> Result<LogInfo> {
        let response = self.http.get(self.url(&format!("/logs/{name}"))).send().await?;
        Ok(ok(response).await?.json().await?)
    }

    /// Creates a log named `name` with the given options.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] on a non-success response, [`Error::Http`] on
    /// transport failure.
    pub async fn create_log(&self, name: &str, config: &LogConfig) -> Result<LogInfo> {
        #[derive(Serialize)]
        struct Body<'a> {
            name: &'a str,
            #[serde(flatten)]
            config: &'a LogConfig,
        }

        debug!(name, "creating log");

        let response = self
            .http
            .post(self.url("/logs"))
            .form(&Body { name, config })
            .send()
            .await?;
        Ok(ok(response).await?.json().await?)
    }

    /// Deletes a log and all its records.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] on a non-success response, [`Error::Http`] on
    /// transport failure.
    pub async fn delete_log(&self, name: &str) -> Result<()> {
        debug!(name, "deleting log");

        let response = self
            .http
            .delete(self.url(&format!("/logs/{name}")))
            .send()
            .await?;
        ok(response).await?;
        Ok(())
    }

    /// Truncates a log, dropping every record while keeping the log itself.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] on a non-success response, [`Error::Http`] on
    /// transport failure.
    pub async fn truncate_log(&self, name: &str) -> Result<()> {
        debug!(name, "truncating log");

        let response = self
            .http
            .post(self.url(&format!("/logs/{name}/truncate")))
            .send()
            .await?;
        ok(response).await?;
        Ok(())
    }

    /// Copies the log's backup byte stream into `sink`, chunk by chunk.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] on a non-success response, [`Error::Http`] on
    /// transport failure, [`Error::Io`] when the sink refuses bytes.
    pub async fn backup_log(
        &self,
        name: &str,
        sink: &mut (impl AsyncWrite + Unpin),
    ) -> Result<()> {
        let response = self
            .http
            .get(self.url(&format!("/logs/{name}/backup")))
            .send()
            .await?;
        let mut chunks = ok(response).await?.bytes_stream();

        while let Some(chunk) = chunks.try_next().await? {
            sink.write_all(&chunk).await?;
        }
        sink.flush().await?;

        Ok(())
    }

    /// Restores a log named `name` from a backup byte stream.
    ///
    /// `body` can be anything convertible into a request body: in-memory
    /// bytes, a file, or a wrapped stream.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] on a non-success response, [`Error::Http`] on
    /// transport failure.
    pub async fn restore_log(&self, name: &str, body: impl Into<reqwest::Body>) -> Result<()> {
        debug!(name, "restoring log");

        let response = self
            .http
            .post(self.url("/logs/restore"))
            .query(&[("name", name)])
            .body(body)
            .send()
            .await?;
        ok(response).await?;
        Ok(())
    }

    /// Appends one record without a persistent stream.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] on a non-success response, [`Error::Http`] on
    /// transport failure.
    pub async fn produce(&self, name: &str, record: Bytes) -> Result<ProduceAck> {
        let response = self
            .http
            .post(self.url(&format!("/logs/{name}/records")))
            .body(record)
            .send()
            .await?;
        Ok(ok(response).await?.json().await?)
    }

    /// Reads one record without a persistent stream.
    ///
    /// # Errors
    ///
    /// [`Error::Api`] on a non-success response, [`Error::Http`] on
    /// transport failure.
    pub async fn consume(&self, name: &str, whence: Whence, position: i64) -> Result<Bytes> {
        let response = self
            .http
            .get(self.url(&format!("/logs/{name}/records")))
            .query(&[
                ("whence", whence.as_str().to_owned()),
                ("position", position.to_string()),
            ])
            .send()
            .await?;
        Ok(ok(response).await?.bytes().await?)
    }

    /// Opens a streaming producer on `name`, bound to this client's host.
    ///
    /// # Errors
    ///
    /// [`Error::Stream`] when the stream cannot be opened.
    pub async fn producer(&self, name: &str) -> Result<Producer> {
        Ok(Producer::connect(&self.host, name).await?)
    }

    /// Opens a streaming consumer on `name` at `position`, bound to this
    /// client's host.
    ///
    /// # Errors
    ///
    /// [`Error::Stream`] when the stream cannot be opened.
    pub async fn consumer(&self, name: &str, position: Position) -> Result<Consumer> {
        Ok(Consumer::connect(&self.host, name, position).await?)
    }
}

/// Resolves a non-success response into the server's structured error.
async fn ok(response: Response) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    Err(Error::api(status.as_u16(), &body))
}
