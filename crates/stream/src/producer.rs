use bytes::Bytes;
use logwire_transport::{Connection, Direction};
use tracing::debug;

use crate::error::{Error, Result};
use crate::records_url;

/// Write-direction handle on one log: appends records at the current tail.
///
/// A failed write leaves the producer errored and every later write fails.
/// There is no automatic retry or reconnect — this side cannot know whether
/// the failed record was partially accepted, so resuming is the caller's
/// decision via a fresh producer.
pub struct Producer {
    connection: Connection,
}

impl std::fmt::Debug for Producer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Producer")
            .field("connection", &self.connection)
            .finish_non_exhaustive()
    }
}

impl Producer {
    /// Opens an append stream on `log`. No position semantics apply to
    /// writes; the server always appends at the tail.
    ///
    /// # Errors
    ///
    /// Fails before any connection attempt on an invalid log name, with
    /// [`Error::Rejected`] when the server refuses the stream, and with a
    /// transport error when the connection cannot be established.
    pub async fn connect(host: &str, log: &str) -> Result<Self> {
        let url = records_url(host, log)?;

        debug!(log, "opening producer");

        let connection = Connection::open(&url, Direction::Write)
            .await
            .map_err(Error::from_open)?;

        Ok(Self { connection })
    }

    /// Appends one record; one call is exactly one record boundary.
    ///
    /// Returns once the transport has accepted the message for
    /// transmission. Server-side durability, if any, is the server's
    /// contract, not this client's.
    ///
    /// # Errors
    ///
    /// Propagates the underlying transport error unchanged.
    pub async fn write(&self, record: Bytes) -> Result<()> {
        self.connection.send(record).await?;
        Ok(())
    }

    /// Currently a no-op: every write is transmitted individually with no
    /// client-side buffering. Hook for a future buffering strategy.
    ///
    /// # Errors
    ///
    /// Never fails today.
    pub async fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Closes the underlying session; idempotent.
    pub async fn close(&self) {
        self.connection.close().await;
    }
}
