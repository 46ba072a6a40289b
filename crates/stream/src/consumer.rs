use bytes::Bytes;
use futures::Stream;
use logwire_transport::{Connection, Direction, Received};
use tracing::debug;

use crate::error::{Error, Result};
use crate::position::Position;
use crate::records_url;

/// Read-direction handle on one log: a lazy, in-order sequence of records.
///
/// A consumer is a single cursor. Once exhausted or closed it cannot be
/// restarted; open a new one with an explicit [`Position`] instead.
pub struct Consumer {
    connection: Connection,
}

impl std::fmt::Debug for Consumer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Consumer")
            .field("connection", &self.connection)
            .finish_non_exhaustive()
    }
}

impl Consumer {
    /// Opens a read stream on `log` at `position`.
    ///
    /// # Errors
    ///
    /// Fails before any connection attempt on an invalid log name, with
    /// [`Error::Rejected`] when the server refuses the stream (for example
    /// an unknown log), and with a transport error when the connection
    /// cannot be established.
    pub async fn connect(host: &str, log: &str, position: Position) -> Result<Self> {
        let mut url = records_url(host, log)?;
        position.apply(&mut url);

        debug!(log, ?position, "opening consumer");

        let connection = Connection::open(&url, Direction::Read)
            .await
            .map_err(Error::from_open)?;

        Ok(Self { connection })
    }

    /// Pulls the next record in log order.
    ///
    /// Returns `Ok(None)` exactly when the server closed the stream
    /// gracefully (bounded replay satisfied, or the log went away); that is
    /// the only "no more records" signal, and it repeats on every subsequent
    /// call. Anything else surfaces as an error, never as `None` — hiding a
    /// dropped connection behind end-of-stream would mask lost records.
    ///
    /// In follow mode this blocks without a timeout until a record arrives;
    /// [`Consumer::close`] from another task is the way to unblock it.
    ///
    /// # Errors
    ///
    /// Propagates the underlying transport error unchanged.
    pub async fn read(&self) -> Result<Option<Bytes>> {
        match self.connection.recv().await? {
            Received::Record(record) => Ok(Some(record)),
            Received::EndOfStream => Ok(None),
        }
    }

    /// Consumes the handle into a lazy stream of records.
    ///
    /// Finite when the read position is bounded, infinite in follow mode
    /// until the server closes the stream or the stream is dropped.
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes>> {
        async_stream::try_stream! {
            while let Some(record) = self.read().await? {
                yield record;
            }
        }
    }

    /// Closes the underlying session.
    ///
    /// Idempotent, callable from any task, and unblocks a pending
    /// [`Consumer::read`].
    pub async fn close(&self) {
        self.connection.close().await;
    }
}
