//! WebSocket record transport for the log service.
//!
//! One [`Connection`] owns one persistent stream bound to one log in one
//! direction. Message framing is record framing: every message carries
//! exactly one record, never split and never coalesced.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;

pub use error::{Error, Result};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Header signaling append intent on the record endpoint.
const METHOD_OVERRIDE_HEADER: &str = "x-http-method-override";

/// Direction of a record connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// The connection replays records from the server.
    Read,
    /// The connection appends records to the server.
    Write,
}

/// Outcome of a single receive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Received {
    /// One record, in log order.
    Record(Bytes),
    /// The peer closed the stream gracefully; no more records will arrive.
    EndOfStream,
}

/// One persistent record stream bound to a single log.
///
/// Not safe for concurrent same-direction calls from multiple tasks without
/// external serialization: one connection is one logical cursor (read) or
/// one logical append stream (write).
pub struct Connection {
    sink: Mutex<SplitSink<WsStream, Message>>,
    stream: Mutex<SplitStream<WsStream>>,
    cancel: CancellationToken,
    closed: AtomicBool,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl Connection {
    /// Opens a record stream to `url` in the given direction.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidAddress`] when the URL cannot form a
    /// handshake request, [`Error::Rejected`] when the server answers the
    /// handshake with a non-success HTTP response, and
    /// [`Error::ConnectionFailed`] for any other establishment failure. The
    /// latter two must stay distinguishable: a failed transport is always
    /// retryable by the caller, a rejection only sometimes is.
    pub async fn open(url: &Url, direction: Direction) -> Result<Self> {
        let mut request = url
            .as_str()
            .into_client_request()
            .map_err(|e| Error::InvalidAddress(e.to_string()))?;

        if direction == Direction::Write {
            request
                .headers_mut()
                .insert(METHOD_OVERRIDE_HEADER, HeaderValue::from_static("POST"));
        }

        debug!(%url, ?direction, "opening record stream");

        let (ws, _) = connect_async(request).await.map_err(|e| match e {
            tungstenite::Error::Http(response) => {
                let status = response.status().as_u16();
                let body = response.into_body().map(Bytes::from).unwrap_or_default();
                Error::Rejected { status, body }
            }
            other => Error::ConnectionFailed(other.to_string()),
        })?;

        let (sink, stream) = ws.split();

        Ok(Self {
            sink: Mutex::new(sink),
            stream: Mutex::new(stream),
            cancel: CancellationToken::new(),
            closed: AtomicBool::new(false),
        })
    }

    /// Transmits one record as exactly one message.
    ///
    /// Suspends only while the transport's outbound buffer is full. A
    /// transport failure here poisons the connection: subsequent calls fail
    /// with [`Error::ConnectionClosed`], and the caller must open a new
    /// connection to resume.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`] on a closed connection and
    /// [`Error::Io`] on transport failure.
    pub async fn send(&self, record: Bytes) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::ConnectionClosed);
        }

        tokio::select! {
            () = self.cancel.cancelled() => Err(Error::ConnectionClosed),
            result = async {
                let mut sink = self.sink.lock().await;
                sink.send(Message::Binary(record)).await
            } => result.map_err(|e| {
                self.closed.store(true, Ordering::Release);
                match e {
                    tungstenite::Error::ConnectionClosed
                    | tungstenite::Error::AlreadyClosed => Error::ConnectionClosed,
                    other => Error::Io(Arc::new(std::io::Error::other(other))),
                }
            }),
        }
    }

    /// Blocks until the next record arrives, the peer closes gracefully, or
    /// a transport error fires.
    ///
    /// Graceful closure yields [`Received::EndOfStream`] on this and every
    /// subsequent call; it is never reported as an error. An in-flight
    /// receive interrupted by [`Connection::close`] resolves with
    /// [`Error::ConnectionClosed`] instead of hanging.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConnectionClosed`] when cancelled and [`Error::Io`]
    /// on transport failure. A genuine transport failure is never coerced
    /// into [`Received::EndOfStream`].
    pub async fn recv(&self) -> Result<Received> {
        if self.closed.load(Ordering::Acquire) {
            return Ok(Received::EndOfStream);
        }

        tokio::select! {
            () = self.cancel.cancelled() => Err(Error::ConnectionClosed),
            received = self.next_message() => received,
        }
    }

    async fn next_message(&self) -> Result<Received> {
        let mut stream = self.stream.lock().await;
        loop {
            match stream.next().await {
                Some(Ok(Message::Binary(data))) => return Ok(Received::Record(data)),
                Some(Ok(Message::Text(text))) => return Ok(Received::Record(Bytes::from(text))),
                Some(Ok(Message::Close(_)))
                | Some(Err(tungstenite::Error::ConnectionClosed))
                | None => {
                    self.closed.store(true, Ordering::Release);
                    return Ok(Received::EndOfStream);
                }
                // Ping/pong and control frames are transport noise, not records.
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(Error::Io(Arc::new(std::io::Error::other(e)))),
            }
        }
    }

    /// Initiates orderly shutdown.
    ///
    /// Idempotent and callable from any task, including while a `send` or
    /// `recv` is outstanding on another one; those calls resolve instead of
    /// hanging. The socket is released exactly once.
    pub async fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        self.cancel.cancel();

        debug!("closing record stream");

        let mut sink = self.sink.lock().await;
        let _ = sink.close().await;
    }
}
