//! Streaming record paths for the log service.
//!
//! A [`Producer`] appends records to a named log; a [`Consumer`] replays
//! records from an arbitrary [`Position`] forward, optionally following new
//! appends in real time. Both ride one persistent record connection from
//! `logwire-transport`.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod consumer;
mod error;
mod position;
mod producer;

pub use consumer::Consumer;
pub use error::{Error, Result};
pub use position::{Position, UNBOUNDED, Whence};
pub use producer::Producer;

use url::Url;

/// Builds the record endpoint for `log` on `host`.
fn records_url(host: &str, log: &str) -> Result<Url> {
    if log.is_empty() {
        return Err(Error::InvalidLogName);
    }

    Url::parse(&format!("ws://{host}/logs/{log}/records"))
        .map_err(|e| Error::InvalidAddress(e.to_string()))
}
