use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::error::{Error, Result};

/// Count value requesting delivery without an upper bound.
pub const UNBOUNDED: i64 = -1;

/// Anchor a read position is relative to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Whence {
    /// Absolute offset 0 of the log.
    Origin,
    /// The log's tail at stream-open time.
    End,
}

impl Whence {
    /// Wire name of the anchor.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::End => "end",
        }
    }
}

impl fmt::Display for Whence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Whence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "origin" => Ok(Self::Origin),
            "end" => Ok(Self::End),
            other => Err(Error::InvalidWhence(other.to_string())),
        }
    }
}

/// Where a consumer's cursor begins and how far it runs.
///
/// The default is a live tail: start at the end of the log and follow new
/// appends without bound. The offset interpretation is owned by the server;
/// a bounded `count` is likewise enforced by the server closing the stream
/// once satisfied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    /// Anchor the offset is relative to.
    pub whence: Whence,
    /// Signed offset relative to the anchor.
    pub position: i64,
    /// Maximum records to deliver, or [`UNBOUNDED`].
    pub count: i64,
    /// Keep the stream open and block for new appends once caught up.
    pub follow: bool,
}

impl Default for Position {
    fn default() -> Self {
        Self::tail()
    }
}

impl Position {
    /// Live tail: start at the end of the log and follow new appends.
    #[must_use]
    pub const fn tail() -> Self {
        Self {
            whence: Whence::End,
            position: 0,
            count: UNBOUNDED,
            follow: true,
        }
    }

    /// Full replay: every existing record from the first one, then end.
    #[must_use]
    pub const fn origin() -> Self {
        Self {
            whence: Whence::Origin,
            position: 0,
            count: UNBOUNDED,
            follow: false,
        }
    }

    /// Sets the offset relative to the anchor.
    #[must_use]
    pub const fn at(mut self, position: i64) -> Self {
        self.position = position;
        self
    }

    /// Bounds delivery to at most `count` records.
    #[must_use]
    pub const fn count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }

    /// Sets whether the stream stays open for new appends once caught up.
    #[must_use]
    pub const fn follow(mut self, follow: bool) -> Self {
        self.follow = follow;
        self
    }

    /// Serializes the resolved position onto a record-endpoint URL.
    pub(crate) fn apply(&self, url: &mut Url) {
        url.query_pairs_mut()
            .append_pair("whence", self.whence.as_str())
            .append_pair("position", &self.position.to_string())
            .append_pair("count", &self.count.to_string())
            .append_pair("follow", if self.follow { "true" } else { "false" });
    }
}
