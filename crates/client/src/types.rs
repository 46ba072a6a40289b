use serde::{Deserialize, Serialize};

/// Descriptor for one log, as reported by the server.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct LogInfo {
    /// Unique name addressing the log.
    pub name: String,

    /// Lifecycle status reported by the server.
    #[serde(default)]
    pub status: Option<String>,

    /// Number of records currently in the log.
    #[serde(default)]
    pub record_count: Option<u64>,

    /// On-disk size of the log in bytes.
    #[serde(default)]
    pub file_size: Option<u64>,
}

/// Creation options for a log.
///
/// Every option is optional; `None` leaves the choice to the server's
/// default. The server stays authoritative on validation, but only
/// recognized options can be expressed here in the first place.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LogConfig {
    /// Largest accepted record payload, in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_record_size: Option<u64>,

    /// Bytes written between two index entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_after_size: Option<u64>,

    /// Records per segment before rolling over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_max_count: Option<u64>,

    /// Bytes per segment before rolling over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_max_size: Option<u64>,

    /// Segment age in seconds before rolling over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_max_age: Option<u64>,

    /// Record-count retention bound for the whole log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_max_count: Option<u64>,

    /// Byte-size retention bound for the whole log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_max_size: Option<u64>,

    /// Age retention bound in seconds for the whole log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_max_age: Option<u64>,
}

/// Acknowledgment of a one-shot produce call.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
pub struct ProduceAck {
    /// Position the record was appended at, when the server reports one.
    #[serde(default)]
    pub position: Option<i64>,
}
