//! CI status vocabulary

use serde::{Deserialize, Serialize};

/// Normalized status of a pipeline or job.
///
/// GitLab reports a wider, versioned vocabulary over webhooks; everything is
/// folded into this fixed set before persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Created,
    Success,
    Failed,
    Waiting,
    InProgress,
    Bypassed,
    Canceled,
    Unknown,
}

impl Status {
    /// Normalize a raw CI status string.
    ///
    /// Total over any input: case-insensitive match against the known
    /// vocabulary, with absent, empty, or unrecognized input mapping to
    /// [`Status::Unknown`].
    pub fn normalize(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Status::Unknown;
        };
        if raw.is_empty() {
            return Status::Unknown;
        }
        match raw.to_lowercase().as_str() {
            "created" => Status::Created,
            "success" => Status::Success,
            "failed" => Status::Failed,
            "pending" | "waiting_for_resource" | "preparing" => Status::Waiting,
            "running" | "canceling" => Status::InProgress,
            "bypassed" | "skipped" => Status::Bypassed,
            "canceled" => Status::Canceled,
            _ => Status::Unknown,
        }
    }

    /// Stable string form used for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Created => "CREATED",
            Status::Success => "SUCCESS",
            Status::Failed => "FAILED",
            Status::Waiting => "WAITING",
            Status::InProgress => "IN_PROGRESS",
            Status::Bypassed => "BYPASSED",
            Status::Canceled => "CANCELED",
            Status::Unknown => "UNKNOWN",
        }
    }

    /// Parse the stored string form back into a status.
    pub fn from_db(s: &str) -> Self {
        match s {
            "CREATED" => Status::Created,
            "SUCCESS" => Status::Success,
            "FAILED" => Status::Failed,
            "WAITING" => Status::Waiting,
            "IN_PROGRESS" => Status::InProgress,
            "BYPASSED" => Status::Bypassed,
            "CANCELED" => Status::Canceled,
            _ => Status::Unknown,
        }
    }
}
