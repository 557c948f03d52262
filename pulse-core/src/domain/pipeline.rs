//! Pipeline domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::status::Status;

/// A CI pipeline run recorded for a project version.
///
/// `ci_id` is the id the CI provider assigned to the pipeline, distinct from
/// the internal primary key. Created on the first event carrying a given
/// `ci_id`, mutated by later events, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: Uuid,
    pub ci_id: i64,
    pub sha: Option<String>,
    pub previous_sha: Option<String>,
    /// Compare view between `previous_sha` and `sha`, when both are known.
    pub changes_url: Option<String>,
    pub status: Status,
    pub url: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    /// Set once, on the first event carrying a finish timestamp.
    pub end_date: Option<DateTime<Utc>>,
    pub project_version_id: Uuid,
}
