//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::status::Status;

/// A CI job recorded under a pipeline.
///
/// Unlike a pipeline's end date, a job's start and end dates track the event
/// stream: every event carrying a timestamp overwrites the stored one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub ci_id: i64,
    pub name: Option<String>,
    pub status: Status,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub logs_url: Option<String>,
    pub pipeline_id: Uuid,
}
