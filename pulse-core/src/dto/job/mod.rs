//! Job DTOs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::status::Status;

/// Fields of a job about to be recorded for the first time.
///
/// The internal primary key is assigned by the repository layer on insert.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub ci_id: i64,
    pub name: Option<String>,
    pub status: Status,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub logs_url: Option<String>,
    pub pipeline_id: Uuid,
}
