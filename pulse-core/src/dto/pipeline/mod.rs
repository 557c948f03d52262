//! Pipeline DTOs served to the dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::job::Job;
use crate::domain::pipeline::Pipeline;
use crate::domain::status::Status;

/// Fields of a pipeline about to be recorded for the first time.
///
/// The internal primary key is assigned by the repository layer on insert.
#[derive(Debug, Clone)]
pub struct NewPipeline {
    pub ci_id: i64,
    pub sha: Option<String>,
    pub previous_sha: Option<String>,
    pub changes_url: Option<String>,
    pub status: Status,
    pub url: Option<String>,
    pub created_date: Option<DateTime<Utc>>,
    pub project_version_id: Uuid,
}

/// A pipeline together with its jobs, as the dashboard consumes it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineDetail {
    #[serde(flatten)]
    pub pipeline: Pipeline,
    /// Jobs ordered by end date, earliest finished first.
    pub jobs: Vec<Job>,
}
