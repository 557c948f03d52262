//! Job Repository
//!
//! Handles all database operations related to jobs.

use chrono::{DateTime, Utc};
use pulse_core::domain::job::Job;
use pulse_core::domain::status::Status;
use pulse_core::dto::job::NewJob;
use sqlx::PgPool;
use uuid::Uuid;

/// Record a new job.
///
/// Insertion is keyed on the CI-assigned id; returns whether a row was
/// actually inserted.
pub async fn create(pool: &PgPool, req: &NewJob) -> Result<bool, sqlx::Error> {
    let id = Uuid::new_v4();

    let result = sqlx::query(
        r#"
        INSERT INTO jobs (id, ci_id, name, status, start_date, end_date, logs_url, pipeline_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (ci_id) DO NOTHING
        "#,
    )
    .bind(id)
    .bind(req.ci_id)
    .bind(&req.name)
    .bind(req.status.as_str())
    .bind(req.start_date)
    .bind(req.end_date)
    .bind(&req.logs_url)
    .bind(req.pipeline_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Persist the mutable fields of an existing job
pub async fn update(pool: &PgPool, job: &Job) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE jobs
        SET status = $1, start_date = $2, end_date = $3
        WHERE id = $4
        "#,
    )
    .bind(job.status.as_str())
    .bind(job.start_date)
    .bind(job.end_date)
    .bind(job.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Find a job by the id the CI provider assigned to it
pub async fn find_by_ci_id(pool: &PgPool, ci_id: i64) -> Result<Option<Job>, sqlx::Error> {
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, ci_id, name, status, start_date, end_date, logs_url, pipeline_id
        FROM jobs
        WHERE ci_id = $1
        "#,
    )
    .bind(ci_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// Find the jobs of a pipeline, earliest finished first
pub async fn find_by_pipeline(pool: &PgPool, pipeline_id: Uuid) -> Result<Vec<Job>, sqlx::Error> {
    let rows = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, ci_id, name, status, start_date, end_date, logs_url, pipeline_id
        FROM jobs
        WHERE pipeline_id = $1
        ORDER BY end_date ASC NULLS LAST
        "#,
    )
    .bind(pipeline_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    ci_id: i64,
    name: Option<String>,
    status: String,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    logs_url: Option<String>,
    pipeline_id: Uuid,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Job {
            id: row.id,
            ci_id: row.ci_id,
            name: row.name,
            status: Status::from_db(&row.status),
            start_date: row.start_date,
            end_date: row.end_date,
            logs_url: row.logs_url,
            pipeline_id: row.pipeline_id,
        }
    }
}
