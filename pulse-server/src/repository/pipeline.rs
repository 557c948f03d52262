//! Pipeline Repository
//!
//! Handles all database operations related to pipelines.

use chrono::{DateTime, Utc};
use pulse_core::domain::pipeline::Pipeline;
use pulse_core::domain::status::Status;
use pulse_core::dto::pipeline::NewPipeline;
use sqlx::PgPool;
use uuid::Uuid;

/// Record a new pipeline.
///
/// Insertion is keyed on the CI-assigned id: a concurrent delivery that
/// already recorded the same pipeline makes this call a no-op. Returns
/// whether a row was actually inserted.
pub async fn create(pool: &PgPool, req: &NewPipeline) -> Result<bool, sqlx::Error> {
    let id = Uuid::new_v4();

    let result = sqlx::query(
        r#"
        INSERT INTO pipelines (
            id, ci_id, sha, previous_sha, changes_url,
            status, url, created_date, project_version_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (ci_id) DO NOTHING
        "#,
    )
    .bind(id)
    .bind(req.ci_id)
    .bind(&req.sha)
    .bind(&req.previous_sha)
    .bind(&req.changes_url)
    .bind(req.status.as_str())
    .bind(&req.url)
    .bind(req.created_date)
    .bind(req.project_version_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Persist the mutable fields of an existing pipeline
pub async fn update(pool: &PgPool, pipeline: &Pipeline) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE pipelines
        SET status = $1, end_date = $2
        WHERE id = $3
        "#,
    )
    .bind(pipeline.status.as_str())
    .bind(pipeline.end_date)
    .bind(pipeline.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Find a pipeline by the id the CI provider assigned to it
pub async fn find_by_ci_id(pool: &PgPool, ci_id: i64) -> Result<Option<Pipeline>, sqlx::Error> {
    let row = sqlx::query_as::<_, PipelineRow>(
        r#"
        SELECT id, ci_id, sha, previous_sha, changes_url,
               status, url, created_date, end_date, project_version_id
        FROM pipelines
        WHERE ci_id = $1
        "#,
    )
    .bind(ci_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// Find all pipelines recorded anywhere under a project, across every version
pub async fn find_by_project(pool: &PgPool, project_id: Uuid) -> Result<Vec<Pipeline>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PipelineRow>(
        r#"
        SELECT p.id, p.ci_id, p.sha, p.previous_sha, p.changes_url,
               p.status, p.url, p.created_date, p.end_date, p.project_version_id
        FROM pipelines p
        JOIN project_versions pv ON pv.id = p.project_version_id
        WHERE pv.project_id = $1
        ORDER BY p.created_date DESC
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct PipelineRow {
    id: Uuid,
    ci_id: i64,
    sha: Option<String>,
    previous_sha: Option<String>,
    changes_url: Option<String>,
    status: String,
    url: Option<String>,
    created_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    project_version_id: Uuid,
}

impl From<PipelineRow> for Pipeline {
    fn from(row: PipelineRow) -> Self {
        Pipeline {
            id: row.id,
            ci_id: row.ci_id,
            sha: row.sha,
            previous_sha: row.previous_sha,
            changes_url: row.changes_url,
            status: Status::from_db(&row.status),
            url: row.url,
            created_date: row.created_date,
            end_date: row.end_date,
            project_version_id: row.project_version_id,
        }
    }
}
