//! Pipeline Reconciliation Service
//!
//! Applies pipeline webhook events to the persisted model: find the owning
//! project, then either update the already-recorded pipeline or create one
//! under the version tracking the event's branch.
//!
//! Events for repositories or branches the dashboard does not track are
//! expected steady-state traffic and terminate silently.

use chrono::{DateTime, Utc};
use pulse_core::domain::pipeline::Pipeline;
use pulse_core::domain::project::ProjectVersion;
use pulse_core::domain::status::Status;
use pulse_core::dto::event::PipelineEvent;
use pulse_core::dto::pipeline::NewPipeline;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repository::{pipeline_repository, project_repository};

/// Reconcile one pipeline event against the persisted model
pub async fn reconcile(pool: &PgPool, event: &PipelineEvent) -> Result<(), sqlx::Error> {
    let attributes = &event.object_attributes;
    tracing::debug!(
        "Received pipeline event for pipeline {} with status {:?} (repository {})",
        attributes.id,
        attributes.status,
        event.project.id
    );

    // Find the project by repository id
    let Some(project) = project_repository::find_by_repository_id(pool, event.project.id).await?
    else {
        tracing::debug!("No project registered with repository id {}", event.project.id);
        return Ok(());
    };

    // Retrieve every pipeline already recorded under the project, across all
    // of its versions, and look for one matching the event's CI id
    let pipelines = pipeline_repository::find_by_project(pool, project.id).await?;
    let existing = pipelines.into_iter().find(|p| p.ci_id == attributes.id);

    match existing {
        Some(mut pipeline) => {
            let status = Status::normalize(attributes.status.as_deref());
            if apply_event(&mut pipeline, status, attributes.finished_at) {
                pipeline_repository::update(pool, &pipeline).await?;
                tracing::debug!(
                    "Updated pipeline {} of project {} to status {:?}",
                    pipeline.ci_id,
                    project.name,
                    pipeline.status
                );
            }
        }
        None => {
            // Attach to the version tracking the event's branch, if any
            let Some(version) = matching_version(&project.versions, attributes.git_ref.as_deref())
            else {
                tracing::debug!(
                    "No version of project {} tracks ref {:?}",
                    project.name,
                    attributes.git_ref
                );
                return Ok(());
            };

            let new_pipeline = build_pipeline(event, version.id);
            let inserted = pipeline_repository::create(pool, &new_pipeline).await?;
            if inserted {
                tracing::debug!(
                    "Created pipeline {} for version {} of project {}",
                    new_pipeline.ci_id,
                    version.version,
                    project.name
                );
            } else {
                tracing::debug!(
                    "Pipeline {} was recorded concurrently, skipping create",
                    new_pipeline.ci_id
                );
            }
        }
    }

    Ok(())
}

/// Fold an event into an existing pipeline; returns whether anything changed.
///
/// The end date is set once: the first event carrying a finish timestamp wins
/// and later timestamps are ignored.
fn apply_event(
    pipeline: &mut Pipeline,
    status: Status,
    finished_at: Option<DateTime<Utc>>,
) -> bool {
    let mut changed = false;

    if pipeline.status != status {
        pipeline.status = status;
        changed = true;
    }

    if pipeline.end_date.is_none() && finished_at.is_some() {
        pipeline.end_date = finished_at;
        changed = true;
    }

    changed
}

/// Pick the version whose tracked branch exactly equals the event's ref.
///
/// Versions arrive ordered by version number descending; when several track
/// the same branch, the highest version wins.
fn matching_version<'a>(
    versions: &'a [ProjectVersion],
    git_ref: Option<&str>,
) -> Option<&'a ProjectVersion> {
    versions
        .iter()
        .find(|v| git_ref == Some(v.branch_id.as_str()))
}

/// Build the pipeline a first-time event describes
fn build_pipeline(event: &PipelineEvent, project_version_id: Uuid) -> NewPipeline {
    let attributes = &event.object_attributes;
    let web_url = &event.project.web_url;

    NewPipeline {
        ci_id: attributes.id,
        sha: attributes.sha.clone(),
        previous_sha: attributes.before_sha.clone(),
        changes_url: changes_url(
            web_url,
            attributes.before_sha.as_deref(),
            attributes.sha.as_deref(),
        ),
        status: Status::normalize(attributes.status.as_deref()),
        url: Some(format!("{}/-/pipelines/{}", web_url, attributes.id)),
        created_date: attributes.created_at,
        project_version_id,
    }
}

/// Compare view between two commits; only available when both are known
fn changes_url(web_url: &str, before_sha: Option<&str>, sha: Option<&str>) -> Option<String> {
    match (before_sha, sha) {
        (Some(before_sha), Some(sha)) => {
            Some(format!("{}/-/compare/{}...{}", web_url, before_sha, sha))
        }
        _ => None,
    }
}
