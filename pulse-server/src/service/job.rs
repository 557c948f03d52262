//! Job Reconciliation Service
//!
//! Applies job webhook events to the persisted model: find the owning
//! pipeline by its CI id, then create or update the job the event describes.
//!
//! Timestamps behave differently from pipelines here: a job's start and end
//! dates are overwritten by every event carrying them, tracking GitLab's own
//! bookkeeping for retried jobs.

use pulse_core::domain::job::Job;
use pulse_core::domain::status::Status;
use pulse_core::dto::event::BuildEvent;
use pulse_core::dto::job::NewJob;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repository::{job_repository, pipeline_repository};

/// Reconcile one job event against the persisted model
pub async fn reconcile(pool: &PgPool, event: &BuildEvent) -> Result<(), sqlx::Error> {
    tracing::debug!(
        "Received job event for job {} with status {:?} (pipeline {}, repository {})",
        event.build_id,
        event.build_status,
        event.pipeline_id,
        event.project.id
    );

    // Find the pipeline the job belongs to
    let Some(pipeline) = pipeline_repository::find_by_ci_id(pool, event.pipeline_id).await? else {
        tracing::debug!("No pipeline recorded with CI id {}", event.pipeline_id);
        return Ok(());
    };

    // Jobs are looked up globally by CI id, not scoped to the pipeline
    match job_repository::find_by_ci_id(pool, event.build_id).await? {
        Some(mut job) => {
            apply_event(&mut job, event);
            job_repository::update(pool, &job).await?;
            tracing::debug!(
                "Updated job {} of pipeline {} to status {:?}",
                job.ci_id,
                pipeline.ci_id,
                job.status
            );
        }
        None => {
            let new_job = build_job(event, pipeline.id);
            let inserted = job_repository::create(pool, &new_job).await?;
            if inserted {
                tracing::debug!(
                    "Created job {} for pipeline {}",
                    new_job.ci_id,
                    pipeline.ci_id
                );
            } else {
                tracing::debug!(
                    "Job {} was recorded concurrently, skipping create",
                    new_job.ci_id
                );
            }
        }
    }

    Ok(())
}

/// Fold an event into an existing job.
///
/// The status is only touched when it differs; the name is never rewritten.
/// Start and end dates are overwritten whenever the event carries them.
fn apply_event(job: &mut Job, event: &BuildEvent) {
    let status = Status::normalize(event.build_status.as_deref());
    if job.status != status {
        job.status = status;
    }

    if event.build_started_at.is_some() {
        job.start_date = event.build_started_at;
    }
    if event.build_finished_at.is_some() {
        job.end_date = event.build_finished_at;
    }
}

/// Build the job a first-time event describes
fn build_job(event: &BuildEvent, pipeline_id: Uuid) -> NewJob {
    NewJob {
        ci_id: event.build_id,
        name: event.build_name.clone(),
        status: Status::normalize(event.build_status.as_deref()),
        start_date: event.build_started_at,
        end_date: event.build_finished_at,
        logs_url: Some(format!(
            "{}/-/jobs/{}",
            event.project.web_url, event.build_id
        )),
        pipeline_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pulse_core::dto::event::EventProject;

    fn sample_event() -> BuildEvent {
        BuildEvent {
            build_id: 456,
            build_name: Some("unit-tests".to_string()),
            build_status: Some("running".to_string()),
            build_started_at: None,
            build_finished_at: None,
            pipeline_id: 123,
            project_id: Some(200),
            project: EventProject {
                id: 200,
                name: Some("alpha".to_string()),
                web_url: "https://gitlab.example.com/sg1/alpha".to_string(),
                path_with_namespace: Some("sg1/alpha".to_string()),
            },
        }
    }

    fn existing_job(status: Status) -> Job {
        Job {
            id: Uuid::new_v4(),
            ci_id: 456,
            name: Some("unit-tests".to_string()),
            status,
            start_date: None,
            end_date: None,
            logs_url: None,
            pipeline_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_apply_event_updates_changed_status() {
        let mut job = existing_job(Status::Waiting);

        apply_event(&mut job, &sample_event());

        assert_eq!(job.status, Status::InProgress);
    }

    #[test]
    fn test_apply_event_never_rewrites_name() {
        let mut job = existing_job(Status::InProgress);
        let mut event = sample_event();
        event.build_name = Some("renamed-job".to_string());

        apply_event(&mut job, &event);

        assert_eq!(job.name.as_deref(), Some("unit-tests"));
    }

    #[test]
    fn test_apply_event_overwrites_timestamps_when_present() {
        let mut job = existing_job(Status::InProgress);
        let earlier = Utc.with_ymd_and_hms(2025, 12, 14, 15, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 12, 14, 15, 30, 0).unwrap();
        job.start_date = Some(earlier);
        job.end_date = Some(earlier);

        let mut event = sample_event();
        event.build_started_at = Some(later);
        event.build_finished_at = Some(later);

        apply_event(&mut job, &event);

        // Job timestamps track the event stream, unlike a pipeline's end date
        assert_eq!(job.start_date, Some(later));
        assert_eq!(job.end_date, Some(later));
    }

    #[test]
    fn test_apply_event_keeps_timestamps_when_absent() {
        let mut job = existing_job(Status::InProgress);
        let recorded = Utc.with_ymd_and_hms(2025, 12, 14, 15, 0, 0).unwrap();
        job.start_date = Some(recorded);
        job.end_date = Some(recorded);

        apply_event(&mut job, &sample_event());

        assert_eq!(job.start_date, Some(recorded));
        assert_eq!(job.end_date, Some(recorded));
    }

    #[test]
    fn test_build_job_from_event() {
        let pipeline_id = Uuid::new_v4();
        let mut event = sample_event();
        event.build_status = Some("success".to_string());
        event.build_started_at = Some(Utc.with_ymd_and_hms(2025, 12, 14, 15, 0, 0).unwrap());

        let new_job = build_job(&event, pipeline_id);

        assert_eq!(new_job.ci_id, 456);
        assert_eq!(new_job.name.as_deref(), Some("unit-tests"));
        assert_eq!(new_job.status, Status::Success);
        assert_eq!(
            new_job.logs_url.as_deref(),
            Some("https://gitlab.example.com/sg1/alpha/-/jobs/456")
        );
        assert!(new_job.start_date.is_some());
        assert!(new_job.end_date.is_none());
        assert_eq!(new_job.pipeline_id, pipeline_id);
    }

    #[test]
    fn test_build_job_normalizes_unknown_status() {
        let mut event = sample_event();
        event.build_status = None;

        let new_job = build_job(&event, Uuid::new_v4());
        assert_eq!(new_job.status, Status::Unknown);
    }
}
