//! Project Service
//!
//! Business logic for project registration and dashboard reads.

use pulse_core::domain::project::Project;
use pulse_core::dto::pipeline::PipelineDetail;
use pulse_core::dto::project::CreateProject;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repository::{job_repository, pipeline_repository, project_repository};

/// Service error type
#[derive(Debug)]
pub enum ProjectError {
    NotFound(Uuid),
    AlreadyRegistered(i64),
    ValidationError(String),
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for ProjectError {
    fn from(err: sqlx::Error) -> Self {
        ProjectError::DatabaseError(err)
    }
}

pub type Result<T> = std::result::Result<T, ProjectError>;

/// Register a new project to track
pub async fn register_project(pool: &PgPool, req: CreateProject) -> Result<Project> {
    // Validate request
    validate_project_request(&req)?;

    // Repository ids attribute webhook events and must stay unique
    if project_repository::find_by_repository_id(pool, req.repository_id)
        .await?
        .is_some()
    {
        return Err(ProjectError::AlreadyRegistered(req.repository_id));
    }

    let project = project_repository::create(pool, &req).await?;

    tracing::info!("Project registered: {} ({})", project.name, project.id);

    Ok(project)
}

/// Get a project by ID
pub async fn get_project(pool: &PgPool, id: Uuid) -> Result<Project> {
    let project = project_repository::find_by_id(pool, id)
        .await?
        .ok_or(ProjectError::NotFound(id))?;

    Ok(project)
}

/// List all tracked projects
pub async fn list_projects(pool: &PgPool) -> Result<Vec<Project>> {
    let projects = project_repository::list_all(pool).await?;
    Ok(projects)
}

/// List a project's pipelines with their jobs, most recent pipeline first
pub async fn list_project_pipelines(pool: &PgPool, id: Uuid) -> Result<Vec<PipelineDetail>> {
    // Verify project exists
    let project = project_repository::find_by_id(pool, id)
        .await?
        .ok_or(ProjectError::NotFound(id))?;

    let pipelines = pipeline_repository::find_by_project(pool, project.id).await?;

    let mut details = Vec::with_capacity(pipelines.len());
    for pipeline in pipelines {
        let jobs = job_repository::find_by_pipeline(pool, pipeline.id).await?;
        details.push(PipelineDetail { pipeline, jobs });
    }

    Ok(details)
}

// =============================================================================
// Validation
// =============================================================================

fn validate_project_request(req: &CreateProject) -> Result<()> {
    if req.name.trim().is_empty() {
        return Err(ProjectError::ValidationError(
            "Project name cannot be empty".to_string(),
        ));
    }

    if req.name.len() > 255 {
        return Err(ProjectError::ValidationError(
            "Project name is too long (max 255 characters)".to_string(),
        ));
    }

    for version in &req.versions {
        if version.branch_id.trim().is_empty() {
            return Err(ProjectError::ValidationError(
                "Version branch cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_core::dto::project::CreateProjectVersion;

    fn sample_request() -> CreateProject {
        CreateProject {
            name: "Alpha".to_string(),
            repository_url: Some("https://gitlab.example.com/sg1/alpha".to_string()),
            repository_id: 200,
            versions: vec![CreateProjectVersion {
                version: 1,
                branch_id: "main".to_string(),
            }],
        }
    }

    #[test]
    fn test_validate_empty_name() {
        let mut req = sample_request();
        req.name = "  ".to_string();

        let result = validate_project_request(&req);
        assert!(matches!(result, Err(ProjectError::ValidationError(_))));
    }

    #[test]
    fn test_validate_overlong_name() {
        let mut req = sample_request();
        req.name = "x".repeat(256);

        let result = validate_project_request(&req);
        assert!(matches!(result, Err(ProjectError::ValidationError(_))));
    }

    #[test]
    fn test_validate_empty_branch() {
        let mut req = sample_request();
        req.versions[0].branch_id = String::new();

        let result = validate_project_request(&req);
        assert!(matches!(result, Err(ProjectError::ValidationError(_))));
    }

    #[test]
    fn test_validate_valid_request() {
        assert!(validate_project_request(&sample_request()).is_ok());
    }

    #[test]
    fn test_validate_allows_no_versions() {
        let mut req = sample_request();
        req.versions.clear();

        assert!(validate_project_request(&req).is_ok());
    }
}
