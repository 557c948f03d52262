//! Project API Handlers
//!
//! HTTP endpoints for tracked projects and their pipeline history.

use axum::{
    Json,
    extract::{Path, State},
};
use pulse_core::domain::project::Project;
use pulse_core::dto::pipeline::PipelineDetail;
use pulse_core::dto::project::CreateProject;
use uuid::Uuid;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::project_service;

fn map_error(err: project_service::ProjectError) -> ApiError {
    match err {
        project_service::ProjectError::NotFound(id) => {
            ApiError::NotFound(format!("Project {} not found", id))
        }
        project_service::ProjectError::AlreadyRegistered(repository_id) => ApiError::Conflict(
            format!("A project with repository id {} is already registered", repository_id),
        ),
        project_service::ProjectError::ValidationError(msg) => ApiError::BadRequest(msg),
        project_service::ProjectError::DatabaseError(err) => ApiError::DatabaseError(err),
    }
}

/// POST /api/projects
/// Register a project to track
pub async fn register_project(
    State(state): State<AppState>,
    Json(req): Json<CreateProject>,
) -> ApiResult<Json<Project>> {
    tracing::info!("Registering project: {}", req.name);

    let project = project_service::register_project(&state.pool, req)
        .await
        .map_err(map_error)?;

    Ok(Json(project))
}

/// GET /api/projects
/// List all tracked projects
pub async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    tracing::debug!("Listing all projects");

    let projects = project_service::list_projects(&state.pool)
        .await
        .map_err(map_error)?;

    Ok(Json(projects))
}

/// GET /api/projects/{id}
/// Get project by ID
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    tracing::debug!("Getting project: {}", id);

    let project = project_service::get_project(&state.pool, id)
        .await
        .map_err(map_error)?;

    Ok(Json(project))
}

/// GET /api/projects/{id}/pipelines
/// List a project's pipelines with their jobs
pub async fn list_project_pipelines(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<PipelineDetail>>> {
    tracing::debug!("Listing pipelines for project: {}", id);

    let pipelines = project_service::list_project_pipelines(&state.pool, id)
        .await
        .map_err(map_error)?;

    Ok(Json(pipelines))
}
