//! GitLab Lookup API Handlers
//!
//! HTTP endpoints proxying read-only lookups against the GitLab API.

use axum::{
    Json,
    extract::{Query, State},
};
use pulse_core::dto::gitlab::{BranchSummary, GitLabProjectSummary};
use serde::Deserialize;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::gitlab_service;

fn map_error(err: gitlab_service::GitLabError) -> ApiError {
    match err {
        gitlab_service::GitLabError::NotFound(msg) => ApiError::NotFound(msg),
        gitlab_service::GitLabError::Forbidden => {
            ApiError::Forbidden("GitLab rejected the configured token".to_string())
        }
        gitlab_service::GitLabError::Upstream(err) => {
            tracing::error!("GitLab lookup failed: {}", err);
            ApiError::InternalError("GitLab lookup failed".to_string())
        }
    }
}

#[derive(Deserialize)]
pub struct ProjectPathQuery {
    /// Project path in the format `group/project`
    pub path: String,
}

#[derive(Deserialize)]
pub struct ProjectIdQuery {
    /// Numeric project id
    pub id: i64,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    /// Prefix to match against project name or path
    pub pattern: String,
}

/// GET /gitlab/projects?path=group/project
/// Retrieve GitLab project information by path
pub async fn get_project(
    State(state): State<AppState>,
    Query(query): Query<ProjectPathQuery>,
) -> ApiResult<Json<GitLabProjectSummary>> {
    tracing::debug!("Looking up GitLab project: {}", query.path);

    let project = gitlab_service::get_project(&state.gitlab, &query.path)
        .await
        .map_err(map_error)?;

    Ok(Json(project))
}

/// GET /gitlab/projects/branches?id=200
/// Retrieve the branches of a GitLab project
pub async fn get_project_branches(
    State(state): State<AppState>,
    Query(query): Query<ProjectIdQuery>,
) -> ApiResult<Json<Vec<BranchSummary>>> {
    tracing::debug!("Listing branches of GitLab project: {}", query.id);

    let branches = gitlab_service::get_project_branches(&state.gitlab, query.id)
        .await
        .map_err(map_error)?;

    Ok(Json(branches))
}

/// GET /gitlab/projects/search?pattern=SG1
/// Search GitLab projects by name or path prefix
pub async fn search_projects(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<GitLabProjectSummary>>> {
    tracing::debug!("Searching GitLab projects matching: {}", query.pattern);

    let projects = gitlab_service::search_projects_by_name(&state.gitlab, &query.pattern)
        .await
        .map_err(map_error)?;

    Ok(Json(projects))
}
