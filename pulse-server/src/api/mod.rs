//! API Module
//!
//! HTTP API layer for the server.
//! Each submodule handles endpoints for a specific domain.

pub mod error;
pub mod gitlab;
pub mod health;
pub mod project;
pub mod webhook;

use axum::{
    Router,
    routing::{get, post},
};
use pulse_gitlab::GitLabClient;
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub gitlab: GitLabClient,
}

/// Create the main API router with all endpoints
pub fn create_router(pool: PgPool, gitlab: GitLabClient) -> Router {
    let state = AppState { pool, gitlab };

    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Webhook ingestion
        .route("/webhooks/gitlab", post(webhook::handle_gitlab_event))
        // Tracked project endpoints
        .route(
            "/api/projects",
            get(project::list_projects).post(project::register_project),
        )
        .route("/api/projects/{id}", get(project::get_project))
        .route(
            "/api/projects/{id}/pipelines",
            get(project::list_project_pipelines),
        )
        // GitLab lookup endpoints
        .route("/gitlab/projects", get(gitlab::get_project))
        .route("/gitlab/projects/branches", get(gitlab::get_project_branches))
        .route("/gitlab/projects/search", get(gitlab::search_projects))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
