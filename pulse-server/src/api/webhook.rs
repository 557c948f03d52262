//! Webhook API Handler
//!
//! Receives GitLab webhook deliveries and hands them to the event service.
//! A delivery that cannot be classified is the sender's problem (422); a
//! failure while persisting is ours (500).

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::AppState;
use crate::service::event::EventError;
use crate::service::event_service;

/// POST /webhooks/gitlab
/// Process an incoming GitLab webhook event
pub async fn handle_gitlab_event(State(state): State<AppState>, payload: String) -> Response {
    match event_service::process(&state.pool, &payload).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(EventError::Parsing(msg)) => {
            tracing::warn!("Rejected GitLab event: {}", msg);
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Invalid GitLab event format: {msg}"),
            )
                .into_response()
        }
        Err(EventError::DatabaseError(err)) => {
            tracing::error!("Error while processing GitLab event: {:?}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error while processing GitLab event".to_string(),
            )
                .into_response()
        }
    }
}
