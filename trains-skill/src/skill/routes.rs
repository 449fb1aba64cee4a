//! HTTP routes for the skill endpoint.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::planner::ScheduleProvider;

use super::dto::{ErrorResponse, SkillRequest};
use super::handler::{SkillError, handle};
use super::state::AppState;

/// Create the application router.
pub fn create_router<P>(state: AppState<P>) -> Router
where
    P: ScheduleProvider + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/skill", post(skill::<P>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Voice platform webhook.
async fn skill<P>(
    State(state): State<AppState<P>>,
    Json(request): Json<SkillRequest>,
) -> Result<Response, SkillError>
where
    P: ScheduleProvider + Send + Sync + 'static,
{
    match handle(&state, request).await? {
        Some(response) => Ok(Json(response).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

impl IntoResponse for SkillError {
    fn into_response(self) -> Response {
        let status = match &self {
            SkillError::MissingUser => {
                warn!(error = %self, "rejected skill request");
                StatusCode::BAD_REQUEST
            }
            SkillError::HomeStore(_) => {
                error!(error = %self, "skill request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}
