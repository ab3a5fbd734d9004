use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::types::AppState;
use crate::core::{api_error_response, SessionSummary};

pub async fn list_sessions(State(state): State<AppState>) -> Json<Vec<SessionSummary>> {
    Json(state.session_manager.list_sessions().await)
}

pub async fn get_session(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.session_manager.get_session(&id).await {
        Some(session) => Json(session).into_response(),
        None => api_error_response(
            StatusCode::NOT_FOUND,
            "Session Not Found",
            format!("Session with id '{}' not found", id),
        ),
    }
}
