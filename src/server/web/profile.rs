use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::types::{AppState, JsonBody, OkMessage, ServerStatus};
use crate::core::{api_error_response, UserProfile};

pub async fn server_status(State(state): State<AppState>) -> Json<ServerStatus> {
    let sessions = state.session_manager.session_count().await;
    let profile_ready = state.session_manager.profile().await.is_some();

    tracing::debug!("Status check ({} sessions)", sessions);

    Json(ServerStatus {
        status: "ok".to_string(),
        message: "Polling server is running".to_string(),
        time: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        sessions,
        profile_ready,
    })
}

pub async fn get_user_data(State(state): State<AppState>) -> impl IntoResponse {
    match state.session_manager.profile().await {
        Some(profile) => {
            tracing::info!("Sent user profile for {}", profile.email);
            Json(profile).into_response()
        }
        None => {
            tracing::warn!("User profile requested but none is loaded");
            api_error_response(
                StatusCode::NOT_FOUND,
                "Profile Not Ready",
                "No user profile has been loaded",
            )
        }
    }
}

pub async fn set_user_data(
    State(state): State<AppState>,
    JsonBody(profile): JsonBody<UserProfile>,
) -> impl IntoResponse {
    state
        .session_manager
        .set_profile(profile)
        .await
        .map(|_| Json(OkMessage::new("User profile stored")))
}

pub async fn clear_user_data(State(state): State<AppState>) -> impl IntoResponse {
    state
        .session_manager
        .clear_profile()
        .await
        .map(|_| Json(OkMessage::new("User profile cleared")))
}
