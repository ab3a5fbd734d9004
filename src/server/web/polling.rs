use axum::{extract::State, response::IntoResponse, Json};

use super::types::{AppState, JsonBody};
use crate::core::{CommandResult, NextCommandRequest, PageState};
use crate::server::dispatch::DispatchError;

pub async fn report_state(
    State(state): State<AppState>,
    JsonBody(page): JsonBody<PageState>,
) -> impl IntoResponse {
    tracing::debug!(
        "report-state from {} ({} elements, processing: {}, step: '{}')",
        page.session_id,
        page.available_elements.len(),
        page.is_processing,
        page.current_step
    );

    state.session_manager.report_state(page).await.map(Json)
}

pub async fn get_next_command(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<NextCommandRequest>,
) -> impl IntoResponse {
    tracing::debug!(
        "get-next-command from {} on '{}' ({})",
        req.session_id,
        req.page_type,
        req.url
    );

    state
        .session_manager
        .next_command(&req.session_id)
        .await
        .map(Json)
}

pub async fn report_result(
    State(state): State<AppState>,
    JsonBody(result): JsonBody<CommandResult>,
) -> impl IntoResponse {
    let outcome = state.session_manager.report_result(result).await;
    if let Err(DispatchError::SessionNotFound(session_id)) = &outcome {
        tracing::warn!("Result reported for unknown session {}", session_id);
    }
    outcome.map(Json)
}
