use anyhow::Result;
use axum::{
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use super::{
    polling::{get_next_command, report_result, report_state},
    profile::{clear_user_data, get_user_data, server_status, set_user_data},
    sessions::{get_session, list_sessions},
    types::AppState,
};
use crate::core::api_error_response;
use crate::server::manager::SessionManagerHandle;

/// Builds the full HTTP surface around an existing session manager.
pub fn router(session_manager: SessionManagerHandle) -> Router {
    let state = AppState { session_manager };

    Router::new()
        .route("/report-state", post(report_state).fallback(post_required))
        .route("/get-next-command", post(get_next_command).fallback(post_required))
        .route("/report-result", post(report_result).fallback(post_required))
        .route("/status", get(server_status).fallback(get_required))
        .route("/get-user-data", get(get_user_data).fallback(get_required))
        .route("/set-user-data", post(set_user_data).fallback(post_required))
        .route("/clear-user-data", post(clear_user_data).fallback(post_required))
        .route("/sessions", get(list_sessions).fallback(get_required))
        .route("/sessions/:id", get(get_session).fallback(get_required))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PUT,
                            Method::DELETE,
                            Method::OPTIONS,
                        ])
                        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
                )
                .layer(middleware::from_fn(preflight)),
        )
        .with_state(state)
}

/// OPTIONS succeeds with an empty body on every path.
async fn preflight(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(req).await
}

async fn post_required() -> Response {
    method_not_allowed(Method::POST)
}

async fn get_required() -> Response {
    method_not_allowed(Method::GET)
}

fn method_not_allowed(allowed: Method) -> Response {
    let mut response = api_error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method Not Allowed",
        format!("{} method required", allowed),
    );
    if let Ok(value) = header::HeaderValue::from_str(allowed.as_str()) {
        response.headers_mut().insert(header::ALLOW, value);
    }
    response
}

async fn not_found(method: Method, uri: axum::http::Uri) -> Response {
    api_error_response(
        StatusCode::NOT_FOUND,
        "Not Found",
        format!("No route for {} {}", method, uri.path()),
    )
}

pub async fn start_web_server(host: &str, port: u16, session_manager: SessionManagerHandle) -> Result<()> {
    let app = router(session_manager);

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", host, port)).await?;
    tracing::info!("Polling server listening on http://{}:{}", host, port);
    tracing::info!("  - status:       http://{}:{}/status", host, port);
    tracing::info!("  - user profile: http://{}:{}/get-user-data", host, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Polling server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
