//! Bodies shaped exactly like the ones the browser agent builds, including
//! the `null`s it sends for unset fields.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use pollpilot::{router, BuiltinCatalog, SessionManagerHandle};

fn app() -> Router {
    router(SessionManagerHandle::new(Arc::new(BuiltinCatalog)))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

fn agent_page_state(session_id: &str, page_type: &str) -> Value {
    json!({
        "sessionId": session_id,
        "url": "https://accounts.example.test/signup?step=1",
        "hostname": "accounts.example.test",
        "pathname": "/signup",
        "pageType": page_type,
        "availableElements": {
            "buttons": [{ "text": "Sign up", "id": "signup-btn", "className": "btn primary" }],
            "links": [{ "text": "Log in", "href": "/login" }],
            "inputs": [{ "type": "email", "name": "email", "placeholder": null }],
            "forms": 1
        },
        "timestamp": 1718000000123i64,
        "isProcessing": false,
        "currentStep": null
    })
}

fn agent_poll(session_id: &str, page_type: &str) -> Value {
    json!({
        "sessionId": session_id,
        "url": "https://accounts.example.test/signup?step=1",
        "pageType": page_type,
        "currentStep": null
    })
}

#[tokio::test]
async fn test_agent_report_state_with_null_step() {
    let app = app();

    let (status, body) = post(&app, "/report-state", agent_page_state("tab-7", "main")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "received", "sessionId": "tab-7" }));

    let (status, session) = send(&app, Method::GET, "/sessions/tab-7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(session["lastPageState"]["currentStep"], "");
    assert_eq!(
        session["lastPageState"]["availableElements"]["links"][0]["href"],
        "/login"
    );
}

#[tokio::test]
async fn test_agent_poll_with_null_step() {
    let app = app();
    post(&app, "/report-state", agent_page_state("tab-7", "main")).await;

    let (status, first) = post(&app, "/get-next-command", agent_poll("tab-7", "main")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], "main_01");
    assert_eq!(first["type"], "click");
}

#[tokio::test]
async fn test_agent_success_report() {
    let app = app();
    post(&app, "/report-state", agent_page_state("tab-7", "main")).await;
    let (_, command) = post(&app, "/get-next-command", agent_poll("tab-7", "main")).await;

    let (status, body) = post(
        &app,
        "/report-result",
        json!({
            "sessionId": "tab-7",
            "commandId": command["id"],
            "command": command,
            "success": true,
            "result": { "clicked": true, "element": "BUTTON" },
            "error": null,
            "timestamp": 1718000000456i64,
            "url": "https://accounts.example.test/signup?step=1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "received");

    let (_, session) = send(&app, Method::GET, "/sessions/tab-7", None).await;
    assert_eq!(session["status"], "active");
    assert_eq!(session["results"][0]["commandId"], "main_01");
    assert_eq!(session["results"][0]["result"]["element"], "BUTTON");
}

#[tokio::test]
async fn test_agent_failure_report_with_null_result() {
    let app = app();
    post(&app, "/report-state", agent_page_state("tab-7", "main")).await;
    post(&app, "/get-next-command", agent_poll("tab-7", "main")).await;

    // The agent falls back to the command type when the echo has no id.
    let (status, body) = post(
        &app,
        "/report-result",
        json!({
            "sessionId": "tab-7",
            "commandId": "click",
            "command": { "type": "click", "selector": "#missing" },
            "success": false,
            "result": null,
            "error": "Element not found: #missing",
            "timestamp": 1718000000789i64,
            "url": null
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "received", "sessionId": "tab-7" }));

    let (_, session) = send(&app, Method::GET, "/sessions/tab-7", None).await;
    assert_eq!(session["status"], "error");
    assert_eq!(session["results"][0]["commandId"], "click");
    assert_eq!(session["results"][0]["command"]["selector"], "#missing");
    assert_eq!(session["results"][0]["success"], false);
    assert_eq!(session["results"][0]["error"], "Element not found: #missing");
}

#[tokio::test]
async fn test_report_without_success_counts_as_failure() {
    let app = app();
    post(&app, "/report-state", agent_page_state("tab-7", "dashboard")).await;

    let (status, _) = post(
        &app,
        "/report-result",
        json!({ "sessionId": "tab-7", "commandId": "dashboard_01" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, session) = send(&app, Method::GET, "/sessions/tab-7", None).await;
    assert_eq!(session["status"], "error");
    assert_eq!(session["results"][0]["success"], false);
}
