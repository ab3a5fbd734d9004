use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error object rendered for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDocument {
    pub errors: Vec<ApiError>,
}

pub fn api_error(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> ApiErrorDocument {
    ApiErrorDocument {
        errors: vec![ApiError {
            status: Some(status.as_u16().to_string()),
            title: Some(title.into()),
            detail: Some(detail.into()),
        }],
    }
}

/// Error response with an `application/json` body.
pub fn api_error_response(
    status: StatusCode,
    title: impl Into<String>,
    detail: impl Into<String>,
) -> Response {
    let document = api_error(status, title, detail);
    let mut response = (status, Json(document)).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
