use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::core::api_error_response;
use crate::server::dispatch::DispatchError;
use crate::server::manager::SessionManagerHandle;

#[derive(Clone)]
pub struct AppState {
    pub session_manager: SessionManagerHandle,
}

/// JSON request body that rejects anything undecodable with a plain 400,
/// whatever the declared content type. Agents post from arbitrary pages and
/// do not always label their bodies.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        serde_json::from_slice(&bytes).map(JsonBody).map_err(|e| {
            tracing::debug!("Rejecting malformed body: {}", e);
            api_error_response(StatusCode::BAD_REQUEST, "Bad Request", "Invalid JSON")
        })
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let status = match self {
            DispatchError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            DispatchError::Unavailable => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let title = match self {
            DispatchError::SessionNotFound(_) => "Session Not Found",
            DispatchError::Unavailable => "Session Manager Unavailable",
        };
        api_error_response(status, title, self.to_string())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerStatus {
    pub status: String,
    pub message: String,
    pub time: String,
    pub sessions: usize,
    pub profile_ready: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OkMessage {
    pub status: String,
    pub message: String,
}

impl OkMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
        }
    }
}
