use anyhow::{anyhow, Result};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::core::{Config, SessionSummary, UserProfile};
use crate::server::web::types::{OkMessage, ServerStatus};

/// Talks to a running polling server, for the operator side of the CLI.
#[derive(Debug, Clone)]
pub struct PollPilotClient {
    base_url: String,
    client: Client,
}

impl PollPilotClient {
    pub fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self { base_url, client })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.server_url())
    }

    pub async fn is_server_running(&self) -> bool {
        self.client
            .get(format!("{}/status", self.base_url))
            .timeout(Duration::from_secs(2))
            .send()
            .await
            .is_ok()
    }

    pub async fn status(&self) -> Result<ServerStatus> {
        let response = self
            .client
            .get(format!("{}/status", self.base_url))
            .send()
            .await?;
        decode(response, "status").await
    }

    pub async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let response = self
            .client
            .get(format!("{}/sessions", self.base_url))
            .send()
            .await?;
        decode(response, "list sessions").await
    }

    /// Full session snapshot as the server renders it.
    pub async fn get_session(&self, session_id: &str) -> Result<serde_json::Value> {
        let response = self
            .client
            .get(format!("{}/sessions/{}", self.base_url, session_id))
            .send()
            .await?;
        decode(response, "get session").await
    }

    pub async fn profile(&self) -> Result<Option<UserProfile>> {
        let response = self
            .client
            .get(format!("{}/get-user-data", self.base_url))
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(response, "get profile").await.map(Some)
    }

    pub async fn set_profile(&self, profile: &UserProfile) -> Result<OkMessage> {
        tracing::debug!("POST /set-user-data for {}", profile.email);
        let response = self
            .client
            .post(format!("{}/set-user-data", self.base_url))
            .json(profile)
            .send()
            .await?;
        decode(response, "set profile").await
    }

    pub async fn clear_profile(&self) -> Result<OkMessage> {
        let response = self
            .client
            .post(format!("{}/clear-user-data", self.base_url))
            .send()
            .await?;
        decode(response, "clear profile").await
    }
}

async fn decode<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::error!("{} failed with status {}: {}", action, status, error_text);
        return Err(anyhow!("Failed to {}: {} - {}", action, status, error_text));
    }
    Ok(response.json().await?)
}
