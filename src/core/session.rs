use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use super::command::{Command, CommandResult};
use super::wire::null_as_default;

/// Snapshot of what a browser agent currently sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PageState {
    pub session_id: String,
    pub page_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hostname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pathname: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[ts(type = "Record<string, unknown> | null")]
    pub available_elements: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[ts(type = "number")]
    pub timestamp: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_processing: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    #[ts(type = "string | null")]
    pub current_step: String,
}

/// Body of the get-next-command phase. Only `session_id` drives dispatch.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NextCommandRequest {
    pub session_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    #[ts(type = "string | null")]
    pub current_step: String,
}

/// Acknowledgement returned by report-state and report-result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Receipt {
    pub status: String,
    pub session_id: String,
}

impl Receipt {
    pub fn received(session_id: impl Into<String>) -> Self {
        Self {
            status: "received".to_string(),
            session_id: session_id.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SessionStatus {
    Active,
    Waiting,
    Completed,
    Error,
}

/// Server-side progress of one agent through its command sequence.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: String,
    pub cursor: usize,
    pub current_page_type: String,
    pub last_page_state: Option<PageState>,
    pub commands: Vec<Command>,
    pub results: Vec<CommandResult>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub status: SessionStatus,
}

impl Session {
    pub fn new(session_id: impl Into<String>, page_type: impl Into<String>, commands: Vec<Command>) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            cursor: 0,
            current_page_type: page_type.into(),
            last_page_state: None,
            commands,
            results: Vec::new(),
            created_at: now,
            last_activity: now,
            status: SessionStatus::Active,
        }
    }

    pub fn remaining(&self) -> usize {
        self.commands.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.commands.len()
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.session_id.clone(),
            status: self.status,
            cursor: self.cursor,
            total_commands: self.commands.len(),
            current_page_type: self.current_page_type.clone(),
            result_count: self.results.len(),
            last_activity: self.last_activity,
        }
    }
}

/// Compact listing entry for the sessions endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub status: SessionStatus,
    pub cursor: usize,
    pub total_commands: usize,
    pub current_page_type: String,
    pub result_count: usize,
    pub last_activity: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_state_minimal_body() {
        let state: PageState = serde_json::from_str(r#"{"sessionId":"s1","pageType":"main"}"#).unwrap();

        assert_eq!(state.session_id, "s1");
        assert_eq!(state.page_type, "main");
        assert!(state.available_elements.is_empty());
        assert!(!state.is_processing);
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let state: PageState = serde_json::from_str(
            r#"{"sessionId":"s1","pageType":"unknown","url":null,"availableElements":null,"isProcessing":null,"currentStep":null}"#,
        )
        .unwrap();
        assert_eq!(state.current_step, "");
        assert_eq!(state.url, "");
        assert!(state.available_elements.is_empty());

        let req: NextCommandRequest =
            serde_json::from_str(r#"{"sessionId":"s1","pageType":"main","currentStep":null}"#).unwrap();
        assert_eq!(req.current_step, "");
    }

    #[test]
    fn test_page_state_requires_session_id() {
        let parsed = serde_json::from_str::<PageState>(r#"{"pageType":"main"}"#);
        assert!(parsed.is_err());
    }
}
