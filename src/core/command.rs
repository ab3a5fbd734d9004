use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use super::wire::null_as_default;

/// The action a browser agent performs for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CommandKind {
    Click,
    Type,
    Wait,
    Complete,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Click => "click",
            CommandKind::Type => "type",
            CommandKind::Wait => "wait",
            CommandKind::Complete => "complete",
        }
    }
}

/// A single instruction handed to an agent. Pure data; the agent decides how
/// to carry out `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Command {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: CommandKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub element_type: Option<String>,
    /// Milliseconds to pause after a click.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub delay: Option<u32>,
    /// Milliseconds to wait for a `wait` command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "Record<string, unknown> | undefined")]
    pub data: Option<Map<String, Value>>,
}

impl Command {
    fn bare(id: impl Into<String>, kind: CommandKind, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            description: description.into(),
            selector: None,
            index: None,
            text: None,
            value: None,
            name: None,
            element_type: None,
            delay: None,
            duration: None,
            url: None,
            condition: None,
            message: None,
            data: None,
        }
    }

    /// Activate the element whose visible text matches `text`.
    pub fn click(
        id: impl Into<String>,
        description: impl Into<String>,
        text: impl Into<String>,
        element_type: impl Into<String>,
        delay_ms: u32,
    ) -> Self {
        Self {
            text: Some(text.into()),
            element_type: Some(element_type.into()),
            delay: Some(delay_ms),
            ..Self::bare(id, CommandKind::Click, description)
        }
    }

    /// Write `value` into the field called `name`.
    pub fn type_into(
        id: impl Into<String>,
        description: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
            ..Self::bare(id, CommandKind::Type, description)
        }
    }

    pub fn wait(id: impl Into<String>, description: impl Into<String>, duration_ms: u32) -> Self {
        Self {
            duration: Some(duration_ms),
            ..Self::bare(id, CommandKind::Wait, description)
        }
    }

    pub fn complete(
        id: impl Into<String>,
        description: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::bare(id, CommandKind::Complete, description)
        }
    }
}

/// What an agent reports after trying to execute a command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CommandResult {
    pub session_id: String,
    pub command_id: String,
    /// The command as the agent echoes it back, kept verbatim. Agents may
    /// drop fields (including `id`) or add their own.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "Record<string, unknown> | undefined")]
    pub command: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    #[ts(type = "Record<string, unknown> | null")]
    pub result: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    #[ts(type = "number")]
    pub timestamp: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum WaitReason {
    UnknownSession,
    SequenceExhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum WaitKind {
    #[serde(rename = "wait_for_next")]
    WaitForNext,
}

/// Sentinel telling the agent there is nothing to do right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WaitForNext {
    #[serde(rename = "type")]
    pub kind: WaitKind,
    pub message: String,
    pub reason: WaitReason,
}

impl WaitForNext {
    pub fn unknown_session() -> Self {
        Self {
            kind: WaitKind::WaitForNext,
            message: "Session not found".to_string(),
            reason: WaitReason::UnknownSession,
        }
    }

    pub fn sequence_exhausted() -> Self {
        Self {
            kind: WaitKind::WaitForNext,
            message: "All commands have been dispatched".to_string(),
            reason: WaitReason::SequenceExhausted,
        }
    }
}

/// Response body of the get-next-command phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum NextCommand {
    Wait(WaitForNext),
    Dispatch(Command),
}

impl NextCommand {
    pub fn command(&self) -> Option<&Command> {
        match self {
            NextCommand::Dispatch(command) => Some(command),
            NextCommand::Wait(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_omits_unset_fields() {
        let command = Command::wait("unknown_01", "Wait on unknown page", 2000);
        let json = serde_json::to_value(&command).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": "unknown_01",
                "type": "wait",
                "description": "Wait on unknown page",
                "duration": 2000
            })
        );
    }

    #[test]
    fn test_wait_sentinel_wire_shape() {
        let json = serde_json::to_value(NextCommand::Wait(WaitForNext::sequence_exhausted())).unwrap();

        assert_eq!(json["type"], "wait_for_next");
        assert_eq!(json["reason"], "sequence_exhausted");
        assert!(json["message"].is_string());
    }

    #[test]
    fn test_result_keeps_echoed_command_verbatim() {
        let result: CommandResult = serde_json::from_value(serde_json::json!({
            "sessionId": "s1",
            "commandId": "scroll",
            "command": { "type": "scroll", "pixels": 300 },
            "success": true
        }))
        .unwrap();

        let command = result.command.unwrap();
        assert_eq!(command["type"], "scroll");
        assert!(command.get("id").is_none());
        assert!(result.result.is_empty());
        assert_eq!(result.error, None);
    }

    #[test]
    fn test_result_nulls_and_missing_success() {
        let result: CommandResult = serde_json::from_value(serde_json::json!({
            "sessionId": "s1",
            "commandId": "auth_03",
            "result": null,
            "error": null,
            "url": null
        }))
        .unwrap();

        assert!(!result.success);
        assert!(result.result.is_empty());
        assert_eq!(result.url, "");
    }
}
