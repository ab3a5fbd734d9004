//! The three polling phases over the session registry.
//!
//! `DispatchEngine` is plain synchronous state; the session manager task owns
//! the only instance, which serializes every call.

use std::sync::Arc;

use thiserror::Error;

use super::registry::SessionRegistry;
use crate::core::{
    CommandCatalog, CommandResult, NextCommand, PageState, Receipt, Session, SessionStatus,
    SessionSummary, UserProfile, WaitForNext,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("session '{0}' not found")]
    SessionNotFound(String),

    #[error("session manager is not running")]
    Unavailable,
}

pub struct DispatchEngine {
    registry: SessionRegistry,
    catalog: Arc<dyn CommandCatalog>,
    profile: Option<UserProfile>,
}

impl DispatchEngine {
    pub fn new(catalog: Arc<dyn CommandCatalog>) -> Self {
        Self {
            registry: SessionRegistry::new(),
            catalog,
            profile: None,
        }
    }

    /// Phase one. Creates the session (and compiles its sequence) on first
    /// contact; afterwards only the observed page is refreshed.
    pub fn report_state(&mut self, state: PageState) -> Receipt {
        let catalog = &self.catalog;
        let profile = self.profile.as_ref();

        let (session, created) =
            self.registry
                .find_or_create(&state.session_id, &state.page_type, |page_type| {
                    catalog.compile(page_type, profile)
                });

        if created {
            if profile.is_none() && session.commands.iter().any(|c| c.value.is_some()) {
                tracing::warn!(
                    "Session {} compiled '{}' without a user profile; typed values are empty",
                    state.session_id,
                    state.page_type
                );
            }
            tracing::info!(
                "New session {} on '{}' with {} commands",
                state.session_id,
                state.page_type,
                session.commands.len()
            );
        }

        tracing::info!(
            "State report: {} ({}) - {}",
            state.session_id,
            state.page_type,
            state.url
        );

        session.current_page_type = state.page_type.clone();
        session.touch();
        let receipt = Receipt::received(&state.session_id);
        session.last_page_state = Some(state);
        receipt
    }

    /// Phase two. Hands out the command under the cursor and advances it, so
    /// each position is delivered at most once.
    pub fn next_command(&mut self, session_id: &str) -> NextCommand {
        let Some(session) = self.registry.get_mut(session_id) else {
            tracing::debug!("Next command requested for unknown session {}", session_id);
            return NextCommand::Wait(WaitForNext::unknown_session());
        };

        session.touch();

        if session.is_exhausted() {
            if session.status != SessionStatus::Error {
                session.status = SessionStatus::Completed;
            }
            return NextCommand::Wait(WaitForNext::sequence_exhausted());
        }

        let command = session.commands[session.cursor].clone();
        session.cursor += 1;

        tracing::info!(
            "Dispatching to {}: {} {} ({}), {} remaining",
            session_id,
            command.id,
            command.kind.as_str(),
            command.description,
            session.remaining()
        );

        NextCommand::Dispatch(command)
    }

    /// Phase three. Results are stored as reported; a failure marks the
    /// session but never holds back the cursor.
    pub fn report_result(&mut self, result: CommandResult) -> Result<Receipt, DispatchError> {
        let session = self
            .registry
            .get_mut(&result.session_id)
            .ok_or_else(|| DispatchError::SessionNotFound(result.session_id.clone()))?;

        if result.success {
            tracing::info!("Command succeeded: {} - {}", result.session_id, result.command_id);
        } else {
            tracing::warn!(
                "Command failed: {} - {}: {}",
                result.session_id,
                result.command_id,
                result.error.as_deref().unwrap_or("no error given")
            );
            session.status = SessionStatus::Error;
        }

        session.touch();
        let receipt = Receipt::received(&result.session_id);
        session.results.push(result);
        Ok(receipt)
    }

    pub fn session(&self, session_id: &str) -> Option<&Session> {
        self.registry.get(session_id)
    }

    pub fn summaries(&self) -> Vec<SessionSummary> {
        self.registry.summaries()
    }

    pub fn session_count(&self) -> usize {
        self.registry.len()
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    pub fn clear_profile(&mut self) {
        self.profile = None;
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BuiltinCatalog, CommandKind, WaitReason};

    fn engine() -> DispatchEngine {
        DispatchEngine::new(Arc::new(BuiltinCatalog))
    }

    fn page(session_id: &str, page_type: &str) -> PageState {
        PageState {
            session_id: session_id.to_string(),
            page_type: page_type.to_string(),
            url: format!("https://example.test/{}", page_type),
            hostname: "example.test".to_string(),
            pathname: format!("/{}", page_type),
            available_elements: Default::default(),
            timestamp: 0,
            is_processing: false,
            current_step: String::new(),
        }
    }

    fn result(session_id: &str, command_id: &str, success: bool) -> CommandResult {
        CommandResult {
            session_id: session_id.to_string(),
            command_id: command_id.to_string(),
            command: None,
            success,
            result: Default::default(),
            error: (!success).then(|| "timeout".to_string()),
            timestamp: 0,
            url: String::new(),
        }
    }

    #[test]
    fn test_report_state_acknowledges() {
        let mut engine = engine();
        let receipt = engine.report_state(page("s1", "main"));

        assert_eq!(receipt, Receipt::received("s1"));
        assert_eq!(engine.session_count(), 1);
    }

    #[test]
    fn test_second_report_keeps_sequence() {
        let mut engine = engine();
        engine.report_state(page("s1", "main"));
        let before = engine.session("s1").unwrap().commands.clone();

        engine.report_state(page("s1", "authenticator"));
        let session = engine.session("s1").unwrap();

        assert_eq!(session.commands, before);
        assert_eq!(session.current_page_type, "authenticator");
        assert_eq!(
            session.last_page_state.as_ref().unwrap().page_type,
            "authenticator"
        );
    }

    #[test]
    fn test_main_flow_then_exhaustion() {
        let mut engine = engine();
        engine.report_state(page("s1", "main"));

        let first = engine.next_command("s1");
        assert_eq!(first.command().unwrap().id, "main_01");
        assert_eq!(first.command().unwrap().kind, CommandKind::Click);

        let second = engine.next_command("s1");
        assert_eq!(second.command().unwrap().id, "main_02");

        match engine.next_command("s1") {
            NextCommand::Wait(wait) => assert_eq!(wait.reason, WaitReason::SequenceExhausted),
            other => panic!("expected wait, got {:?}", other),
        }
        let session = engine.session("s1").unwrap();
        assert_eq!(session.cursor, 2);
        assert_eq!(session.status, SessionStatus::Completed);
    }

    #[test]
    fn test_cursor_never_passes_sequence_length() {
        let mut engine = engine();
        engine.report_state(page("s1", "dashboard"));

        let mut last_cursor = 0;
        for _ in 0..5 {
            engine.next_command("s1");
            let cursor = engine.session("s1").unwrap().cursor;
            assert!(cursor >= last_cursor);
            last_cursor = cursor;
        }
        assert_eq!(last_cursor, 1);
    }

    #[test]
    fn test_unknown_session_waits_without_creating() {
        let mut engine = engine();

        match engine.next_command("ghost") {
            NextCommand::Wait(wait) => assert_eq!(wait.reason, WaitReason::UnknownSession),
            other => panic!("expected wait, got {:?}", other),
        }
        assert_eq!(engine.session_count(), 0);
    }

    #[test]
    fn test_result_for_unknown_session_is_rejected() {
        let mut engine = engine();
        let err = engine.report_result(result("ghost", "x", true)).unwrap_err();

        assert_eq!(err, DispatchError::SessionNotFound("ghost".to_string()));
        assert_eq!(engine.session_count(), 0);
    }

    #[test]
    fn test_failure_marks_error_but_dispatch_continues() {
        let mut engine = engine();
        engine.report_state(page("s1", "main"));
        engine.next_command("s1");

        engine.report_result(result("s1", "x", false)).unwrap();
        assert_eq!(engine.session("s1").unwrap().status, SessionStatus::Error);

        let next = engine.next_command("s1");
        assert_eq!(next.command().unwrap().id, "main_02");

        // exhaustion does not clear a recorded failure
        engine.next_command("s1");
        assert_eq!(engine.session("s1").unwrap().status, SessionStatus::Error);
    }

    #[test]
    fn test_results_accepted_for_never_issued_commands() {
        let mut engine = engine();
        engine.report_state(page("s1", "main"));

        engine.report_result(result("s1", "fabricated_99", true)).unwrap();
        let session = engine.session("s1").unwrap();

        assert_eq!(session.results.len(), 1);
        assert_eq!(session.results[0].command_id, "fabricated_99");
        assert_eq!(session.status, SessionStatus::Active);
    }

    #[test]
    fn test_profile_read_at_creation_only() {
        let mut engine = engine();
        engine.set_profile(UserProfile {
            first_name: "Ada".to_string(),
            last_name: "Byron".to_string(),
            email: "ada@example.test".to_string(),
            password: "pw".to_string(),
        });
        engine.report_state(page("s1", "authenticator"));
        engine.clear_profile();
        engine.report_state(page("s1", "authenticator"));

        let email = engine.session("s1").unwrap().commands[4].value.clone();
        assert_eq!(email.as_deref(), Some("ada@example.test"));
        assert!(engine.profile().is_none());
    }
}
