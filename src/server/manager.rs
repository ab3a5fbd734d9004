use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use super::dispatch::{DispatchEngine, DispatchError};
use crate::core::{
    CommandCatalog, CommandResult, NextCommand, PageState, Receipt, Session, SessionSummary,
    UserProfile,
};

// Commands that can be sent to the SessionManager actor
pub enum SessionCommand {
    ReportState {
        state: PageState,
        response_tx: oneshot::Sender<Receipt>,
    },
    NextCommand {
        session_id: String,
        response_tx: oneshot::Sender<NextCommand>,
    },
    ReportResult {
        result: CommandResult,
        response_tx: oneshot::Sender<Result<Receipt, DispatchError>>,
    },
    GetSession {
        session_id: String,
        response_tx: oneshot::Sender<Option<Session>>,
    },
    ListSessions {
        response_tx: oneshot::Sender<Vec<SessionSummary>>,
    },
    SessionCount {
        response_tx: oneshot::Sender<usize>,
    },
    SetProfile {
        profile: UserProfile,
        response_tx: oneshot::Sender<()>,
    },
    GetProfile {
        response_tx: oneshot::Sender<Option<UserProfile>>,
    },
    ClearProfile {
        response_tx: oneshot::Sender<()>,
    },
}

// Actor handle for communicating with SessionManager
#[derive(Clone)]
pub struct SessionManagerHandle {
    command_tx: mpsc::UnboundedSender<SessionCommand>,
}

// Owns the dispatch engine; one command at a time
struct SessionManagerActor {
    engine: DispatchEngine,
    command_rx: mpsc::UnboundedReceiver<SessionCommand>,
}

impl SessionManagerHandle {
    /// Spawns the manager task. Must be called inside a tokio runtime.
    pub fn new(catalog: Arc<dyn CommandCatalog>) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let actor = SessionManagerActor {
            engine: DispatchEngine::new(catalog),
            command_rx,
        };

        tokio::spawn(actor.run());

        Self { command_tx }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Result<T, DispatchError> {
        let (response_tx, response_rx) = oneshot::channel();

        self.command_tx
            .send(build(response_tx))
            .map_err(|_| DispatchError::Unavailable)?;

        response_rx.await.map_err(|_| DispatchError::Unavailable)
    }

    pub async fn report_state(&self, state: PageState) -> Result<Receipt, DispatchError> {
        self.request(|response_tx| SessionCommand::ReportState { state, response_tx })
            .await
    }

    pub async fn next_command(&self, session_id: &str) -> Result<NextCommand, DispatchError> {
        let session_id = session_id.to_string();
        self.request(|response_tx| SessionCommand::NextCommand {
            session_id,
            response_tx,
        })
        .await
    }

    pub async fn report_result(&self, result: CommandResult) -> Result<Receipt, DispatchError> {
        self.request(|response_tx| SessionCommand::ReportResult {
            result,
            response_tx,
        })
        .await?
    }

    pub async fn get_session(&self, session_id: &str) -> Option<Session> {
        let session_id = session_id.to_string();
        self.request(|response_tx| SessionCommand::GetSession {
            session_id,
            response_tx,
        })
        .await
        .unwrap_or(None)
    }

    pub async fn list_sessions(&self) -> Vec<SessionSummary> {
        self.request(|response_tx| SessionCommand::ListSessions { response_tx })
            .await
            .unwrap_or_default()
    }

    pub async fn session_count(&self) -> usize {
        self.request(|response_tx| SessionCommand::SessionCount { response_tx })
            .await
            .unwrap_or(0)
    }

    pub async fn set_profile(&self, profile: UserProfile) -> Result<(), DispatchError> {
        self.request(|response_tx| SessionCommand::SetProfile {
            profile,
            response_tx,
        })
        .await
    }

    pub async fn profile(&self) -> Option<UserProfile> {
        self.request(|response_tx| SessionCommand::GetProfile { response_tx })
            .await
            .unwrap_or(None)
    }

    pub async fn clear_profile(&self) -> Result<(), DispatchError> {
        self.request(|response_tx| SessionCommand::ClearProfile { response_tx })
            .await
    }
}

impl SessionManagerActor {
    async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command);
        }
        tracing::info!("SessionManager shutting down");
    }

    fn handle_command(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::ReportState { state, response_tx } => {
                let _ = response_tx.send(self.engine.report_state(state));
            }
            SessionCommand::NextCommand {
                session_id,
                response_tx,
            } => {
                let _ = response_tx.send(self.engine.next_command(&session_id));
            }
            SessionCommand::ReportResult {
                result,
                response_tx,
            } => {
                let _ = response_tx.send(self.engine.report_result(result));
            }
            SessionCommand::GetSession {
                session_id,
                response_tx,
            } => {
                let _ = response_tx.send(self.engine.session(&session_id).cloned());
            }
            SessionCommand::ListSessions { response_tx } => {
                let _ = response_tx.send(self.engine.summaries());
            }
            SessionCommand::SessionCount { response_tx } => {
                let _ = response_tx.send(self.engine.session_count());
            }
            SessionCommand::SetProfile {
                profile,
                response_tx,
            } => {
                tracing::info!("User profile set for {}", profile.email);
                self.engine.set_profile(profile);
                let _ = response_tx.send(());
            }
            SessionCommand::GetProfile { response_tx } => {
                let _ = response_tx.send(self.engine.profile().cloned());
            }
            SessionCommand::ClearProfile { response_tx } => {
                tracing::info!("User profile cleared");
                self.engine.clear_profile();
                let _ = response_tx.send(());
            }
        }
    }
}
