pub mod api_error;
pub mod catalog;
pub mod command;
pub mod config;
pub mod profile;
pub mod session;
pub mod wire;

pub use api_error::{api_error, api_error_response, ApiError, ApiErrorDocument};
pub use catalog::{BuiltinCatalog, CommandCatalog};
pub use command::{Command, CommandKind, CommandResult, NextCommand, WaitForNext, WaitReason};
pub use config::{Config, ProfileConfig};
pub use profile::UserProfile;
pub use session::{
    NextCommandRequest, PageState, Receipt, Session, SessionStatus, SessionSummary,
};
