// PollPilot Library
// Session-driven command dispatch for browser agents over HTTP polling

pub mod cli;
pub mod client;
pub mod core;
pub mod server;

// Re-export commonly used types
pub use client::PollPilotClient;
pub use crate::core::{BuiltinCatalog, Command, CommandCatalog, CommandResult, Config, PageState, UserProfile};
pub use server::{router, SessionManagerHandle};

// Error handling
pub use anyhow::{Error, Result};
