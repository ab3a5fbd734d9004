use std::sync::Arc;

use crate::cli::{ProfileArgs, ProfileCommands};
use crate::client::PollPilotClient;
use crate::core::{BuiltinCatalog, UserProfile};
use crate::server::{start_web_server, SessionManagerHandle};
use crate::{Config, Result};

impl ProfileArgs {
    /// `None` unless every field was given; clap enforces all-or-nothing.
    pub fn into_profile(self) -> Option<UserProfile> {
        Some(UserProfile {
            first_name: self.first_name?,
            last_name: self.last_name?,
            email: self.email?,
            password: self.password?,
        })
    }
}

pub async fn serve(
    config: Config,
    host: Option<String>,
    port: Option<u16>,
    profile: ProfileArgs,
    generate_for: Option<String>,
) -> Result<()> {
    let host = host.unwrap_or(config.server.host);
    let port = port.unwrap_or(config.server.port);

    let session_manager = SessionManagerHandle::new(Arc::new(BuiltinCatalog));

    let profile = profile
        .into_profile()
        .or_else(|| generate_for.map(UserProfile::generate))
        .or(config.profile.map(UserProfile::from));

    match profile {
        Some(profile) => {
            print_profile(&profile);
            session_manager.set_profile(profile).await?;
        }
        None => tracing::warn!("No user profile loaded; signup fields will be left empty"),
    }

    println!("Polling server starting on http://{}:{}", host, port);
    println!("Use Ctrl+C to stop the server");
    start_web_server(&host, port, session_manager).await
}

pub async fn status(config: Config) -> Result<()> {
    let client = PollPilotClient::from_config(&config)?;

    if !client.is_server_running().await {
        println!("Server is not running at {}", config.server_url());
        println!("Start it with: pollpilot serve");
        return Ok(());
    }

    let status = client.status().await?;
    println!("Server is running ({})", status.time);
    println!("  sessions: {}", status.sessions);
    println!(
        "  profile:  {}",
        if status.profile_ready { "loaded" } else { "not loaded" }
    );
    Ok(())
}

pub async fn sessions(config: Config, session_id: Option<String>) -> Result<()> {
    let client = PollPilotClient::from_config(&config)?;

    if let Some(session_id) = session_id {
        let session = client.get_session(&session_id).await?;
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    let sessions = client.list_sessions().await?;
    if sessions.is_empty() {
        println!("No sessions yet");
        return Ok(());
    }

    println!("Sessions ({}):", sessions.len());
    for s in sessions {
        println!(
            "  {} [{:?}] {} step {}/{} results {} last seen {}",
            s.session_id,
            s.status,
            s.current_page_type,
            s.cursor,
            s.total_commands,
            s.result_count,
            s.last_activity.format("%H:%M:%S")
        );
    }
    Ok(())
}

pub async fn profile(config: Config, command: ProfileCommands) -> Result<()> {
    let client = PollPilotClient::from_config(&config)?;

    match command {
        ProfileCommands::Show => match client.profile().await? {
            Some(profile) => print_profile(&profile),
            None => println!("No profile loaded"),
        },
        ProfileCommands::Set { profile } => {
            let profile = profile
                .into_profile()
                .ok_or_else(|| anyhow::anyhow!("All profile fields are required"))?;
            client.set_profile(&profile).await?;
            print_profile(&profile);
        }
        ProfileCommands::Generate { email } => {
            let profile = UserProfile::generate(email);
            client.set_profile(&profile).await?;
            print_profile(&profile);
        }
        ProfileCommands::Clear => {
            let reply = client.clear_profile().await?;
            println!("{}", reply.message);
        }
    }
    Ok(())
}

fn print_profile(profile: &UserProfile) {
    println!("User profile:");
    println!("  name:     {} {}", profile.first_name, profile.last_name);
    println!("  email:    {}", profile.email);
    println!("  password: {}", profile.password);
}
