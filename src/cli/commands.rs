use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pollpilot")]
#[command(about = "Drive browser agents through scripted steps over HTTP polling", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the polling server in the foreground
    Serve {
        /// Address to bind (defaults to the config value)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (defaults to the config value)
        #[arg(short, long)]
        port: Option<u16>,
        #[command(flatten)]
        profile: ProfileArgs,
        /// Generate a random profile around this mailbox address
        #[arg(long, value_name = "EMAIL", conflicts_with_all = ["first_name", "last_name", "email", "password"])]
        generate_for: Option<String>,
    },
    /// Show whether the server is up and what it holds
    Status,
    /// List sessions, or show one session in full
    Sessions {
        /// Session ID to inspect
        session_id: Option<String>,
    },
    /// Manage the profile typed into the signup flow
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProfileCommands {
    /// Print the loaded profile
    Show,
    /// Load a profile from explicit values
    Set {
        #[command(flatten)]
        profile: ProfileArgs,
    },
    /// Load a random profile for the given mailbox address
    Generate {
        #[arg(long)]
        email: String,
    },
    /// Drop the loaded profile
    Clear,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ProfileArgs {
    #[arg(long, requires_all = ["last_name", "email", "password"])]
    pub first_name: Option<String>,
    #[arg(long, requires_all = ["first_name", "email", "password"])]
    pub last_name: Option<String>,
    #[arg(long, requires_all = ["first_name", "last_name", "password"])]
    pub email: Option<String>,
    #[arg(long, requires_all = ["first_name", "last_name", "email"])]
    pub password: Option<String>,
}
