use clap::Parser;
use tracing_subscriber::EnvFilter;

use pollpilot::cli::handlers;
use pollpilot::cli::{Cli, Commands};
use pollpilot::{Config, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pollpilot=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Serve {
            host,
            port,
            profile,
            generate_for,
        } => handlers::serve(config, host, port, profile, generate_for).await,
        Commands::Status => handlers::status(config).await,
        Commands::Sessions { session_id } => handlers::sessions(config, session_id).await,
        Commands::Profile { command } => handlers::profile(config, command).await,
    }
}
