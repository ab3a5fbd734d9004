use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::profile::UserProfile;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    /// Preloaded into the session manager when the server starts.
    #[serde(default)]
    pub profile: Option<ProfileConfig>,
}

/// `[profile]` table. Keys are snake_case like the rest of the file; the
/// HTTP form of the same data is `UserProfile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl From<ProfileConfig> for UserProfile {
    fn from(profile: ProfileConfig) -> Self {
        UserProfile {
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            password: profile.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_server_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

/// Port the browser agent polls by default.
pub fn default_server_port() -> u16 {
    8080
}

impl Config {
    pub fn load() -> Result<Self> {
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "pollpilot", "pollpilot") {
            let config_file = config_dir.config_dir().join("config.toml");
            if config_file.exists() {
                let content = std::fs::read_to_string(&config_file)?;
                let config = Self::from_toml_str(&content)?;
                tracing::debug!("Loaded config from {:?}", config_file);
                return Ok(config);
            }
        }
        Ok(Config::default())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server.host, self.server.port)
    }
}
