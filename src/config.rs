use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Args;

use crate::cache::DEFAULT_MARKER_FILE;
use crate::error::{AppError, AppResult};
use crate::infra::{discord, github};

pub const POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Raw settings as read from flags or the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Discord bot token.
    #[arg(long, env = "DISCORD_TOKEN", hide_env_values = true, global = true)]
    pub discord_token: Option<String>,
    /// Channel that receives the announcements.
    #[arg(long, env = "DISCORD_CHANNEL_ID", global = true)]
    pub channel_id: Option<String>,
    /// Repository to watch, as `owner/name`.
    #[arg(long, env = "GITHUB_REPO", global = true)]
    pub repo: Option<String>,
    /// GitHub access token.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub github_token: Option<String>,
    /// File holding the id of the last announced commit.
    #[arg(long, env = "PLUMBOT_CACHE_FILE", global = true)]
    pub cache_file: Option<PathBuf>,
    #[arg(long, env = "GITHUB_API_URL", global = true)]
    pub github_api_url: Option<String>,
    #[arg(long, env = "DISCORD_API_URL", global = true)]
    pub discord_api_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryId {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepositoryId {
    type Err = AppError;

    fn from_str(value: &str) -> AppResult<Self> {
        let invalid = || {
            AppError::Configuration(format!(
                "repository must look like owner/name, got '{value}'"
            ))
        };
        let (owner, name) = value.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Immutable process configuration, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub discord_token: String,
    pub channel_id: String,
    pub repository: RepositoryId,
    pub github_token: String,
    pub cache_path: PathBuf,
    pub github_api_url: String,
    pub discord_api_url: String,
}

impl AppConfig {
    pub fn from_settings(settings: SettingsArgs) -> AppResult<Self> {
        let mut missing = Vec::new();
        let mut require = |value: Option<String>, name: &'static str| {
            let value = value.filter(|v| !v.trim().is_empty());
            if value.is_none() {
                missing.push(name);
            }
            value.unwrap_or_default()
        };

        let discord_token = require(settings.discord_token, "DISCORD_TOKEN");
        let channel_id = require(settings.channel_id, "DISCORD_CHANNEL_ID");
        let repo = require(settings.repo, "GITHUB_REPO");
        let github_token = require(settings.github_token, "GITHUB_TOKEN");

        if !missing.is_empty() {
            return Err(AppError::Configuration(format!(
                "missing required settings: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            discord_token,
            channel_id: channel_id.trim().to_string(),
            repository: repo.parse()?,
            github_token,
            cache_path: settings
                .cache_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MARKER_FILE)),
            github_api_url: settings
                .github_api_url
                .unwrap_or_else(|| github::DEFAULT_API_URL.to_string()),
            discord_api_url: settings
                .discord_api_url
                .unwrap_or_else(|| discord::DEFAULT_API_URL.to_string()),
        })
    }
}
