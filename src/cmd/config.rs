use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cache::DEFAULT_MARKER_FILE;
use crate::config::{POLL_INTERVAL, SettingsArgs};
use crate::infra::{discord, github};

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the resolved settings (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand, settings: &SettingsArgs) {
    match command {
        ConfigCommand::Show => {
            for line in show_lines(settings) {
                println!("{line}");
            }
        }
    }
}

fn show_lines(settings: &SettingsArgs) -> Vec<String> {
    let cache_file = settings
        .cache_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MARKER_FILE));

    vec![
        format!("Discord token: {}", mask_secret(&settings.discord_token)),
        format!("Discord channel: {}", display_value(&settings.channel_id)),
        format!("GitHub repository: {}", display_value(&settings.repo)),
        format!("GitHub token: {}", mask_secret(&settings.github_token)),
        format!("Marker file: {}", cache_file.display()),
        format!(
            "GitHub API: {}",
            settings
                .github_api_url
                .as_deref()
                .unwrap_or(github::DEFAULT_API_URL)
        ),
        format!(
            "Discord API: {}",
            settings
                .discord_api_url
                .as_deref()
                .unwrap_or(discord::DEFAULT_API_URL)
        ),
        format!("Poll interval: {}s", POLL_INTERVAL.as_secs()),
    ]
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(token) if token.chars().count() > 6 => {
            let chars: Vec<char> = token.chars().collect();
            let prefix: String = chars[..3].iter().collect();
            let suffix: String = chars[chars.len() - 3..].iter().collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
