use async_trait::async_trait;
use reqwest::{
    Client, Response,
    header::{AUTHORIZATION, USER_AGENT},
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::infra::github::user_agent;
use crate::services::ChatService;

pub const DEFAULT_API_URL: &str = "https://discord.com/api/v10";

/// Bot-token client that posts into one fixed channel.
pub struct DiscordClient {
    http: Client,
    api_url: String,
    token: String,
    channel_id: String,
}

impl DiscordClient {
    pub fn new(api_url: String, token: String, channel_id: String) -> Self {
        Self {
            http: Client::new(),
            api_url,
            token,
            channel_id,
        }
    }

    /// Checks the bot credential and returns the bot's user name.
    pub async fn connect(&self) -> AppResult<String> {
        let response = self
            .http
            .get(self.endpoint("users/@me"))
            .header(AUTHORIZATION, self.auth_header())
            .header(USER_AGENT, user_agent())
            .send()
            .await
            .map_err(|err| AppError::Chat(format!("failed to reach Discord: {err}")))?;

        let response = ensure_success(response).await?;
        let user: DiscordUser = response
            .json()
            .await
            .map_err(|err| AppError::Chat(format!("failed to parse Discord user: {err}")))?;
        Ok(user.username)
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.token)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl ChatService for DiscordClient {
    async fn send_message(&self, content: &str) -> AppResult<()> {
        let response = self
            .http
            .post(self.endpoint(&format!("channels/{}/messages", self.channel_id)))
            .header(AUTHORIZATION, self.auth_header())
            .header(USER_AGENT, user_agent())
            .json(&CreateMessageRequest { content })
            .send()
            .await
            .map_err(|err| AppError::Chat(format!("failed to reach Discord: {err}")))?;

        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> AppResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<unable to read response>".to_string());
    Err(AppError::Chat(format!("Discord responded with {status}: {body}")))
}

#[derive(Serialize)]
struct CreateMessageRequest<'a> {
    content: &'a str,
}

#[derive(Deserialize)]
struct DiscordUser {
    username: String,
}
