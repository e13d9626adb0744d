use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{
    Client,
    header::{ACCEPT, AUTHORIZATION, USER_AGENT},
};
use serde::Deserialize;

use crate::config::RepositoryId;
use crate::domain::commit::CommitRecord;
use crate::error::{AppError, AppResult};
use crate::services::SourceHostService;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

pub struct GitHubClient {
    http: Client,
    api_url: String,
    repository: RepositoryId,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_url: String, repository: RepositoryId, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            api_url,
            repository,
            token: token.filter(|token| !token.trim().is_empty()),
        }
    }

    fn commits_endpoint(&self) -> String {
        format!(
            "{}/repos/{}/{}/commits",
            self.api_url.trim_end_matches('/'),
            self.repository.owner,
            self.repository.name
        )
    }

    async fn list_commits(&self) -> AppResult<Vec<CommitRecord>> {
        let mut request = self
            .http
            .get(self.commits_endpoint())
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, user_agent());
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request
            .send()
            .await
            .map_err(|err| AppError::Network(format!("failed to call GitHub: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|err| AppError::Network(format!("failed to read GitHub response: {err}")))?;
        decode_commits(&body)
    }
}

#[async_trait]
impl SourceHostService for GitHubClient {
    async fn feat_commits(&self) -> AppResult<Vec<CommitRecord>> {
        let commits = self.list_commits().await?;
        Ok(commits.into_iter().filter(CommitRecord::is_feat).collect())
    }
}

pub fn user_agent() -> String {
    format!("plumbot/{}", env!("CARGO_PKG_VERSION"))
}

fn decode_commits(body: &str) -> AppResult<Vec<CommitRecord>> {
    let payload: Vec<GitHubCommitResponse> =
        serde_json::from_str(body).map_err(|err| AppError::Decode(err.to_string()))?;
    Ok(payload.into_iter().map(CommitRecord::from).collect())
}

#[derive(Deserialize)]
struct GitHubCommitResponse {
    sha: String,
    commit: GitHubCommit,
    html_url: String,
}

#[derive(Deserialize)]
struct GitHubCommit {
    message: String,
    author: GitHubAuthor,
}

#[derive(Deserialize)]
struct GitHubAuthor {
    name: String,
    date: DateTime<Utc>,
}

impl From<GitHubCommitResponse> for CommitRecord {
    fn from(value: GitHubCommitResponse) -> Self {
        Self {
            id: value.sha,
            message: value.commit.message,
            author_name: value.commit.author.name,
            author_date: value.commit.author.date,
            permalink: value.html_url,
        }
    }
}
