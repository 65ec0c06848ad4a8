use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    pub avatar_url: String,
    pub html_url: String,
    pub contributions: i64,
}

/// Source of the contributor list shown on the public home page.
#[async_trait]
pub trait ContributorsClient: Send + Sync {
    async fn fetch_contributors(&self) -> Result<Vec<Contributor>, AppError>;
}

pub struct GithubClient {
    client: Client,
    repo: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(repo: String, token: Option<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|_| AppError::InternalServerError)?;
        Ok(Self {
            client,
            repo,
            token,
        })
    }
}

#[async_trait]
impl ContributorsClient for GithubClient {
    async fn fetch_contributors(&self) -> Result<Vec<Contributor>, AppError> {
        let url = format!("https://api.github.com/repos/{}/contributors", self.repo);

        let mut request = self
            .client
            .get(&url)
            .header("User-Agent", "campushub")
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|_| AppError::InternalServerError)?;

        if !response.status().is_success() {
            error!("GitHub contributors request failed: {}", response.status());
            return Err(AppError::InternalServerError);
        }

        response
            .json::<Vec<Contributor>>()
            .await
            .map_err(|e| {
                error!("Failed to parse contributors response: {}", e);
                AppError::InternalServerError
            })
    }
}

/// Used when the integration is not configured, and by tests.
pub struct NoopContributorsClient;

#[async_trait]
impl ContributorsClient for NoopContributorsClient {
    async fn fetch_contributors(&self) -> Result<Vec<Contributor>, AppError> {
        Ok(Vec::new())
    }
}
