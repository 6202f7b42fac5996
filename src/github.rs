use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, Url, header::ACCEPT};
use serde::Serialize;
use thiserror::Error;
use crate::config::Config;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("comment-relay/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid API url: {0}")]
    InvalidUrl(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Committer {
    pub name: String,
    pub email: String,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
/// `comitter` is the key the deployed function has always sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateFileRequest {
    pub message: String,
    pub comitter: Committer,
    pub content: String,
}

/// What came back from the Contents API, before any interpretation.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn create_file(&self, path: &str, request: &CreateFileRequest) -> Result<UpstreamResponse, GithubError>;
}

#[derive(Clone)]
pub struct GithubClient {
    http: Client,
    api_url: Url,
    owner: String,
    repo: String,
    token: String,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<Self, GithubError> {
        let api_url = Url::parse(&config.github_api_url)
            .map_err(|e| GithubError::InvalidUrl(e.to_string()))?;
        if api_url.cannot_be_a_base() {
            return Err(GithubError::InvalidUrl(config.github_api_url.clone()));
        }
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.github_timeout))
            .build()?;
        Ok(Self {
            http,
            api_url,
            owner: config.github_user.clone(),
            repo: config.github_repo.clone(),
            token: config.github_token.clone(),
        })
    }

    pub fn contents_url(&self, path: &str) -> Result<Url, GithubError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| GithubError::InvalidUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"])
            .extend(path.split('/'));
        Ok(url)
    }
}

#[async_trait]
impl ContentStore for GithubClient {
    async fn create_file(&self, path: &str, request: &CreateFileRequest) -> Result<UpstreamResponse, GithubError> {
        let url = self.contents_url(path)?;
        let response = self.http
            .put(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .json(request)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(UpstreamResponse { status, body })
    }
}
