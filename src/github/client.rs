// src/github/client.rs
// =============================================================================
// Raw access to the three GitHub endpoints we read.
//
// GithubApi is the seam between the core and HTTP: the repository layer and
// the paging source only talk to the trait, so tests swap in fakes and the
// real GithubClient stays a thin reqwest wrapper.
//
// Failures come back as ApiError, unclassified. Turning them into
// DomainError is the caller's job because the right mapping depends on the
// operation (a 404 means "no such user" for get_user only).
// =============================================================================

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::response::{RepositoryResponse, UserResponse};
use crate::config::{ClientConfig, ACCEPT_HEADER};
use crate::error::ApiError;

#[async_trait]
pub trait GithubApi: Send + Sync {
    /// GET /users/{username}
    async fn get_user(&self, username: &str) -> Result<UserResponse, ApiError>;

    /// GET /users/{username}/repos?per_page={per_page}&page={page}
    async fn get_user_repos(
        &self,
        username: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<RepositoryResponse>, ApiError>;

    /// GET /repos/{username}/{repo_name}
    async fn get_repository(
        &self,
        username: &str,
        repo_name: &str,
    ) -> Result<RepositoryResponse, ApiError>;
}

// reqwest-backed GithubApi
//
// Cloning is cheap: reqwest::Client is a handle to a shared connection pool.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    base_url: Url,
}

impl GithubClient {
    pub fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid API base URL '{}'", config.base_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("API base URL '{}' cannot hold a path", base_url));
        }

        // Sent on every request, so it lives in the client rather than per call
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { http, base_url })
    }

    // Appends path segments to the base URL; each segment is percent-encoded
    // so a username can never escape its position in the path
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("API base URL '{}' cannot hold a path", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self.http.get(url.clone()).send().await?;

        let status = response.status();
        debug!(%url, status = status.as_u16(), "response");
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Read bytes first so a malformed body is a Decode error rather than
        // a transport one
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl GithubApi for GithubClient {
    async fn get_user(&self, username: &str) -> Result<UserResponse, ApiError> {
        let url = self.endpoint(&["users", username])?;
        self.get_json(url).await
    }

    async fn get_user_repos(
        &self,
        username: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<RepositoryResponse>, ApiError> {
        let mut url = self.endpoint(&["users", username, "repos"])?;
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());
        self.get_json(url).await
    }

    async fn get_repository(
        &self,
        username: &str,
        repo_name: &str,
    ) -> Result<RepositoryResponse, ApiError> {
        let url = self.endpoint(&["repos", username, repo_name])?;
        self.get_json(url).await
    }
}
