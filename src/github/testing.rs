// src/github/testing.rs
// =============================================================================
// In-memory GithubApi for unit tests.
//
// Each endpoint answers through a closure so a test can decide per call what
// comes back. Every page request is recorded as (per_page, page).
// =============================================================================

use std::sync::Mutex;

use anyhow::anyhow;
use async_trait::async_trait;

use super::{GithubApi, RepositoryResponse, UserResponse};
use crate::error::ApiError;

type UserHandler = Box<dyn Fn(&str) -> Result<UserResponse, ApiError> + Send + Sync>;
type PageHandler = Box<dyn Fn(u32, u32) -> Result<Vec<RepositoryResponse>, ApiError> + Send + Sync>;
type RepositoryHandler = Box<dyn Fn(&str) -> Result<RepositoryResponse, ApiError> + Send + Sync>;

#[derive(Default)]
pub(crate) struct FakeGithub {
    user: Option<UserHandler>,
    pages: Option<PageHandler>,
    repository: Option<RepositoryHandler>,
    page_requests: Mutex<Vec<(u32, u32)>>,
}

impl FakeGithub {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_user(
        mut self,
        handler: impl Fn(&str) -> Result<UserResponse, ApiError> + Send + Sync + 'static,
    ) -> Self {
        self.user = Some(Box::new(handler));
        self
    }

    pub(crate) fn with_pages(
        mut self,
        handler: impl Fn(u32, u32) -> Result<Vec<RepositoryResponse>, ApiError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.pages = Some(Box::new(handler));
        self
    }

    pub(crate) fn with_repository(
        mut self,
        handler: impl Fn(&str) -> Result<RepositoryResponse, ApiError> + Send + Sync + 'static,
    ) -> Self {
        self.repository = Some(Box::new(handler));
        self
    }

    /// Requested pages as (per_page, page), sorted by page number.
    pub(crate) fn page_requests(&self) -> Vec<(u32, u32)> {
        let mut requests = self.page_requests.lock().unwrap().clone();
        requests.sort_by_key(|&(_, page)| page);
        requests
    }
}

#[async_trait]
impl GithubApi for FakeGithub {
    async fn get_user(&self, username: &str) -> Result<UserResponse, ApiError> {
        match &self.user {
            Some(handler) => handler(username),
            None => Err(anyhow!("unexpected get_user({})", username).into()),
        }
    }

    async fn get_user_repos(
        &self,
        _username: &str,
        per_page: u32,
        page: u32,
    ) -> Result<Vec<RepositoryResponse>, ApiError> {
        self.page_requests.lock().unwrap().push((per_page, page));
        match &self.pages {
            Some(handler) => handler(per_page, page),
            None => Err(anyhow!("unexpected get_user_repos(page {})", page).into()),
        }
    }

    async fn get_repository(
        &self,
        _username: &str,
        repo_name: &str,
    ) -> Result<RepositoryResponse, ApiError> {
        match &self.repository {
            Some(handler) => handler(repo_name),
            None => Err(anyhow!("unexpected get_repository({})", repo_name).into()),
        }
    }
}

pub(crate) fn user_response(login: &str, public_repos: u32) -> UserResponse {
    UserResponse {
        id: 583231,
        name: Some("The Octocat".to_string()),
        username: Some(login.to_string()),
        avatar_url: format!("https://avatars.githubusercontent.com/{}", login),
        public_repos,
    }
}

pub(crate) fn repository_response(id: u64, forks_count: u32) -> RepositoryResponse {
    RepositoryResponse {
        id,
        name: format!("repo-{}", id),
        description: Some(format!("Repository number {}", id)),
        full_name: format!("octocat/repo-{}", id),
        html_url: format!("https://github.com/octocat/repo-{}", id),
        forks_count,
        stargazers_count: 10,
        watchers_count: 10,
    }
}

// A full page of `len` repositories, ids starting at `first_id`
pub(crate) fn repository_page(first_id: u64, len: u64, forks_each: u32) -> Vec<RepositoryResponse> {
    (first_id..first_id + len)
        .map(|id| repository_response(id, forks_each))
        .collect()
}

pub(crate) fn status_error(status: u16) -> ApiError {
    ApiError::Status {
        status,
        url: "https://api.github.com/test".to_string(),
    }
}
