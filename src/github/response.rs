// src/github/response.rs
// =============================================================================
// JSON shapes returned by the GitHub REST API, and their conversion into the
// domain models.
//
// Only the fields we use are declared; serde skips the rest. Fields GitHub
// may send as null are Options here and become empty strings in the domain.
// =============================================================================

use serde::Deserialize;

use crate::model::{Repository, User};

// GET /users/{username}
#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub id: u64,
    pub name: Option<String>,
    #[serde(rename = "login")]
    pub username: Option<String>,
    pub avatar_url: String,
    pub public_repos: u32,
}

// Elements of GET /users/{username}/repos and the body of
// GET /repos/{owner}/{repo}
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryResponse {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub full_name: String,
    pub html_url: String,
    pub forks_count: u32,
    pub stargazers_count: u32,
    pub watchers_count: u32,
}

impl From<UserResponse> for User {
    fn from(response: UserResponse) -> Self {
        Self {
            id: response.id.to_string(),
            name: response.name.unwrap_or_default(),
            username: response.username.unwrap_or_default(),
            avatar_url: response.avatar_url,
            public_repos: response.public_repos,
        }
    }
}

impl From<RepositoryResponse> for Repository {
    fn from(response: RepositoryResponse) -> Self {
        Self {
            id: response.id.to_string(),
            name: response.name,
            description: response.description.unwrap_or_default(),
            full_name: response.full_name,
            html_url: response.html_url,
            forks_count: response.forks_count,
            stargazers_count: response.stargazers_count,
            watchers_count: response.watchers_count,
        }
    }
}
