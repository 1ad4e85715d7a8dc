// src/github/mod.rs
// =============================================================================
// This module talks to the GitHub REST API.
//
// Submodules:
// - client: the GithubApi trait and its reqwest implementation
// - response: JSON response shapes and their conversion to domain models
// =============================================================================

mod client;
mod response;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{GithubApi, GithubClient};
pub use response::{RepositoryResponse, UserResponse};
