// src/model.rs
// =============================================================================
// Domain values handed to callers.
//
// These are built fresh from each network response and never cached by the
// core. Serialize is derived so the CLI can print them with --json.
// =============================================================================

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Numeric GitHub id, stringified
    pub id: String,
    pub name: String,
    /// GitHub login
    pub username: String,
    pub avatar_url: String,
    pub public_repos: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    /// Numeric GitHub id, stringified; stable list key
    pub id: String,
    pub name: String,
    pub description: String,
    pub full_name: String,
    pub html_url: String,
    pub forks_count: u32,
    pub stargazers_count: u32,
    pub watchers_count: u32,
}

// One slice of a paginated list
//
// prev_key/next_key link pages together. A missing next_key means the end of
// the list was reached; a missing prev_key means this is the first page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub prev_key: Option<u32>,
    pub next_key: Option<u32>,
}

impl<T> Page<T> {
    pub fn is_last(&self) -> bool {
        self.next_key.is_none()
    }
}
