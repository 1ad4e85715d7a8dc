// src/config.rs
// =============================================================================
// Fixed settings for talking to the GitHub REST API.
//
// Everything here is decided once, when the client is built. No operation
// takes a base URL or header as a per-call argument.
// =============================================================================

use std::time::Duration;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Media type sent in the `Accept` header of every request.
pub const ACCEPT_HEADER: &str = "application/vnd.github+json";

/// Page size used when paging repositories for display.
pub const REPOSITORIES_PAGE_SIZE: u32 = 30;

/// Page size used when fetching every page to total fork counts.
/// 100 is the largest `per_page` GitHub accepts.
pub const FORK_COUNT_PAGE_SIZE: u32 = 100;

/// Connect/read timeout applied to each request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// GitHub rejects requests without a User-Agent
const USER_AGENT: &str = concat!("gitpeek/", env!("CARGO_PKG_VERSION"));

// Settings used to build a GithubClient
//
// The CLI may swap the base URL (for GitHub Enterprise or a local stub) and
// the timeout at start-up; the defaults match api.github.com.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
