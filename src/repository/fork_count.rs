// src/repository/fork_count.rs
// =============================================================================
// Total fork count across every repository a user owns.
//
// The user's repository count is known before we start (it comes with the
// profile), so the number of pages is known too. Instead of walking pages one
// after another we request all of them at once and add up the results.
//
// All-or-nothing: one failed page fails the whole count, and the remaining
// requests are cancelled. Dropping the returned future cancels everything
// still in flight as well; no page request outlives the call.
// =============================================================================

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::UserRepository;
use crate::config::FORK_COUNT_PAGE_SIZE;
use crate::error::{classify, ApiError, DomainError};
use crate::github::RepositoryResponse;

// Number of pages needed to cover `total_repositories` at `page_size` per page
pub(crate) fn page_count(total_repositories: u32, page_size: u32) -> u32 {
    total_repositories.div_ceil(page_size)
}

impl UserRepository {
    pub async fn get_user_fork_count(
        &self,
        username: &str,
        total_repository_count: u32,
    ) -> Result<u64, DomainError> {
        if total_repository_count == 0 {
            return Ok(0);
        }
        let username = super::non_blank(username)?;

        let total_pages = page_count(total_repository_count, FORK_COUNT_PAGE_SIZE);
        debug!(username, total_pages, "fetching every repository page");

        // Cancels the token when this future completes or is dropped
        let token = CancellationToken::new();
        let _cancel_on_exit = token.clone().drop_guard();

        let mut pages: JoinSet<Option<Result<Vec<RepositoryResponse>, ApiError>>> = JoinSet::new();
        for page in 1..=total_pages {
            let service = Arc::clone(&self.service);
            let username = username.to_string();
            let token = token.clone();

            pages.spawn(async move {
                let fetch = service.get_user_repos(&username, FORK_COUNT_PAGE_SIZE, page);
                tokio::select! {
                    biased;
                    _ = token.cancelled() => None,
                    result = fetch => Some(result),
                }
            });
        }

        let mut forks: u64 = 0;
        while let Some(joined) = pages.join_next().await {
            let failure = match joined {
                Ok(Some(Ok(repositories))) => {
                    forks += repositories
                        .iter()
                        .map(|repo| u64::from(repo.forks_count))
                        .sum::<u64>();
                    continue;
                }
                // Only produced after we cancelled, which means we already returned
                Ok(None) => continue,
                Ok(Some(Err(error))) => classify(error, None),
                Err(join_error) => DomainError::unknown(join_error),
            };

            token.cancel();
            warn!(username, error = %failure, "fork count aborted");
            return Err(failure);
        }

        info!(username, total_pages, forks, "fork count complete");
        Ok(forks)
    }
}
