// src/repository/mod.rs
// =============================================================================
// The request/result interface callers use.
//
// UserRepository wraps a GithubApi and turns every raw failure into a
// DomainError, so nothing above this layer ever sees reqwest or serde errors.
//
// Usernames are trimmed first; a blank one is reported as UserNotFound
// without sending a request.
//
// Operations:
// - get_user: profile lookup; 404 means the user does not exist
// - get_repository: one repository; 404 stays a plain server error
// - get_user_fork_count: total forks across every repository (fork_count.rs)
// - repositories_source / repositories_pager: page-by-page listing
// =============================================================================

mod fork_count;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::REPOSITORIES_PAGE_SIZE;
use crate::error::{classify, DomainError};
use crate::github::GithubApi;
use crate::model::{Repository, User};
use crate::paging::{Pager, RepositoryPagingSource};

#[derive(Clone)]
pub struct UserRepository {
    service: Arc<dyn GithubApi>,
}

impl UserRepository {
    pub fn new(service: Arc<dyn GithubApi>) -> Self {
        Self { service }
    }

    pub async fn get_user(&self, username: &str) -> Result<User, DomainError> {
        let username = non_blank(username)?;
        match self.service.get_user(username).await {
            Ok(response) => Ok(User::from(response)),
            Err(error) => {
                let error = classify(error, Some(&user_not_found_rule));
                warn!(username, error = %error, "failed to fetch user");
                Err(error)
            }
        }
    }

    pub async fn get_repository(
        &self,
        username: &str,
        repo_name: &str,
    ) -> Result<Repository, DomainError> {
        let username = non_blank(username)?;
        match self.service.get_repository(username, repo_name).await {
            Ok(response) => Ok(Repository::from(response)),
            Err(error) => {
                let error = classify(error, None);
                warn!(username, repo_name, error = %error, "failed to fetch repository");
                Err(error)
            }
        }
    }

    /// Page source for `username`'s repositories.
    pub fn repositories_source(&self, username: &str) -> RepositoryPagingSource {
        RepositoryPagingSource::new(Arc::clone(&self.service), username)
    }

    /// Pager over `username`'s repositories using the display page size.
    pub fn repositories_pager(&self, username: &str) -> Pager {
        Pager::new(self.repositories_source(username), REPOSITORIES_PAGE_SIZE)
    }
}

// GitHub logins never contain whitespace. An empty path segment would hit a
// different endpoint (`/users/` lists every user), so blank names stop here.
pub(crate) fn non_blank(username: &str) -> Result<&str, DomainError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        debug!("blank username, skipping request");
        return Err(DomainError::user_not_found());
    }
    Ok(trimmed)
}

// Only get_user treats 404 specially; everything else keeps the default
// status mapping
fn user_not_found_rule(code: u16) -> Option<DomainError> {
    (code == 404).then(DomainError::user_not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::testing::{repository_response, status_error, user_response, FakeGithub};

    fn repository_with(fake: FakeGithub) -> UserRepository {
        UserRepository::new(Arc::new(fake))
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let repository =
            repository_with(FakeGithub::new().with_user(|login| Ok(user_response(login, 12))));

        let user = repository.get_user("octocat").await.unwrap();
        assert_eq!(user.username, "octocat");
        assert_eq!(user.id, "583231");
        assert_eq!(user.public_repos, 12);
    }

    #[tokio::test]
    async fn test_get_user_trims_username() {
        let repository = repository_with(FakeGithub::new().with_user(|login| {
            assert_eq!(login, "octocat");
            Ok(user_response(login, 1))
        }));

        let user = repository.get_user("  octocat\n").await.unwrap();
        assert_eq!(user.username, "octocat");
    }

    #[tokio::test]
    async fn test_blank_username_sends_no_request() {
        // No handlers: any request would come back as an Unknown error
        let repository = repository_with(FakeGithub::new());

        for blank in ["", "   ", "\t"] {
            let error = repository.get_user(blank).await.unwrap_err();
            assert!(matches!(error, DomainError::UserNotFound { .. }));
        }
        let error = repository.get_repository(" ", "Hello-World").await.unwrap_err();
        assert!(matches!(error, DomainError::UserNotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_user_404_is_user_not_found() {
        let repository = repository_with(FakeGithub::new().with_user(|_| Err(status_error(404))));

        let error = repository.get_user("ghost").await.unwrap_err();
        assert!(matches!(error, DomainError::UserNotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_user_rate_limited() {
        let repository = repository_with(FakeGithub::new().with_user(|_| Err(status_error(403))));

        let error = repository.get_user("octocat").await.unwrap_err();
        assert!(matches!(error, DomainError::RateLimit { .. }));
    }

    #[tokio::test]
    async fn test_get_user_server_error_keeps_code() {
        let repository = repository_with(FakeGithub::new().with_user(|_| Err(status_error(500))));

        let error = repository.get_user("octocat").await.unwrap_err();
        assert_eq!(error.status_code(), Some(500));
    }

    #[tokio::test]
    async fn test_repositories_pager_uses_display_page_size() {
        let fake =
            Arc::new(FakeGithub::new().with_pages(|_, _| Ok(vec![repository_response(1, 0)])));
        let repository = UserRepository::new(Arc::clone(&fake) as Arc<dyn GithubApi>);

        let mut pager = repository.repositories_pager("octocat");
        pager.append().await.unwrap();

        assert_eq!(fake.page_requests(), vec![(30, 1)]);
        assert_eq!(pager.items().count(), 1);
    }

    #[tokio::test]
    async fn test_get_repository_success() {
        let repository = repository_with(
            FakeGithub::new().with_repository(|_| Ok(repository_response(7, 3))),
        );

        let repo = repository.get_repository("octocat", "repo-7").await.unwrap();
        assert_eq!(repo.id, "7");
        assert_eq!(repo.forks_count, 3);
        assert_eq!(repo.description, "Repository number 7");
    }

    #[tokio::test]
    async fn test_get_repository_404_is_server_error() {
        let repository =
            repository_with(FakeGithub::new().with_repository(|_| Err(status_error(404))));

        let error = repository
            .get_repository("octocat", "missing")
            .await
            .unwrap_err();
        assert!(matches!(error, DomainError::Server { code: 404, .. }));
    }

    #[tokio::test]
    async fn test_get_repository_decode_failure() {
        let repository = repository_with(FakeGithub::new().with_repository(|_| {
            Err(serde_json::from_str::<u32>("\"x\"").unwrap_err().into())
        }));

        let error = repository.get_repository("octocat", "x").await.unwrap_err();
        assert!(matches!(error, DomainError::DataParsing { .. }));
    }
}
