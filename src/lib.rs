// src/lib.rs
// =============================================================================
// gitpeek: look up a GitHub user, page through their repositories and total
// the forks across all of them.
//
// Modules:
// - config: fixed API settings (base URL, Accept header, page sizes)
// - error: DomainError and the classifier that produces it
// - github: the GithubApi transport seam and its reqwest client
// - model: User, Repository, Page
// - repository: UserRepository, the request/result interface for callers
// - paging: page source, load state machine and pager
//
// Example:
//
//   let client = GithubClient::new(&ClientConfig::default())?;
//   let repository = UserRepository::new(Arc::new(client));
//   let user = repository.get_user("octocat").await?;
//   let forks = repository.get_user_fork_count(&user.username, user.public_repos).await?;
// =============================================================================

pub mod config;
pub mod error;
pub mod github;
pub mod model;
pub mod paging;
pub mod repository;

pub use config::ClientConfig;
pub use error::{classify, ApiError, DomainError};
pub use github::{GithubApi, GithubClient};
pub use model::{Page, Repository, User};
pub use paging::{LoadParams, LoadResult, LoadState, LoadStep, Pager, RepositoryPagingSource};
pub use repository::UserRepository;
