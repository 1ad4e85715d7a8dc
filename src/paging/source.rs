// src/paging/source.rs
// =============================================================================
// Loads one page of a user's repositories at a time.
//
// The source keeps nothing between calls except the service handle and the
// username; every load is independent. Page keys are GitHub page numbers
// starting at 1:
//
//   prev_key = None on page 1, otherwise page - 1
//   next_key = None when the page came back empty, otherwise page + 1
//
// An empty page marks the end of the list. It is not an error. A blank
// username fails every load with UserNotFound and never reaches the network.
// =============================================================================

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{classify, DomainError};
use crate::github::GithubApi;
use crate::model::{Page, Repository};
use crate::repository::non_blank;

/// Page number used when no key is given.
pub const FIRST_PAGE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadParams {
    /// Page to load; None means the first page
    pub key: Option<u32>,
    pub load_size: u32,
}

impl LoadParams {
    pub fn new(key: Option<u32>, load_size: u32) -> Self {
        Self { key, load_size }
    }

    pub fn page(&self) -> u32 {
        self.key.unwrap_or(FIRST_PAGE)
    }
}

// Outcome of one load. Errors are values so a pager can keep showing the
// pages it already has.
#[derive(Debug, Clone)]
pub enum LoadResult<T> {
    Page(Page<T>),
    Error(DomainError),
}

impl<T> LoadResult<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

// Snapshot of what a consumer has loaded and where it is looking
#[derive(Debug)]
pub struct PagingState<'a, T> {
    pub pages: &'a [Page<T>],
    /// Index into the flattened items of `pages`
    pub anchor_position: Option<usize>,
}

impl<'a, T> PagingState<'a, T> {
    pub fn new(pages: &'a [Page<T>], anchor_position: Option<usize>) -> Self {
        Self {
            pages,
            anchor_position,
        }
    }

    // Page holding the item at `position`; positions past the end resolve
    // to the last page
    pub fn closest_page_to_position(&self, position: usize) -> Option<&'a Page<T>> {
        let (last, earlier) = self.pages.split_last()?;

        let mut remaining = position;
        for page in earlier {
            if remaining < page.data.len() {
                return Some(page);
            }
            remaining -= page.data.len();
        }
        Some(last)
    }
}

pub struct RepositoryPagingSource {
    service: Arc<dyn GithubApi>,
    username: String,
}

impl RepositoryPagingSource {
    pub fn new(service: Arc<dyn GithubApi>, username: impl Into<String>) -> Self {
        let username: String = username.into();
        Self {
            service,
            username: username.trim().to_string(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub async fn load(&self, params: LoadParams) -> LoadResult<Repository> {
        let page = params.page();
        let username = match non_blank(&self.username) {
            Ok(username) => username,
            Err(error) => return LoadResult::Error(error),
        };
        debug!(username, page, load_size = params.load_size, "loading page");

        match self
            .service
            .get_user_repos(username, params.load_size, page)
            .await
        {
            Ok(response) => {
                let data: Vec<Repository> = response.into_iter().map(Repository::from).collect();
                let prev_key = if page == FIRST_PAGE {
                    None
                } else {
                    page.checked_sub(1)
                };
                let next_key = if data.is_empty() {
                    None
                } else {
                    page.checked_add(1)
                };

                LoadResult::Page(Page {
                    data,
                    prev_key,
                    next_key,
                })
            }
            Err(error) => {
                let error = classify(error, None);
                warn!(username, page, error = %error, "page load failed");
                LoadResult::Error(error)
            }
        }
    }

    // Key to reload from after the list is invalidated, so the consumer comes
    // back near where it was looking
    pub fn refresh_key(&self, state: &PagingState<'_, Repository>) -> Option<u32> {
        let anchor = state.anchor_position?;
        let page = state.closest_page_to_position(anchor)?;
        page.prev_key
            .map(|key| key + 1)
            .or_else(|| page.next_key.map(|key| key.saturating_sub(1)))
    }
}
