// src/paging/pager.rs
// =============================================================================
// Drives a RepositoryPagingSource the way a scrolling list would.
//
// The pager owns the pages loaded so far and the current LoadState. Callers
// ask it to refresh, append or prepend; it works out which key to load,
// records the transition, and keeps earlier pages when a load fails so
// nothing on screen disappears. It never retries by itself.
//
// Dropping a refresh/append/prepend future mid-load puts the state back to
// Idle, so the next call is not rejected as overlapping.
// =============================================================================

use tracing::debug;

use super::source::{LoadParams, LoadResult, PagingState, RepositoryPagingSource, FIRST_PAGE};
use super::state::{LoadState, TransitionError};
use crate::error::DomainError;
use crate::model::{Page, Repository};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadType {
    Refresh,
    Append,
    Prepend,
}

// What a single pager call did
#[derive(Debug, Clone)]
pub enum LoadStep {
    Loaded { page: u32, count: usize },
    Failed(DomainError),
    /// Nothing left to load in the requested direction
    EndOfList,
}

pub struct Pager {
    source: RepositoryPagingSource,
    page_size: u32,
    pages: Vec<Page<Repository>>,
    state: LoadState,
    anchor_position: Option<usize>,
    last_request: Option<(LoadType, Option<u32>)>,
}

impl Pager {
    pub fn new(source: RepositoryPagingSource, page_size: u32) -> Self {
        Self {
            source,
            page_size,
            pages: Vec::new(),
            state: LoadState::Idle,
            anchor_position: None,
            last_request: None,
        }
    }

    pub fn pages(&self) -> &[Page<Repository>] {
        &self.pages
    }

    pub fn items(&self) -> impl Iterator<Item = &Repository> {
        self.pages.iter().flat_map(|page| page.data.iter())
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Whether the last loaded page reported the end of the list.
    pub fn reached_end(&self) -> bool {
        self.pages.last().is_some_and(Page::is_last)
    }

    /// Records which item the consumer is looking at; used by refresh.
    pub fn set_anchor_position(&mut self, position: Option<usize>) {
        self.anchor_position = position;
    }

    // Reloads around the anchor position (or from page 1) and replaces
    // every loaded page with the result
    pub async fn refresh(&mut self) -> Result<LoadStep, TransitionError> {
        let key = self
            .source
            .refresh_key(&PagingState::new(&self.pages, self.anchor_position));
        self.run(LoadType::Refresh, key).await
    }

    pub async fn append(&mut self) -> Result<LoadStep, TransitionError> {
        let key = match self.pages.last() {
            None => return self.refresh().await,
            Some(page) => page.next_key,
        };
        match key {
            Some(next) => self.run(LoadType::Append, Some(next)).await,
            None => Ok(LoadStep::EndOfList),
        }
    }

    pub async fn prepend(&mut self) -> Result<LoadStep, TransitionError> {
        match self.pages.first().and_then(|page| page.prev_key) {
            Some(prev) => self.run(LoadType::Prepend, Some(prev)).await,
            None => Ok(LoadStep::EndOfList),
        }
    }

    /// Re-issues the load that just failed.
    pub async fn retry(&mut self) -> Result<LoadStep, TransitionError> {
        let (LoadState::Errored { .. }, Some((load_type, key))) = (&self.state, self.last_request)
        else {
            return Err(TransitionError::NothingToRetry);
        };
        self.run(load_type, key).await
    }

    /// Clears a load left in flight. Dropped loads already do this
    /// themselves; this is for callers that manage the state by hand.
    pub fn cancel_load(&mut self) {
        self.state.abandon();
    }

    async fn run(
        &mut self,
        load_type: LoadType,
        key: Option<u32>,
    ) -> Result<LoadStep, TransitionError> {
        let page = key.unwrap_or(FIRST_PAGE);
        let in_flight = InFlight::begin(&mut self.state, page)?;
        self.last_request = Some((load_type, key));
        debug!(username = self.source.username(), page, ?load_type, "pager load");

        let result = self.source.load(LoadParams::new(key, self.page_size)).await;
        in_flight.complete(&result)?;

        Ok(match result {
            LoadResult::Page(loaded) => {
                let count = loaded.data.len();
                match load_type {
                    LoadType::Refresh => self.pages = vec![loaded],
                    LoadType::Append => self.pages.push(loaded),
                    LoadType::Prepend => self.pages.insert(0, loaded),
                }
                LoadStep::Loaded { page, count }
            }
            LoadResult::Error(error) => LoadStep::Failed(error),
        })
    }
}

// Marks a load as started and abandons it on drop unless it completed
struct InFlight<'a> {
    state: &'a mut LoadState,
}

impl<'a> InFlight<'a> {
    fn begin(state: &'a mut LoadState, page: u32) -> Result<Self, TransitionError> {
        state.begin(page)?;
        Ok(Self { state })
    }

    fn complete<T>(self, result: &LoadResult<T>) -> Result<(), TransitionError> {
        self.state.complete(result)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        // No-op once the load has completed
        self.state.abandon();
    }
}
