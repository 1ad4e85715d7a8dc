// src/paging/mod.rs
// =============================================================================
// Page-by-page loading of a user's repositories.
//
// Submodules:
// - source: loads a single page and computes its prev/next keys
// - state: the explicit Idle/Loading/Loaded/Errored state machine
// - pager: keeps loaded pages and drives the source in either direction
// =============================================================================

mod pager;
mod source;
mod state;

pub use pager::{LoadStep, LoadType, Pager};
pub use source::{LoadParams, LoadResult, PagingState, RepositoryPagingSource, FIRST_PAGE};
pub use state::{LoadState, TransitionError};
