// src/paging/state.rs
// =============================================================================
// Load state of a pager, as an explicit state machine.
//
//   Idle ──begin(p)──> Loading(p) ──complete──> Loaded(p, prev, next)
//                                          └──> Errored(p, error)
//
// Loaded and Errored can begin another load. Nothing ever moves out of
// Errored on its own: a failed page stays failed until the caller asks for
// it again. Only one load may be in flight at a time.
// =============================================================================

use thiserror::Error;

use super::source::LoadResult;
use crate::error::DomainError;

#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading {
        page: u32,
    },
    Loaded {
        page: u32,
        prev_key: Option<u32>,
        next_key: Option<u32>,
    },
    Errored {
        page: u32,
        error: DomainError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("page {in_flight} is still loading, cannot start page {requested}")]
    LoadInFlight { in_flight: u32, requested: u32 },

    #[error("no load in flight")]
    NotLoading,

    #[error("the last load did not fail, nothing to retry")]
    NothingToRetry,
}

impl LoadState {
    pub fn begin(&mut self, page: u32) -> Result<(), TransitionError> {
        if let Self::Loading { page: in_flight } = *self {
            return Err(TransitionError::LoadInFlight {
                in_flight,
                requested: page,
            });
        }
        *self = Self::Loading { page };
        Ok(())
    }

    pub fn complete<T>(&mut self, result: &LoadResult<T>) -> Result<(), TransitionError> {
        let Self::Loading { page } = *self else {
            return Err(TransitionError::NotLoading);
        };

        *self = match result {
            LoadResult::Page(loaded) => Self::Loaded {
                page,
                prev_key: loaded.prev_key,
                next_key: loaded.next_key,
            },
            LoadResult::Error(error) => Self::Errored {
                page,
                error: error.clone(),
            },
        };
        Ok(())
    }

    // Drops an in-flight load whose future went away before completing
    pub fn abandon(&mut self) {
        if self.is_loading() {
            *self = Self::Idle;
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    /// The page the state refers to, if any.
    pub fn page(&self) -> Option<u32> {
        match self {
            Self::Idle => None,
            Self::Loading { page }
            | Self::Loaded { page, .. }
            | Self::Errored { page, .. } => Some(*page),
        }
    }

    pub fn error(&self) -> Option<&DomainError> {
        match self {
            Self::Errored { error, .. } => Some(error),
            _ => None,
        }
    }
}
