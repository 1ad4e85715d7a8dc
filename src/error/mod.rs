// src/error/mod.rs
// =============================================================================
// Error taxonomy for the whole core.
//
// Submodules:
// - domain: DomainError, the only error type callers ever see
// - classify: ApiError (raw transport failures) and the mapping between them
// =============================================================================

mod classify;
mod domain;

pub use classify::{classify, ApiError, HttpRule};
pub use domain::{Cause, DomainError};
