// src/error/domain.rs
// =============================================================================
// The closed set of errors the core hands to its callers.
//
// Whatever goes wrong underneath (a refused connection, a 403, a body that
// isn't the JSON we expected), callers only ever see one of these variants.
// Each variant can keep the underlying failure as its `source()` so logs still
// show what really happened.
// =============================================================================

use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

/// Shared handle to the failure that caused a DomainError.
///
/// Arc keeps DomainError cheap to clone, which the pager needs because an
/// errored load state and the value returned to the caller hold the same error.
pub type Cause = Arc<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Clone, Error)]
pub enum DomainError {
    /// Connection, DNS or timeout failure
    #[error("Network error")]
    Network {
        #[source]
        cause: Option<Cause>,
    },

    /// Non-success HTTP status that no more specific rule claimed
    #[error("Server error: {code}")]
    Server {
        code: u16,
        #[source]
        cause: Option<Cause>,
    },

    /// HTTP 403 or 429
    #[error("Rate limit exceeded")]
    RateLimit {
        #[source]
        cause: Option<Cause>,
    },

    #[error("User not found")]
    UserNotFound {
        #[source]
        cause: Option<Cause>,
    },

    /// Response body did not match the expected JSON shape
    #[error("Data parsing error")]
    DataParsing {
        #[source]
        cause: Option<Cause>,
    },

    #[error("Unknown error: {cause}")]
    Unknown {
        #[source]
        cause: Cause,
    },
}

impl DomainError {
    #[inline]
    pub fn network() -> Self {
        Self::Network { cause: None }
    }

    #[inline]
    pub fn server(code: u16) -> Self {
        Self::Server { code, cause: None }
    }

    #[inline]
    pub fn rate_limit() -> Self {
        Self::RateLimit { cause: None }
    }

    #[inline]
    pub fn user_not_found() -> Self {
        Self::UserNotFound { cause: None }
    }

    #[inline]
    pub fn data_parsing() -> Self {
        Self::DataParsing { cause: None }
    }

    #[inline]
    pub fn unknown(cause: impl StdError + Send + Sync + 'static) -> Self {
        Self::Unknown {
            cause: Arc::new(cause),
        }
    }

    /// The HTTP status behind a ServerError.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Server { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The failure this error was classified from, if one was kept.
    pub fn cause(&self) -> Option<&Cause> {
        match self {
            Self::Network { cause }
            | Self::Server { cause, .. }
            | Self::RateLimit { cause }
            | Self::UserNotFound { cause }
            | Self::DataParsing { cause } => cause.as_ref(),
            Self::Unknown { cause } => Some(cause),
        }
    }

    /// Rate limits and network failures usually clear up on their own, so
    /// callers should offer a retry for these.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::RateLimit { .. } | Self::Network { .. })
    }

    /// Short message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::UserNotFound { .. } => "User not found".to_string(),
            Self::RateLimit { .. } => "Rate limit exceeded. Please try again later.".to_string(),
            Self::Network { .. } => "Network error. Please check your connection.".to_string(),
            Self::Server { code, .. } => format!("Server error (code {})", code),
            Self::DataParsing { .. } => "Failed to read the server response".to_string(),
            Self::Unknown { .. } => "Something went wrong".to_string(),
        }
    }
}
