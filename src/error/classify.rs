// src/error/classify.rs
// =============================================================================
// Maps raw transport failures onto DomainError.
//
// Rules, applied in this order:
//   1. Already a DomainError        -> returned unchanged
//   2. Carries an HTTP status       -> caller's custom rule, then
//                                      403/429 -> RateLimit, else Server{code}
//   3. Connection/timeout/IO        -> Network
//   4. Body did not decode          -> DataParsing
//   5. Anything else                -> Unknown{cause}
//
// The custom rule must run before the 403/429 check. getUser relies on that
// ordering to turn 404 into UserNotFound.
// =============================================================================

use std::sync::Arc;
use thiserror::Error;

use super::domain::{Cause, DomainError};

/// Caller-supplied override for HTTP status codes.
/// Returning None falls through to the default status mapping.
pub type HttpRule<'a> = &'a dyn Fn(u16) -> Option<DomainError>;

// Everything the transport layer can fail with before classification
#[derive(Debug, Error)]
pub enum ApiError {
    /// Already classified further down
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// reqwest could not complete the request or read the body
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The body arrived but was not the JSON we expected
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// HTTP status carried by this failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

// Classifies a transport failure into exactly one DomainError
//
// Pure: no logging, no I/O. The same input always yields the same variant.
pub fn classify(error: ApiError, custom_rule: Option<HttpRule<'_>>) -> DomainError {
    if let Some(status) = error.status() {
        return classify_status(status, Arc::new(error), custom_rule);
    }

    match error {
        ApiError::Domain(domain) => domain,
        ApiError::Decode(e) => DomainError::DataParsing {
            cause: Some(Arc::new(e)),
        },
        ApiError::Io(e) => DomainError::Network {
            cause: Some(Arc::new(e)),
        },
        ApiError::Transport(e) => classify_reqwest(e),
        ApiError::Other(e) if e.downcast_ref::<std::io::Error>().is_some() => {
            DomainError::Network {
                cause: Some(Arc::new(ApiError::Other(e))),
            }
        }
        other => DomainError::Unknown {
            cause: Arc::new(other),
        },
    }
}

fn classify_status(status: u16, cause: Cause, custom_rule: Option<HttpRule<'_>>) -> DomainError {
    if let Some(mapped) = custom_rule.and_then(|rule| rule(status)) {
        return mapped;
    }

    match status {
        403 | 429 => DomainError::RateLimit { cause: Some(cause) },
        code => DomainError::Server {
            code,
            cause: Some(cause),
        },
    }
}

// Decode problems are about the payload; timeouts and connection trouble are
// about the network.
fn classify_reqwest(error: reqwest::Error) -> DomainError {
    if error.is_decode() {
        DomainError::DataParsing {
            cause: Some(Arc::new(error)),
        }
    } else if error.is_timeout() || error.is_connect() || error.is_request() || error.is_body() {
        DomainError::Network {
            cause: Some(Arc::new(error)),
        }
    } else {
        DomainError::Unknown {
            cause: Arc::new(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ApiError {
        ApiError::Status {
            status: code,
            url: "https://api.github.com/users/octocat".to_string(),
        }
    }

    fn not_found_rule(code: u16) -> Option<DomainError> {
        (code == 404).then(DomainError::user_not_found)
    }

    #[test]
    fn test_domain_error_passes_through_unchanged() {
        let cause: Cause = Arc::new(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        let original = DomainError::Network {
            cause: Some(Arc::clone(&cause)),
        };

        let classified = classify(ApiError::Domain(original), None);

        match classified {
            DomainError::Network { cause: Some(kept) } => assert!(Arc::ptr_eq(&kept, &cause)),
            other => panic!("expected the same network error, got {:?}", other),
        }
    }

    #[test]
    fn test_domain_error_ignores_custom_rule() {
        let classified = classify(
            ApiError::Domain(DomainError::server(404)),
            Some(&not_found_rule),
        );
        assert_eq!(classified.status_code(), Some(404));
    }

    #[test]
    fn test_rate_limit_statuses() {
        for code in [403, 429] {
            assert!(
                matches!(classify(status(code), None), DomainError::RateLimit { .. }),
                "status {} should be a rate limit",
                code
            );
        }
    }

    #[test]
    fn test_other_statuses_are_server_errors() {
        for code in [400, 401, 404, 422, 500, 502, 503] {
            let classified = classify(status(code), None);
            assert_eq!(classified.status_code(), Some(code));
            assert!(classified.cause().is_some());
        }
    }

    #[test]
    fn test_custom_rule_overrides_default() {
        let classified = classify(status(404), Some(&not_found_rule));
        assert!(matches!(classified, DomainError::UserNotFound { .. }));
    }

    #[test]
    fn test_custom_rule_returning_none_falls_through() {
        assert!(matches!(
            classify(status(429), Some(&not_found_rule)),
            DomainError::RateLimit { .. }
        ));
        assert_eq!(
            classify(status(500), Some(&not_found_rule)).status_code(),
            Some(500)
        );
    }

    #[test]
    fn test_custom_rule_runs_before_rate_limit_check() {
        let forbidden_is_missing = |code: u16| (code == 403).then(DomainError::user_not_found);
        assert!(matches!(
            classify(status(403), Some(&forbidden_is_missing)),
            DomainError::UserNotFound { .. }
        ));
    }

    #[test]
    fn test_io_failure_is_network_error() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        assert!(matches!(
            classify(ApiError::Io(io), None),
            DomainError::Network { .. }
        ));
    }

    #[test]
    fn test_io_failure_wrapped_in_anyhow_is_network_error() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out");
        let wrapped = anyhow::Error::new(io).context("reading body");
        assert!(matches!(
            classify(ApiError::Other(wrapped), None),
            DomainError::Network { .. }
        ));
    }

    #[test]
    fn test_decode_failure_is_data_parsing_error() {
        let decode = serde_json::from_str::<Vec<u32>>("{not json").unwrap_err();
        assert!(matches!(
            classify(ApiError::Decode(decode), None),
            DomainError::DataParsing { .. }
        ));
    }

    #[test]
    fn test_anything_else_is_unknown_with_cause() {
        let classified = classify(ApiError::Other(anyhow::anyhow!("something odd")), None);
        match classified {
            DomainError::Unknown { cause } => assert_eq!(cause.to_string(), "something odd"),
            other => panic!("expected unknown error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        // Bind then drop a listener so the port is known to be closed
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let error = reqwest::get(format!("http://{}/", addr)).await.unwrap_err();
        assert!(matches!(
            classify(ApiError::Transport(error), None),
            DomainError::Network { .. }
        ));
    }
}
