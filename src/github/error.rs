// src/github/error.rs
// =============================================================================
// Errors from the repository-list request.
//
// Only two kinds matter to the rest of the program:
// - RateLimited: GitHub answered 403. The fix is to pass a token.
// - FetchFailed: everything else (other status codes, network trouble, a
//   body we could not read).
//
// README requests never produce these; see client.rs.
// =============================================================================

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The API refused the request (HTTP 403), usually an exhausted quota
    #[error("GitHub API rate limit reached (HTTP 403)")]
    RateLimited,

    /// Any other failure; `status` is `None` when no response arrived
    #[error("{}", describe_failure(.status, .reason))]
    FetchFailed {
        status: Option<u16>,
        reason: String,
    },
}

impl FetchError {
    /// Maps a non-success status code to its error kind.
    pub fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::FORBIDDEN {
            FetchError::RateLimited
        } else {
            FetchError::FetchFailed {
                status: Some(status.as_u16()),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string(),
            }
        }
    }

    /// A failure where no HTTP response was received.
    pub fn transport(error: &reqwest::Error) -> Self {
        let reason = if error.is_timeout() {
            "request timed out".to_string()
        } else if error.is_connect() {
            "connection failed".to_string()
        } else {
            error.to_string()
        };
        FetchError::FetchFailed { status: None, reason }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::RateLimited)
    }
}

fn describe_failure(status: &Option<u16>, reason: &str) -> String {
    match status {
        Some(code) => format!("failed to fetch repositories: HTTP {} ({})", code, reason),
        None => format!("failed to fetch repositories: {}", reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_403_is_rate_limited() {
        assert_eq!(FetchError::from_status(StatusCode::FORBIDDEN), FetchError::RateLimited);
    }

    #[test]
    fn test_500_is_fetch_failed() {
        let error = FetchError::from_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(matches!(error, FetchError::FetchFailed { status: Some(500), .. }));
        assert!(!error.is_rate_limited());
    }

    #[test]
    fn test_display() {
        let error = FetchError::from_status(StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "failed to fetch repositories: HTTP 404 (Not Found)");

        let error = FetchError::FetchFailed { status: None, reason: "connection failed".into() };
        assert_eq!(error.to_string(), "failed to fetch repositories: connection failed");
    }
}
