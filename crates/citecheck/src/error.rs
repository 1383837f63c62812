//! Error types for citation verification.
//!
//! Uses `thiserror` for structured error handling with automatic `From`
//! implementations. The three lookup failure kinds are the whole taxonomy the
//! verification engine reasons about: an authoritative "does not exist", a
//! transport-level problem, and a success response with an unusable payload.

use serde::Serialize;

/// Errors from a single source lookup.
#[derive(thiserror::Error, Debug)]
pub enum LookupError {
    /// The source authoritatively reports the record does not exist
    /// (HTTP 404 or a provider-specific not-found convention).
    #[error("not found")]
    NotFound,

    /// Transport failure: connection, DNS, TLS, timeout, or an unexpected
    /// HTTP status.
    #[error("API error: {0}")]
    Api(String),

    /// Success status but the payload lacks the expected envelope or cannot
    /// be parsed.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl LookupError {
    /// Create an API error.
    #[must_use]
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Create an invalid-response error.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// The failure kind, for report serialization.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotFound => FailureKind::NotFound,
            Self::Api(_) => FailureKind::ApiError,
            Self::InvalidResponse(_) => FailureKind::InvalidResponse,
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        Self::Api(err.to_string())
    }
}

impl From<reqwest_middleware::Error> for LookupError {
    fn from(err: reqwest_middleware::Error) -> Self {
        Self::Api(err.to_string())
    }
}

/// Failure kind names as they appear in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    #[serde(rename = "API_ERROR")]
    ApiError,
    #[serde(rename = "INVALID_RESPONSE")]
    InvalidResponse,
}

/// Result type alias for source lookups.
pub type LookupResult<T> = Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_kinds() {
        assert_eq!(LookupError::NotFound.kind(), FailureKind::NotFound);
        assert_eq!(LookupError::api("timeout").kind(), FailureKind::ApiError);
        assert_eq!(LookupError::invalid("no envelope").kind(), FailureKind::InvalidResponse);
    }

    #[test]
    fn test_failure_kind_serializes_to_screaming_snake() {
        let json = serde_json::to_string(&FailureKind::ApiError).unwrap();
        assert_eq!(json, "\"API_ERROR\"");
    }

    #[test]
    fn test_display_carries_detail() {
        let err = LookupError::api("connection refused");
        assert!(err.to_string().contains("connection refused"));
    }
}
