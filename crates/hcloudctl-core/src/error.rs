//! Unified error handling for hcloudctl-core
//!
//! One error type covers the HTTP shim, the resource handlers, the action
//! poller and the config store, with classification helpers so callers can
//! react without matching on variants.

use std::time::Duration;
use thiserror::Error;

/// Core error type for API and polling operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// The provider answered with a non-success status code
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request itself failed (DNS, TLS, connect, ...)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Action did not reach a terminal status within the wait budget
    #[error("Timed out after {0:?} waiting for action to complete")]
    ActionTimeout(Duration),

    /// The provider marked the action as failed
    #[error("Action failed: {0}")]
    ActionFailed(String),

    /// Response body could not be parsed
    #[error("Invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::Api { status: 404, .. })
    }

    /// Returns true if this is an authentication/authorization error (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CoreError::Api { status: 401 | 403, .. })
    }

    /// Returns true if this is a rate limiting error (429)
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, CoreError::Api { status: 429, .. })
    }

    /// Returns true if this is a timeout, either of the transport or of an
    /// action wait
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            CoreError::ActionTimeout(_) => true,
            CoreError::Request(e) => e.is_timeout(),
            _ => false,
        }
    }

    /// Returns true if retrying the whole operation could plausibly succeed
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            CoreError::Api { status, .. } => *status == 429 || *status >= 500,
            CoreError::Request(e) => e.is_timeout() || e.is_connect(),
            CoreError::ActionTimeout(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_classification() {
        let err = CoreError::Api {
            status: 404,
            message: "server not found".into(),
        };
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
        assert!(!err.is_retryable());

        let err = CoreError::Api {
            status: 401,
            message: "unable to authenticate".into(),
        };
        assert!(err.is_unauthorized());

        let err = CoreError::Api {
            status: 503,
            message: "service unavailable".into(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn action_timeout_is_timeout_and_retryable() {
        let err = CoreError::ActionTimeout(Duration::from_secs(300));
        assert!(err.is_timeout());
        assert!(err.is_retryable());
        assert!(!err.is_not_found());
    }

    #[test]
    fn action_failed_is_terminal() {
        let err = CoreError::ActionFailed("server is locked".into());
        assert!(!err.is_retryable());
        assert!(!err.is_timeout());
        assert!(err.to_string().contains("server is locked"));
    }
}
