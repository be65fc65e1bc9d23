//! Error types for hcloudctl
//!
//! Structured errors with user-facing suggestions printed below the
//! message, so a failed command always tells the user what to try next.

use hcloudctl_core::CoreError;
use thiserror::Error;

/// Main error type for the hcloudctl application
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("No profile configured")]
    NoProfileConfigured,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("API error: {message}")]
    Api { message: String },

    #[error("Resource not found: {message}")]
    NotFound { message: String },

    #[error("Action failed: {message}")]
    ActionFailed { message: String },

    #[error("Timed out after {seconds}s waiting for the operation to complete")]
    Timeout { seconds: u64 },

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Cancelled")]
    Cancelled,

    #[error("Output formatting error: {message}")]
    Output { message: String },
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
    /// Helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            CliError::ProfileNotFound { name } => vec![
                "List available profiles: hcloudctl profile list".to_string(),
                format!("Create profile '{name}': hcloudctl profile set {name} --api-token <token>"),
            ],
            CliError::NoProfileConfigured => vec![
                "Create a profile: hcloudctl profile set default --api-token <token>".to_string(),
                "Or export HCLOUD_TOKEN with a valid API token".to_string(),
            ],
            CliError::AuthenticationFailed { .. } => vec![
                "Check the API token: hcloudctl profile show <profile>".to_string(),
                "Tokens are project-scoped; make sure this one belongs to the right project"
                    .to_string(),
            ],
            CliError::NotFound { .. } => vec![
                "Verify the resource id is correct".to_string(),
                "List resources to find the right id, e.g. hcloudctl server list".to_string(),
            ],
            CliError::Timeout { .. } => vec![
                "The operation may still complete; check with: hcloudctl action get <id>"
                    .to_string(),
                "Raise the budget with --wait-timeout <seconds>".to_string(),
            ],
            CliError::Connection { .. } => vec![
                "Check network connectivity".to_string(),
                "Verify the API URL if you overrode it (api_url or HCLOUD_API_URL)".to_string(),
            ],
            CliError::InvalidInput { .. } => vec![
                "Check the command syntax: hcloudctl <command> --help".to_string(),
            ],
            _ => vec![],
        }
    }

    /// Render the error followed by its suggestions, ready for stderr
    pub fn display_with_suggestions(&self) -> String {
        let mut out = format!("Error: {self}");
        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\n\nSuggestions:");
            for s in suggestions {
                out.push_str(&format!("\n  - {s}"));
            }
        }
        out
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Api { status: 401 | 403, message } => {
                CliError::AuthenticationFailed { message }
            }
            CoreError::Api { status: 404, message } => CliError::NotFound { message },
            CoreError::Api { status, message } => CliError::Api {
                message: format!("HTTP {status}: {message}"),
            },
            CoreError::Request(e) => CliError::Connection {
                message: e.to_string(),
            },
            CoreError::ActionTimeout(duration) => CliError::Timeout {
                seconds: duration.as_secs(),
            },
            CoreError::ActionFailed(message) => CliError::ActionFailed { message },
            CoreError::Json(e) => CliError::Api {
                message: format!("invalid response: {e}"),
            },
            CoreError::Config(message) => CliError::Config(message),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Output {
            message: format!("JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Output {
            message: format!("IO error: {err}"),
        }
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn core_errors_map_to_user_facing_variants() {
        let err: CliError = CoreError::Api {
            status: 401,
            message: "unable to authenticate".into(),
        }
        .into();
        assert!(matches!(err, CliError::AuthenticationFailed { .. }));

        let err: CliError = CoreError::Api {
            status: 404,
            message: "server not found".into(),
        }
        .into();
        assert!(matches!(err, CliError::NotFound { .. }));

        let err: CliError = CoreError::ActionTimeout(Duration::from_secs(300)).into();
        assert!(matches!(err, CliError::Timeout { seconds: 300 }));
    }

    #[test]
    fn suggestions_are_attached_to_display() {
        let err = CliError::NoProfileConfigured;
        let rendered = err.display_with_suggestions();
        assert!(rendered.contains("Suggestions:"));
        assert!(rendered.contains("profile set"));
    }
}
