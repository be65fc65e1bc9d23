//! Asynchronous provider actions
//!
//! Mutating API calls return an `action` object that must be polled
//! separately until it reaches a terminal status. This is the only typed
//! resource in the crate; the poller needs its fields.

use serde::{Deserialize, Serialize};

use crate::client::CloudClient;
use crate::error::Result;

/// Status of an asynchronous action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Running,
    Success,
    Error,
    /// Any status value this client does not know; treated as non-terminal
    #[serde(other)]
    Unknown,
}

impl ActionStatus {
    /// Terminal statuses are `success` and `error`; nothing changes after
    /// either has been observed.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, ActionStatus::Success | ActionStatus::Error)
    }
}

/// Error detail attached to a failed action
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActionError {
    pub code: Option<String>,
    pub message: String,
}

/// One asynchronous server-side operation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Action {
    pub id: i64,
    pub command: Option<String>,
    pub status: ActionStatus,
    pub progress: Option<u32>,
    pub error: Option<ActionError>,
}

impl Action {
    /// The provider's error message for a failed action, with a generic
    /// fallback when the detail object is absent.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.error
            .as_ref()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "action failed without error detail".to_string())
    }
}

#[derive(Deserialize)]
struct ActionResponse {
    action: Action,
}

/// Handler for `GET /actions/{id}`
#[derive(Debug, Clone)]
pub struct ActionHandler {
    client: CloudClient,
}

impl ActionHandler {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    /// Fetch the current state of an action
    pub async fn get(&self, action_id: i64) -> Result<Action> {
        let resp = self.client.get(&format!("actions/{action_id}")).await?;
        let parsed: ActionResponse = serde_json::from_value(resp)?;
        Ok(parsed.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_deserializes_known_and_unknown_values() {
        let a: Action = serde_json::from_value(json!({
            "id": 42, "command": "start_server", "status": "running",
            "progress": 50, "error": null
        }))
        .unwrap();
        assert_eq!(a.status, ActionStatus::Running);
        assert!(!a.status.is_terminal());

        let a: Action = serde_json::from_value(json!({
            "id": 43, "command": null, "status": "pending",
            "progress": 0, "error": null
        }))
        .unwrap();
        assert_eq!(a.status, ActionStatus::Unknown);
        assert!(!a.status.is_terminal());
    }

    #[test]
    fn error_message_prefers_provider_detail() {
        let a: Action = serde_json::from_value(json!({
            "id": 44, "command": "create_image", "status": "error",
            "progress": 100,
            "error": {"code": "resource_limit_exceeded", "message": "quota exceeded"}
        }))
        .unwrap();
        assert!(a.status.is_terminal());
        assert_eq!(a.error_message(), "quota exceeded");

        let a: Action = serde_json::from_value(json!({
            "id": 45, "command": null, "status": "error", "progress": 100, "error": null
        }))
        .unwrap();
        assert_eq!(a.error_message(), "action failed without error detail");
    }
}
