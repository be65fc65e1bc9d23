//! Waiting on provider actions with a spinner
//!
//! Bridges the core poller's progress events to an indicatif spinner and
//! folds the three failure modes (provider error, timeout, transport
//! failure) into one printed line each via the error path.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use hcloudctl_core::{
    CloudClient, MultiProgressCallback, ProgressCallback, ProgressEvent, poll_action, poll_actions,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::time::Duration;

use crate::cli::WaitArgs;
use crate::error::Result;

/// Animated status line shown while an action wait is in flight.
///
/// `stop` is idempotent: the first call replaces the animation with a
/// final done/failed line, later calls are no-ops.
pub struct WaitSpinner {
    bar: ProgressBar,
    message: String,
    finished: Arc<AtomicBool>,
}

impl WaitSpinner {
    /// Begin ticking next to `message`; non-blocking.
    pub fn start(message: impl Into<String>) -> Self {
        let message = message.into();
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed_precise}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.clone());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self {
            bar,
            message,
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Update the status text while keeping the animation running
    pub fn set_message(&self, message: impl Into<String>) {
        if !self.finished.load(Ordering::SeqCst) {
            self.bar.set_message(message.into());
        }
    }

    /// Finish with a done/failed line; only the first call has an effect
    pub fn stop(&self, success: bool) {
        if self.finished.swap(true, Ordering::SeqCst) {
            return;
        }
        let suffix = if success { "done" } else { "failed" };
        self.bar
            .finish_with_message(format!("{} ... {}", self.message, suffix));
    }
}

/// Pull the awaitable action ids out of a mutating response envelope.
///
/// Handles both the single `action` object and the `actions` array form
/// (firewall apply and similar calls return several).
pub fn extract_action_ids(response: &Value) -> Vec<i64> {
    let mut ids = Vec::new();
    if let Some(id) = response.pointer("/action/id").and_then(Value::as_i64) {
        ids.push(id);
    }
    for action in response
        .get("actions")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        if let Some(id) = action.get("id").and_then(Value::as_i64) {
            ids.push(id);
        }
    }
    ids
}

/// Wait on every action in a mutating response.
///
/// A response without any action object means there is nothing to wait
/// for; the wait reports success without issuing a single polling call.
pub async fn wait_for_response(
    client: &CloudClient,
    response: &Value,
    wait: &WaitArgs,
    message: Option<&str>,
) -> Result<()> {
    let ids = extract_action_ids(response);
    if ids.is_empty() {
        if let Some(message) = message {
            println!("{message} ... done");
        }
        return Ok(());
    }

    if ids.len() == 1 {
        wait_for_action(client, ids[0], wait, message).await
    } else {
        wait_for_all_actions(client, &ids, wait, message).await
    }
}

/// Wait on one action id, driving the spinner from progress events
pub async fn wait_for_action(
    client: &CloudClient,
    action_id: i64,
    wait: &WaitArgs,
    message: Option<&str>,
) -> Result<()> {
    let spinner = message.map(WaitSpinner::start);

    let callback = spinner.as_ref().map(|s| {
        let bar = s.bar.clone();
        let base = s.message.clone();
        Box::new(move |event: ProgressEvent| {
            if let ProgressEvent::Polling { status, .. } = event {
                bar.set_message(format!("{base} ({status:?})"));
            }
        }) as ProgressCallback
    });

    let result = poll_action(client, action_id, wait.timeout(), wait.interval(), callback).await;
    if let Some(spinner) = &spinner {
        spinner.stop(result.is_ok());
    }
    result?;
    Ok(())
}

/// Wait on several action ids strictly in order, with an (i/total)
/// counter in the status line. Stops at the first failure.
pub async fn wait_for_all_actions(
    client: &CloudClient,
    action_ids: &[i64],
    wait: &WaitArgs,
    message: Option<&str>,
) -> Result<()> {
    let spinner = message.map(WaitSpinner::start);

    let callback = spinner.as_ref().map(|s| {
        let bar = s.bar.clone();
        let base = s.message.clone();
        Box::new(move |index: usize, total: usize, event: ProgressEvent| match event {
            ProgressEvent::Started { action_id } => {
                bar.set_message(format!("{base} ({index}/{total}) action {action_id}"));
            }
            ProgressEvent::Polling { action_id, status, .. } => {
                bar.set_message(format!(
                    "{base} ({index}/{total}) action {action_id}: {status:?}"
                ));
            }
            _ => {}
        }) as MultiProgressCallback
    });

    let result = poll_actions(client, action_ids, wait.timeout(), wait.interval(), callback).await;
    if let Some(spinner) = &spinner {
        spinner.stop(result.is_ok());
    }
    result?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn spinner_stop_is_idempotent() {
        let spinner = WaitSpinner::start("stopping server 42");
        spinner.stop(true);
        assert!(spinner.finished.load(Ordering::SeqCst));
        // Second and third calls must not panic or change state
        spinner.stop(false);
        spinner.stop(true);
        assert!(spinner.finished.load(Ordering::SeqCst));
    }

    #[test]
    fn extracts_single_and_multiple_action_ids() {
        let single = json!({"action": {"id": 7, "status": "running"}});
        assert_eq!(extract_action_ids(&single), vec![7]);

        let multiple = json!({"actions": [{"id": 1}, {"id": 2}, {"id": 3}]});
        assert_eq!(extract_action_ids(&multiple), vec![1, 2, 3]);

        let none = json!({"server": {"id": 42}});
        assert!(extract_action_ids(&none).is_empty());
    }

    // A response without an action object completes without any HTTP call.
    #[tokio::test]
    async fn response_without_action_skips_polling() {
        let server = MockServer::start().await;
        // No mocks mounted: any request would 404 and the expect below
        // would fail the count assertion.
        let client = CloudClient::builder()
            .api_token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap();

        let response = json!({"ssh_key": {"id": 9}});
        wait_for_response(&client, &response, &WaitArgs::default(), None)
            .await
            .unwrap();

        assert!(server.received_requests().await.unwrap().is_empty());
    }

    // Full mutating flow: poweron answers 201 with action 42, the wait
    // polls it through running then success, and reports success after
    // exactly two status queries.
    #[tokio::test]
    async fn power_on_response_is_polled_until_success() {
        use hcloudctl_core::api::ServerHandler;
        use std::sync::Mutex;

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/servers/42/actions/poweron"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "action": {"id": 42, "command": "start_server", "status": "running",
                           "progress": 0, "error": null}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let counter = Mutex::new(0usize);
        Mock::given(method("GET"))
            .and(path("/actions/42"))
            .respond_with(move |_: &wiremock::Request| {
                let mut n = counter.lock().unwrap();
                let (status, progress) = if *n == 0 { ("running", 50) } else { ("success", 100) };
                *n += 1;
                ResponseTemplate::new(200).set_body_json(json!({
                    "action": {"id": 42, "command": "start_server", "status": status,
                               "progress": progress, "error": null}
                }))
            })
            .expect(2)
            .mount(&server)
            .await;

        let client = CloudClient::builder()
            .api_token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap();

        let response = ServerHandler::new(client.clone()).power_on(42).await.unwrap();
        let wait = WaitArgs {
            wait_timeout: 5,
            poll_interval: 0,
        };
        wait_for_response(&client, &response, &wait, None)
            .await
            .unwrap();

        let queries = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .filter(|r| r.url.path() == "/actions/42")
            .count();
        assert_eq!(queries, 2);
    }

    #[tokio::test]
    async fn waits_on_action_from_response_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/actions/55"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "action": {"id": 55, "command": "start_server", "status": "success",
                           "progress": 100, "error": null}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CloudClient::builder()
            .api_token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap();

        let response = json!({"action": {"id": 55, "status": "running"}});
        let wait = WaitArgs {
            wait_timeout: 5,
            poll_interval: 1,
        };
        wait_for_response(&client, &response, &wait, None)
            .await
            .unwrap();
    }
}
