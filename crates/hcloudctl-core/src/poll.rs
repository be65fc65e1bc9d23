//! Polling of asynchronous provider actions
//!
//! Mutating API calls return an action id whose completion must be polled
//! separately. This module blocks the calling flow until the action reaches
//! a terminal status or a wall-clock budget is exhausted, emitting progress
//! events so the CLI can drive a spinner.
//!
//! The poller never retries the status query itself: a failed query ends
//! the wait immediately. Retries are the caller's decision.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::api::actions::{ActionHandler, ActionStatus};
use crate::api::Action;
use crate::client::CloudClient;
use crate::error::{CoreError, Result};

/// Default wall-clock budget for one action wait.
pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(300);

/// Default delay between two status queries.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Progress events emitted during an action wait
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// The wait has begun
    Started { action_id: i64 },
    /// One polling iteration observed a non-final or just-final status
    Polling {
        action_id: i64,
        status: ActionStatus,
        elapsed: Duration,
    },
    /// The action reached `success`
    Completed { action_id: i64 },
    /// The action failed, the query failed, or the budget ran out
    Failed { action_id: i64, error: String },
}

/// Callback type for progress updates.
///
/// The CLI uses this to update its spinner; headless callers pass `None`.
pub type ProgressCallback = Box<dyn Fn(ProgressEvent) + Send + Sync>;

/// Callback type for multi-action waits: `(index, total, event)` with
/// `index` starting at 1, so UIs can render an `(i/total)` counter.
pub type MultiProgressCallback = Box<dyn Fn(usize, usize, ProgressEvent) + Send + Sync>;

/// Poll one action until it reaches a terminal status.
///
/// Returns the final [`Action`] on success. A provider-reported failure
/// becomes [`CoreError::ActionFailed`] with the provider's message, an
/// exhausted budget becomes [`CoreError::ActionTimeout`], and a failed
/// status query propagates as-is — the three outcomes stay distinguishable
/// for the caller.
pub async fn poll_action(
    client: &CloudClient,
    action_id: i64,
    timeout: Duration,
    interval: Duration,
    on_progress: Option<ProgressCallback>,
) -> Result<Action> {
    let start = Instant::now();
    let handler = ActionHandler::new(client.clone());

    emit(&on_progress, ProgressEvent::Started { action_id });

    loop {
        let elapsed = start.elapsed();
        if elapsed > timeout {
            emit(
                &on_progress,
                ProgressEvent::Failed {
                    action_id,
                    error: format!("timed out after {}s", timeout.as_secs()),
                },
            );
            return Err(CoreError::ActionTimeout(timeout));
        }

        let action = match handler.get(action_id).await {
            Ok(action) => action,
            Err(err) => {
                emit(
                    &on_progress,
                    ProgressEvent::Failed {
                        action_id,
                        error: err.to_string(),
                    },
                );
                return Err(err);
            }
        };

        debug!(action_id, status = ?action.status, "polled action");
        emit(
            &on_progress,
            ProgressEvent::Polling {
                action_id,
                status: action.status,
                elapsed,
            },
        );

        match action.status {
            ActionStatus::Success => {
                emit(&on_progress, ProgressEvent::Completed { action_id });
                return Ok(action);
            }
            ActionStatus::Error => {
                let message = action.error_message();
                emit(
                    &on_progress,
                    ProgressEvent::Failed {
                        action_id,
                        error: message.clone(),
                    },
                );
                return Err(CoreError::ActionFailed(message));
            }
            // `running` or anything unknown: wait and re-check
            ActionStatus::Running | ActionStatus::Unknown => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

/// Await several actions strictly in the order supplied.
///
/// Short-circuits on the first failure; later ids are never queried. Each
/// per-action budget is `timeout`, matching the single-action contract.
pub async fn poll_actions(
    client: &CloudClient,
    action_ids: &[i64],
    timeout: Duration,
    interval: Duration,
    on_progress: Option<MultiProgressCallback>,
) -> Result<Vec<Action>> {
    let total = action_ids.len();
    let shared = on_progress.map(Arc::new);
    let mut completed = Vec::with_capacity(total);

    for (idx, &action_id) in action_ids.iter().enumerate() {
        let per_action = shared.clone().map(|cb| {
            let position = idx + 1;
            Box::new(move |event: ProgressEvent| cb(position, total, event)) as ProgressCallback
        });

        let action = poll_action(client, action_id, timeout, interval, per_action).await?;
        completed.push(action);
    }

    Ok(completed)
}

fn emit(callback: &Option<ProgressCallback>, event: ProgressEvent) {
    if let Some(cb) = callback {
        cb(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FAST: Duration = Duration::from_millis(10);
    const BUDGET: Duration = Duration::from_secs(5);

    async fn client_for(server: &MockServer) -> CloudClient {
        CloudClient::builder()
            .api_token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap()
    }

    fn action_body(id: i64, status: &str, error: Option<(&str, &str)>) -> serde_json::Value {
        json!({
            "action": {
                "id": id,
                "command": "start_server",
                "status": status,
                "progress": if status == "running" { 50 } else { 100 },
                "error": error.map(|(code, message)| json!({"code": code, "message": message})),
            }
        })
    }

    /// Mount a mock that walks through the given statuses, one per query.
    async fn mount_sequence(server: &MockServer, id: i64, statuses: &[&str]) {
        let responses: Vec<serde_json::Value> = statuses
            .iter()
            .map(|s| {
                if *s == "error" {
                    action_body(id, s, Some(("quota_exceeded", "quota exceeded")))
                } else {
                    action_body(id, s, None)
                }
            })
            .collect();
        let counter = Mutex::new(0usize);
        Mock::given(method("GET"))
            .and(path(format!("/actions/{id}")))
            .respond_with(move |_: &wiremock::Request| {
                let mut n = counter.lock().unwrap();
                let body = responses[(*n).min(responses.len() - 1)].clone();
                *n += 1;
                ResponseTemplate::new(200).set_body_json(body)
            })
            .mount(server)
            .await;
    }

    // Success path: running, running, success -> Ok after exactly 3 queries.
    #[tokio::test]
    async fn resolves_after_running_then_success() {
        let server = MockServer::start().await;
        mount_sequence(&server, 42, &["running", "running", "success"]).await;

        let client = client_for(&server).await;
        let action = poll_action(&client, 42, BUDGET, FAST, None).await.unwrap();
        assert_eq!(action.status, ActionStatus::Success);

        let queries = server.received_requests().await.unwrap().len();
        assert_eq!(queries, 3);
    }

    // Provider-reported failure surfaces the error message.
    #[tokio::test]
    async fn action_error_carries_provider_message() {
        let server = MockServer::start().await;
        mount_sequence(&server, 7, &["running", "error"]).await;

        let client = client_for(&server).await;
        let err = poll_action(&client, 7, BUDGET, FAST, None).await.unwrap_err();
        match err {
            CoreError::ActionFailed(message) => assert_eq!(message, "quota exceeded"),
            other => panic!("expected ActionFailed, got {other:?}"),
        }
    }

    // Budget smaller than the interval: one query, then timeout, and the
    // result is distinguishable from a provider failure.
    #[tokio::test]
    async fn times_out_when_action_never_finishes() {
        let server = MockServer::start().await;
        mount_sequence(&server, 9, &["running"]).await;

        let client = client_for(&server).await;
        let err = poll_action(&client, 9, Duration::from_millis(5), Duration::from_millis(50), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ActionTimeout(_)));
        assert!(err.is_timeout());

        let queries = server.received_requests().await.unwrap().len();
        assert_eq!(queries, 1);
    }

    // Transport/status failure of the query itself ends the wait at once,
    // with no sleep and no second attempt.
    #[tokio::test]
    async fn query_failure_aborts_immediately() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/actions/13"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "error": {"code": "unavailable", "message": "backend unavailable"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let started = Instant::now();
        let err = poll_action(&client, 13, BUDGET, Duration::from_secs(30), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Api { status: 500, .. }));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    // Polling an already-terminal action just observes the terminal state.
    #[tokio::test]
    async fn terminal_action_is_observed_idempotently() {
        let server = MockServer::start().await;
        mount_sequence(&server, 50, &["success"]).await;

        let client = client_for(&server).await;
        let first = poll_action(&client, 50, BUDGET, FAST, None).await.unwrap();
        let second = poll_action(&client, 50, BUDGET, FAST, None).await.unwrap();
        assert_eq!(first.status, ActionStatus::Success);
        assert_eq!(second.status, ActionStatus::Success);
    }

    // Multi-action wait short-circuits: after A fails, B and C are never
    // queried.
    #[tokio::test]
    async fn multi_action_short_circuits_on_first_failure() {
        let server = MockServer::start().await;
        mount_sequence(&server, 1, &["error"]).await;
        for id in [2, 3] {
            Mock::given(method("GET"))
                .and(path(format!("/actions/{id}")))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(action_body(id, "success", None)),
                )
                .expect(0)
                .mount(&server)
                .await;
        }

        let client = client_for(&server).await;
        let err = poll_actions(&client, &[1, 2, 3], BUDGET, FAST, None)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ActionFailed(_)));
    }

    // Ordered multi-action wait completes all actions and decorates the
    // progress callback with a 1-based (i/total) counter.
    #[tokio::test]
    async fn multi_action_reports_counter_in_order() {
        let server = MockServer::start().await;
        mount_sequence(&server, 21, &["running", "success"]).await;
        mount_sequence(&server, 22, &["success"]).await;

        let seen: Arc<Mutex<Vec<(usize, usize)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let callback: MultiProgressCallback = Box::new(move |i, total, event| {
            if matches!(event, ProgressEvent::Started { .. }) {
                sink.lock().unwrap().push((i, total));
            }
        });

        let client = client_for(&server).await;
        let completed = poll_actions(&client, &[21, 22], BUDGET, FAST, Some(callback))
            .await
            .unwrap();
        assert_eq!(completed.len(), 2);
        assert_eq!(*seen.lock().unwrap(), vec![(1, 2), (2, 2)]);
    }

    // Progress events arrive in Started -> Polling -> Completed order.
    #[tokio::test]
    async fn progress_events_follow_lifecycle() {
        let server = MockServer::start().await;
        mount_sequence(&server, 60, &["running", "success"]).await;

        let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let callback: ProgressCallback = Box::new(move |event| {
            let tag = match event {
                ProgressEvent::Started { .. } => "started",
                ProgressEvent::Polling { .. } => "polling",
                ProgressEvent::Completed { .. } => "completed",
                ProgressEvent::Failed { .. } => "failed",
            };
            sink.lock().unwrap().push(tag.to_string());
        });

        let client = client_for(&server).await;
        poll_action(&client, 60, BUDGET, FAST, Some(callback))
            .await
            .unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec!["started", "polling", "polling", "completed"]
        );
    }
}
