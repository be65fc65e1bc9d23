//! Batch server operations
//!
//! Runs one operation per server strictly in order, printing an
//! (i/total) counter per server and a success/failure tally at the end.
//! A failed server does not stop the rest of the batch.

use hcloudctl_core::api::ServerHandler;
use tracing::warn;

use crate::cli::{BatchCommands, WaitArgs};
use crate::commands::util::confirm_action;
use crate::commands::wait::wait_for_response;
use crate::connection::ConnectionManager;
use crate::error::{CliError, Result};

pub async fn handle_batch_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &BatchCommands,
    yes: bool,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let servers = ServerHandler::new(client.clone());

    match cmd {
        BatchCommands::Start { ids, wait } => {
            run_batch(ids, "Starting", wait, |id, wait| {
                let servers = servers.clone();
                let client = client.clone();
                async move {
                    let response = servers.power_on(id).await?;
                    wait_for_response(&client, &response, &wait, None).await
                }
            })
            .await
        }

        BatchCommands::Stop { ids, force, wait } => {
            let verb = if *force { "Powering off" } else { "Shutting down" };
            let force = *force;
            run_batch(ids, verb, wait, |id, wait| {
                let servers = servers.clone();
                let client = client.clone();
                async move {
                    let response = if force {
                        servers.power_off(id).await?
                    } else {
                        servers.shutdown(id).await?
                    };
                    wait_for_response(&client, &response, &wait, None).await
                }
            })
            .await
        }

        BatchCommands::Delete { ids, wait } => {
            confirm_action(
                &format!(
                    "Delete {} server(s): {}? This cannot be undone",
                    ids.len(),
                    join_ids(ids)
                ),
                yes,
            )?;
            run_batch(ids, "Deleting", wait, |id, wait| {
                let servers = servers.clone();
                let client = client.clone();
                async move {
                    let response = servers.delete(id).await?;
                    wait_for_response(&client, &response, &wait, None).await
                }
            })
            .await
        }

        BatchCommands::Snapshot {
            ids,
            description,
            wait,
        } => {
            let description = description.clone();
            run_batch(ids, "Snapshotting", wait, |id, wait| {
                let servers = servers.clone();
                let client = client.clone();
                let description = description
                    .as_ref()
                    .map(|prefix| format!("{prefix}-{id}"))
                    .unwrap_or_else(|| format!("server-{id}"));
                async move {
                    let response = servers
                        .create_image(id, "snapshot", Some(&description))
                        .await?;
                    wait_for_response(&client, &response, &wait, None).await
                }
            })
            .await
        }
    }
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Drive `op` over every server id, tallying the outcome per server.
async fn run_batch<F, Fut>(ids: &[i64], verb: &str, wait: &WaitArgs, mut op: F) -> Result<()>
where
    F: FnMut(i64, WaitArgs) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let total = ids.len();
    let mut failed = 0usize;

    for (index, id) in ids.iter().enumerate() {
        println!("({}/{total}) {verb} server {id}", index + 1);
        match op(*id, *wait).await {
            Ok(()) => {}
            Err(err) => {
                failed += 1;
                warn!(server_id = id, error = %err, "batch operation failed");
                println!("({}/{total}) server {id}: {err}", index + 1);
            }
        }
    }

    let succeeded = total - failed;
    println!("Done: {succeeded} succeeded, {failed} failed");
    if failed > 0 {
        return Err(CliError::ActionFailed {
            message: format!("{failed} of {total} servers failed"),
        });
    }
    Ok(())
}
