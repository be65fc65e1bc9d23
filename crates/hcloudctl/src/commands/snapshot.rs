//! Snapshot commands
//!
//! Snapshots are images of type `snapshot`; creation and rebuild go
//! through the server actions endpoint.

use hcloudctl_core::api::{ImageHandler, ServerHandler};
use serde_json::json;

use crate::cli::SnapshotCommands;
use crate::commands::util::{confirm_action, print_list};
use crate::commands::wait::wait_for_response;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::OutputFormat;

const LIST_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("DESCRIPTION", "description"),
    ("STATUS", "status"),
    ("SIZE_GB", "image_size"),
    ("CREATED_FROM", "created_from.name"),
    ("CREATED", "created"),
];

pub async fn handle_snapshot_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &SnapshotCommands,
    output: OutputFormat,
    yes: bool,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let images = ImageHandler::new(client.clone());
    let servers = ServerHandler::new(client.clone());

    match cmd {
        SnapshotCommands::List { server } => {
            let list = images.list(Some("snapshot"), *server).await?;
            print_list(list, LIST_COLUMNS, output)
        }

        SnapshotCommands::Create {
            server_id,
            description,
            wait,
        } => {
            let response = servers
                .create_image(*server_id, "snapshot", description.as_deref())
                .await?;
            if let Some(image_id) = response.pointer("/image/id") {
                println!("Snapshot {image_id} queued");
            }
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Creating snapshot of server {server_id}")),
            )
            .await
        }

        SnapshotCommands::Delete { id } => {
            confirm_action(&format!("Delete snapshot {id}?"), yes)?;
            images.delete(*id).await?;
            println!("Snapshot {id} deleted");
            Ok(())
        }

        SnapshotCommands::Rebuild {
            server_id,
            snapshot_id,
            wait,
        } => {
            confirm_action(
                &format!("Rebuild server {server_id} from snapshot {snapshot_id}? All data will be lost"),
                yes,
            )?;
            let response = servers.rebuild(*server_id, &json!(snapshot_id)).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Rebuilding server {server_id} from snapshot {snapshot_id}")),
            )
            .await
        }
    }
}
