//! Automated backup commands
//!
//! Backups are images of type `backup` bound to a server; enabling and
//! disabling the schedule are server actions.

use hcloudctl_core::api::{ImageHandler, ServerHandler};

use crate::cli::BackupCommands;
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
    ("SERVER", "created_from.name"),
    ("CREATED", "created"),
];

pub async fn handle_backup_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &BackupCommands,
    output: OutputFormat,
    yes: bool,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let images = ImageHandler::new(client.clone());
    let servers = ServerHandler::new(client.clone());

    match cmd {
        BackupCommands::List { server } => {
            let list = images.list(Some("backup"), *server).await?;
            print_list(list, LIST_COLUMNS, output)
        }

        BackupCommands::Enable {
            server_id,
            window,
            wait,
        } => {
            let response = servers.enable_backup(*server_id, window.as_deref()).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Enabling backups for server {server_id}")),
            )
            .await
        }

        BackupCommands::Disable { server_id, wait } => {
            confirm_action(
                &format!("Disable backups for server {server_id}? Existing backups will be deleted"),
                yes,
            )?;
            let response = servers.disable_backup(*server_id).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Disabling backups for server {server_id}")),
            )
            .await
        }

        BackupCommands::Delete { id } => {
            confirm_action(&format!("Delete backup {id}?"), yes)?;
            images.delete(*id).await?;
            println!("Backup {id} deleted");
            Ok(())
        }
    }
}
