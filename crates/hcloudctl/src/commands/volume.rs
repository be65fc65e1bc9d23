//! Volume commands

use hcloudctl_core::api::VolumeHandler;
use serde_json::{Value, json};

use crate::cli::VolumeCommands;
use crate::commands::util::{confirm_action, print_list};
use crate::commands::wait::wait_for_response;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::{OutputFormat, print_output};

const LIST_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("NAME", "name"),
    ("STATUS", "status"),
    ("SIZE_GB", "size"),
    ("SERVER", "server"),
    ("LOCATION", "location.name"),
];

pub async fn handle_volume_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &VolumeCommands,
    output: OutputFormat,
    yes: bool,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let volumes = VolumeHandler::new(client.clone());

    match cmd {
        VolumeCommands::List => {
            let list = volumes.list().await?;
            print_list(list, LIST_COLUMNS, output)
        }

        VolumeCommands::Get { id } => {
            let volume = volumes.get(*id).await?;
            print_output(volume, output)
        }

        VolumeCommands::Create {
            name,
            size,
            location,
            server,
            format,
            automount,
            wait,
        } => {
            let mut body = json!({"name": name, "size": size});
            if let Some(location) = location {
                body["location"] = json!(location);
            }
            if let Some(server) = server {
                body["server"] = json!(server);
                body["automount"] = json!(automount);
            }
            if let Some(format) = format {
                body["format"] = json!(format);
            }

            let response = volumes.create(&body).await?;
            if let Some(id) = response.pointer("/volume/id") {
                println!("Created volume {id}");
            }
            wait_for_response(&client, &response, wait, Some(&format!("Creating volume {name}")))
                .await
        }

        VolumeCommands::Delete { id } => {
            confirm_action(&format!("Delete volume {id}? This cannot be undone"), yes)?;
            volumes.delete(*id).await?;
            println!("Volume {id} deleted");
            Ok(())
        }

        VolumeCommands::Attach {
            id,
            server,
            automount,
            wait,
        } => {
            let response = volumes.attach(*id, *server, *automount).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Attaching volume {id} to server {server}")),
            )
            .await
        }

        VolumeCommands::Detach { id, wait } => {
            let response = volumes.detach(*id).await?;
            wait_for_response(&client, &response, wait, Some(&format!("Detaching volume {id}")))
                .await
        }

        VolumeCommands::Resize { id, size, wait } => {
            let current = volumes.get(*id).await?;
            let current_size = current.get("size").and_then(Value::as_i64).unwrap_or(0);
            if *size <= current_size {
                return Err(crate::error::CliError::InvalidInput {
                    message: format!(
                        "new size {size} GB must be larger than the current {current_size} GB"
                    ),
                });
            }
            let response = volumes.resize(*id, *size).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Resizing volume {id} to {size} GB")),
            )
            .await?;
            println!("Grow the filesystem on the attached server to use the new space");
            Ok(())
        }

        VolumeCommands::Protect { id, disable, wait } => {
            let response = volumes.change_protection(*id, !disable).await?;
            let verb = if *disable { "Disabling" } else { "Enabling" };
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("{verb} delete protection for volume {id}")),
            )
            .await
        }
    }
}
