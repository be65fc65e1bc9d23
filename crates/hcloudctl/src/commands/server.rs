//! Server lifecycle commands

use hcloudctl_core::api::ServerHandler;
use serde_json::{Value, json};
use tracing::debug;

use crate::cli::ServerCommands;
use crate::commands::util::{confirm_action, print_list, read_text_arg};
use crate::commands::wait::wait_for_response;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::{OutputFormat, print_output};

const LIST_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("NAME", "name"),
    ("STATUS", "status"),
    ("TYPE", "server_type.name"),
    ("IPV4", "public_net.ipv4.ip"),
    ("LOCATION", "datacenter.location.name"),
];

pub async fn handle_server_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &ServerCommands,
    output: OutputFormat,
    yes: bool,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let servers = ServerHandler::new(client.clone());

    match cmd {
        ServerCommands::List => {
            let list = servers.list().await?;
            print_list(list, LIST_COLUMNS, output)
        }

        ServerCommands::Get { id } => {
            let server = servers.get(*id).await?;
            print_output(server, output)
        }

        ServerCommands::Create {
            name,
            server_type,
            image,
            location,
            ssh_keys,
            user_data,
            start_after_create,
            wait,
        } => {
            let mut body = json!({
                "name": name,
                "server_type": server_type,
                "image": image,
                "start_after_create": start_after_create,
            });
            if let Some(location) = location {
                body["location"] = json!(location);
            }
            if !ssh_keys.is_empty() {
                body["ssh_keys"] = json!(ssh_keys);
            }
            if let Some(user_data) = user_data {
                body["user_data"] = json!(read_text_arg(user_data)?);
            }

            let response = servers.create(&body).await?;
            debug!("create response received, awaiting action");

            // The one-time root password only appears in the create
            // response; surface it before the wait starts.
            if let Some(password) = response.get("root_password").and_then(Value::as_str) {
                println!("Root password: {password}");
            }
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Creating server {name}")),
            )
            .await?;
            print_created(&response, "server", output)
        }

        ServerCommands::Start { id, wait } => {
            let response = servers.power_on(*id).await?;
            wait_for_response(&client, &response, wait, Some(&format!("Starting server {id}")))
                .await
        }

        ServerCommands::Stop { id, force, wait } => {
            let (response, verb) = if *force {
                (servers.power_off(*id).await?, "Powering off")
            } else {
                (servers.shutdown(*id).await?, "Shutting down")
            };
            wait_for_response(&client, &response, wait, Some(&format!("{verb} server {id}")))
                .await
        }

        ServerCommands::Reboot { id, wait } => {
            let response = servers.reboot(*id).await?;
            wait_for_response(&client, &response, wait, Some(&format!("Rebooting server {id}")))
                .await
        }

        ServerCommands::Delete { id, wait } => {
            confirm_action(&format!("Delete server {id}? This cannot be undone"), yes)?;
            let response = servers.delete(*id).await?;
            wait_for_response(&client, &response, wait, Some(&format!("Deleting server {id}")))
                .await
        }

        ServerCommands::Rename { id, name } => {
            let updated = servers.update(*id, &json!({"name": name})).await?;
            print_output(updated, output)
        }

        ServerCommands::Resize {
            id,
            server_type,
            upgrade_disk,
            wait,
        } => {
            if *upgrade_disk {
                confirm_action(
                    &format!("Resize server {id} with disk upgrade? This cannot be undone"),
                    yes,
                )?;
            }
            let response = servers.change_type(*id, server_type, *upgrade_disk).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Resizing server {id} to {server_type}")),
            )
            .await
        }

        ServerCommands::Rebuild { id, image, wait } => {
            confirm_action(
                &format!("Rebuild server {id} from {image}? All data will be lost"),
                yes,
            )?;
            let response = servers.rebuild(*id, &json!(image)).await?;
            if let Some(password) = response.get("root_password").and_then(Value::as_str) {
                println!("Root password: {password}");
            }
            wait_for_response(&client, &response, wait, Some(&format!("Rebuilding server {id}")))
                .await
        }

        ServerCommands::Rescue {
            id,
            rescue_type,
            wait,
        } => {
            let response = servers.enable_rescue(*id, rescue_type).await?;
            if let Some(password) = response.get("root_password").and_then(Value::as_str) {
                println!("Rescue root password: {password}");
            }
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Enabling rescue mode on server {id}")),
            )
            .await?;
            println!("Reboot the server to enter the rescue system");
            Ok(())
        }

        ServerCommands::ResetPassword { id } => {
            let response = servers.reset_password(*id).await?;
            match response.get("root_password").and_then(Value::as_str) {
                Some(password) => println!("New root password: {password}"),
                None => println!("Password reset requested; no password returned"),
            }
            wait_for_response(&client, &response, &Default::default(), None).await
        }

        ServerCommands::AttachIso { id, iso, wait } => {
            let response = servers.attach_iso(*id, iso).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Attaching ISO {iso} to server {id}")),
            )
            .await
        }

        ServerCommands::DetachIso { id, wait } => {
            let response = servers.detach_iso(*id).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Detaching ISO from server {id}")),
            )
            .await
        }
    }
}

/// Print the created resource from a create-response envelope.
fn print_created(response: &Value, key: &str, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json | OutputFormat::Yaml => {
            print_output(response.get(key).cloned().unwrap_or(Value::Null), output)
        }
        OutputFormat::Auto | OutputFormat::Table => {
            if let Some(id) = response.pointer(&format!("/{key}/id")) {
                println!("Created {key} {id}");
            }
            Ok(())
        }
    }
}
