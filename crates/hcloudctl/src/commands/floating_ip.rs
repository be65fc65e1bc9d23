//! Floating IP commands

use hcloudctl_core::api::FloatingIpHandler;
use serde_json::json;

use crate::cli::FloatingIpCommands;
use crate::commands::util::{confirm_action, print_list};
use crate::commands::wait::wait_for_response;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::{OutputFormat, print_output};

const LIST_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("IP", "ip"),
    ("TYPE", "type"),
    ("SERVER", "server"),
    ("LOCATION", "home_location.name"),
    ("DESCRIPTION", "description"),
];

pub async fn handle_floating_ip_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &FloatingIpCommands,
    output: OutputFormat,
    yes: bool,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let ips = FloatingIpHandler::new(client.clone());

    match cmd {
        FloatingIpCommands::List => {
            let list = ips.list().await?;
            print_list(list, LIST_COLUMNS, output)
        }

        FloatingIpCommands::Get { id } => {
            let ip = ips.get(*id).await?;
            print_output(ip, output)
        }

        FloatingIpCommands::Create {
            ip_type,
            home_location,
            server,
            description,
        } => {
            let mut body = json!({"type": ip_type});
            if let Some(location) = home_location {
                body["home_location"] = json!(location);
            }
            if let Some(server) = server {
                body["server"] = json!(server);
            }
            if let Some(description) = description {
                body["description"] = json!(description);
            }
            let response = ips.create(&body).await?;
            if let Some(addr) = response.pointer("/floating_ip/ip") {
                println!("Created floating IP {addr}");
            }
            wait_for_response(&client, &response, &Default::default(), None).await
        }

        FloatingIpCommands::Update {
            id,
            description,
            name,
        } => {
            let mut body = json!({});
            if let Some(description) = description {
                body["description"] = json!(description);
            }
            if let Some(name) = name {
                body["name"] = json!(name);
            }
            let response = ips.update(*id, &body).await?;
            print_output(response.get("floating_ip").cloned().unwrap_or_default(), output)
        }

        FloatingIpCommands::Delete { id } => {
            confirm_action(&format!("Delete floating IP {id}?"), yes)?;
            ips.delete(*id).await?;
            println!("Floating IP {id} deleted");
            Ok(())
        }

        FloatingIpCommands::Assign { id, server, wait } => {
            let response = ips.assign(*id, *server).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Assigning floating IP {id} to server {server}")),
            )
            .await
        }

        FloatingIpCommands::Unassign { id, wait } => {
            let response = ips.unassign(*id).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Unassigning floating IP {id}")),
            )
            .await
        }

        FloatingIpCommands::SetRdns {
            id,
            ip,
            dns_ptr,
            wait,
        } => {
            let response = ips.change_dns_ptr(*id, ip, dns_ptr.as_deref()).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Setting reverse DNS for {ip}")),
            )
            .await
        }

        FloatingIpCommands::Protect { id, disable, wait } => {
            let response = ips.change_protection(*id, !disable).await?;
            let verb = if *disable { "Disabling" } else { "Enabling" };
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("{verb} delete protection for floating IP {id}")),
            )
            .await
        }
    }
}
