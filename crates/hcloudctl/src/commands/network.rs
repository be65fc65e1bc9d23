//! Private network commands

use hcloudctl_core::api::{NetworkHandler, ServerHandler};
use serde_json::json;

use crate::cli::NetworkCommands;
use crate::commands::util::{confirm_action, print_list};
use crate::commands::wait::wait_for_response;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::{OutputFormat, print_output};

const LIST_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("NAME", "name"),
    ("IP_RANGE", "ip_range"),
    ("SUBNETS", "subnets"),
    ("SERVERS", "servers"),
];

pub async fn handle_network_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &NetworkCommands,
    output: OutputFormat,
    yes: bool,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let networks = NetworkHandler::new(client.clone());
    let servers = ServerHandler::new(client.clone());

    match cmd {
        NetworkCommands::List => {
            let list = networks.list().await?;
            print_list(list, LIST_COLUMNS, output)
        }

        NetworkCommands::Get { id } => {
            let network = networks.get(*id).await?;
            print_output(network, output)
        }

        NetworkCommands::Create {
            name,
            ip_range,
            subnet,
            zone,
        } => {
            let mut body = json!({"name": name, "ip_range": ip_range});
            if let Some(subnet) = subnet {
                body["subnets"] = json!([{
                    "type": "cloud",
                    "ip_range": subnet,
                    "network_zone": zone,
                }]);
            }
            let response = networks.create(&body).await?;
            if let Some(id) = response.pointer("/network/id") {
                println!("Created network {id}");
            }
            Ok(())
        }

        NetworkCommands::Update { id, name } => {
            let response = networks.update(*id, &json!({"name": name})).await?;
            print_output(response.get("network").cloned().unwrap_or_default(), output)
        }

        NetworkCommands::Delete { id } => {
            confirm_action(&format!("Delete network {id}?"), yes)?;
            networks.delete(*id).await?;
            println!("Network {id} deleted");
            Ok(())
        }

        NetworkCommands::Attach {
            id,
            server,
            ip,
            wait,
        } => {
            let mut body = json!({"network": id});
            if let Some(ip) = ip {
                body["ip"] = json!(ip);
            }
            let response = servers.attach_to_network(*server, &body).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Attaching server {server} to network {id}")),
            )
            .await
        }

        NetworkCommands::Detach { id, server, wait } => {
            let response = servers.detach_from_network(*server, *id).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Detaching server {server} from network {id}")),
            )
            .await
        }

        NetworkCommands::AddSubnet {
            id,
            ip_range,
            zone,
            wait,
        } => {
            let response = networks.add_subnet(*id, ip_range, zone).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Adding subnet {ip_range} to network {id}")),
            )
            .await
        }

        NetworkCommands::DeleteSubnet { id, ip_range, wait } => {
            confirm_action(&format!("Remove subnet {ip_range} from network {id}?"), yes)?;
            let response = networks.delete_subnet(*id, ip_range).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Removing subnet {ip_range} from network {id}")),
            )
            .await
        }

        NetworkCommands::Protect { id, disable, wait } => {
            let response = networks.change_protection(*id, !disable).await?;
            let verb = if *disable { "Disabling" } else { "Enabling" };
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("{verb} delete protection for network {id}")),
            )
            .await
        }
    }
}
