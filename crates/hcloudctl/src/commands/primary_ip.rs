//! Primary IP commands

use hcloudctl_core::api::PrimaryIpHandler;
use serde_json::json;

use crate::cli::PrimaryIpCommands;
use crate::commands::util::{confirm_action, print_list};
use crate::commands::wait::wait_for_response;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::{OutputFormat, print_output};

const LIST_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("NAME", "name"),
    ("IP", "ip"),
    ("TYPE", "type"),
    ("ASSIGNEE", "assignee_id"),
    ("DATACENTER", "datacenter.name"),
];

pub async fn handle_primary_ip_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &PrimaryIpCommands,
    output: OutputFormat,
    yes: bool,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let ips = PrimaryIpHandler::new(client.clone());

    match cmd {
        PrimaryIpCommands::List => {
            let list = ips.list().await?;
            print_list(list, LIST_COLUMNS, output)
        }

        PrimaryIpCommands::Get { id } => {
            let ip = ips.get(*id).await?;
            print_output(ip, output)
        }

        PrimaryIpCommands::Create {
            name,
            ip_type,
            datacenter,
            server,
        } => {
            let mut body = json!({"name": name, "type": ip_type});
            if let Some(datacenter) = datacenter {
                body["datacenter"] = json!(datacenter);
            }
            if let Some(server) = server {
                body["assignee_type"] = json!("server");
                body["assignee_id"] = json!(server);
            }
            let response = ips.create(&body).await?;
            if let Some(addr) = response.pointer("/primary_ip/ip") {
                println!("Created primary IP {addr}");
            }
            wait_for_response(&client, &response, &Default::default(), None).await
        }

        PrimaryIpCommands::Update { id, name } => {
            let response = ips.update(*id, &json!({"name": name})).await?;
            print_output(response.get("primary_ip").cloned().unwrap_or_default(), output)
        }

        PrimaryIpCommands::Delete { id } => {
            confirm_action(&format!("Delete primary IP {id}?"), yes)?;
            ips.delete(*id).await?;
            println!("Primary IP {id} deleted");
            Ok(())
        }

        PrimaryIpCommands::Assign { id, server, wait } => {
            let response = ips.assign(*id, *server, "server").await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Assigning primary IP {id} to server {server}")),
            )
            .await
        }

        PrimaryIpCommands::Unassign { id, wait } => {
            let response = ips.unassign(*id).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Unassigning primary IP {id}")),
            )
            .await
        }

        PrimaryIpCommands::SetRdns {
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

        PrimaryIpCommands::Protect { id, disable, wait } => {
            let response = ips.change_protection(*id, !disable).await?;
            let verb = if *disable { "Disabling" } else { "Enabling" };
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("{verb} delete protection for primary IP {id}")),
            )
            .await
        }
    }
}
