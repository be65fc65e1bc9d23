//! Firewall commands

use hcloudctl_core::api::FirewallHandler;
use serde_json::json;

use crate::cli::FirewallCommands;
use crate::commands::util::{confirm_action, parse_json_arg, print_list};
use crate::commands::wait::wait_for_response;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::{OutputFormat, print_output};

const LIST_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("NAME", "name"),
    ("RULES", "rules"),
    ("APPLIED_TO", "applied_to"),
];

fn server_resource(server_id: i64) -> serde_json::Value {
    json!([{"type": "server", "server": {"id": server_id}}])
}

pub async fn handle_firewall_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &FirewallCommands,
    output: OutputFormat,
    yes: bool,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let firewalls = FirewallHandler::new(client.clone());

    match cmd {
        FirewallCommands::List => {
            let list = firewalls.list().await?;
            print_list(list, LIST_COLUMNS, output)
        }

        FirewallCommands::Get { id } => {
            let firewall = firewalls.get(*id).await?;
            print_output(firewall, output)
        }

        FirewallCommands::Create { name, rules } => {
            let mut body = json!({"name": name});
            if let Some(rules) = rules {
                body["rules"] = parse_json_arg(rules)?;
            }
            let response = firewalls.create(&body).await?;
            if let Some(id) = response.pointer("/firewall/id") {
                println!("Created firewall {id}");
            }
            wait_for_response(&client, &response, &Default::default(), None).await
        }

        FirewallCommands::Update { id, name } => {
            let response = firewalls.update(*id, &json!({"name": name})).await?;
            print_output(response.get("firewall").cloned().unwrap_or_default(), output)
        }

        FirewallCommands::Delete { id } => {
            confirm_action(&format!("Delete firewall {id}?"), yes)?;
            firewalls.delete(*id).await?;
            println!("Firewall {id} deleted");
            Ok(())
        }

        FirewallCommands::SetRules { id, rules, wait } => {
            let rules = parse_json_arg(rules)?;
            let response = firewalls.set_rules(*id, &rules).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Updating rules of firewall {id}")),
            )
            .await
        }

        FirewallCommands::Apply { id, server, wait } => {
            let response = firewalls
                .apply_to_resources(*id, &server_resource(*server))
                .await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Applying firewall {id} to server {server}")),
            )
            .await
        }

        FirewallCommands::Remove { id, server, wait } => {
            let response = firewalls
                .remove_from_resources(*id, &server_resource(*server))
                .await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Removing firewall {id} from server {server}")),
            )
            .await
        }
    }
}
