//! Load balancer commands

use hcloudctl_core::api::LoadBalancerHandler;
use serde_json::json;

use crate::cli::LoadBalancerCommands;
use crate::commands::util::{confirm_action, parse_json_arg, print_list};
use crate::commands::wait::wait_for_response;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::{OutputFormat, print_output};

const LIST_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("NAME", "name"),
    ("TYPE", "load_balancer_type.name"),
    ("IPV4", "public_net.ipv4.ip"),
    ("TARGETS", "targets"),
    ("LOCATION", "location.name"),
];

const TYPE_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("NAME", "name"),
    ("MAX_TARGETS", "max_targets"),
    ("MAX_SERVICES", "max_services"),
    ("MAX_CONNECTIONS", "max_connections"),
];

fn server_target(server_id: i64, use_private_ip: bool) -> serde_json::Value {
    json!({
        "type": "server",
        "server": {"id": server_id},
        "use_private_ip": use_private_ip,
    })
}

pub async fn handle_load_balancer_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &LoadBalancerCommands,
    output: OutputFormat,
    yes: bool,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let lbs = LoadBalancerHandler::new(client.clone());

    match cmd {
        LoadBalancerCommands::List => {
            let list = lbs.list().await?;
            print_list(list, LIST_COLUMNS, output)
        }

        LoadBalancerCommands::Get { id } => {
            let lb = lbs.get(*id).await?;
            print_output(lb, output)
        }

        LoadBalancerCommands::Types => {
            let types = lbs.list_types().await?;
            print_list(types, TYPE_COLUMNS, output)
        }

        LoadBalancerCommands::Create {
            name,
            lb_type,
            location,
            network_zone,
            algorithm,
            wait,
        } => {
            let mut body = json!({
                "name": name,
                "load_balancer_type": lb_type,
                "algorithm": {"type": algorithm},
            });
            if let Some(location) = location {
                body["location"] = json!(location);
            }
            if let Some(zone) = network_zone {
                body["network_zone"] = json!(zone);
            }

            let response = lbs.create(&body).await?;
            if let Some(id) = response.pointer("/load_balancer/id") {
                println!("Created load balancer {id}");
            }
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Creating load balancer {name}")),
            )
            .await
        }

        LoadBalancerCommands::Delete { id } => {
            confirm_action(&format!("Delete load balancer {id}?"), yes)?;
            lbs.delete(*id).await?;
            println!("Load balancer {id} deleted");
            Ok(())
        }

        LoadBalancerCommands::AddTarget {
            id,
            server,
            use_private_ip,
            wait,
        } => {
            let response = lbs
                .add_target(*id, &server_target(*server, *use_private_ip))
                .await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Adding server {server} to load balancer {id}")),
            )
            .await
        }

        LoadBalancerCommands::RemoveTarget { id, server, wait } => {
            let response = lbs
                .remove_target(*id, &json!({"type": "server", "server": {"id": server}}))
                .await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Removing server {server} from load balancer {id}")),
            )
            .await
        }

        LoadBalancerCommands::AddService { id, service, wait } => {
            let service = parse_json_arg(service)?;
            let response = lbs.add_service(*id, &service).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Adding service to load balancer {id}")),
            )
            .await
        }

        LoadBalancerCommands::UpdateService { id, service, wait } => {
            let service = parse_json_arg(service)?;
            let response = lbs.update_service(*id, &service).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Updating service on load balancer {id}")),
            )
            .await
        }

        LoadBalancerCommands::DeleteService {
            id,
            listen_port,
            wait,
        } => {
            confirm_action(
                &format!("Delete service on port {listen_port} of load balancer {id}?"),
                yes,
            )?;
            let response = lbs.delete_service(*id, *listen_port).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Deleting service on load balancer {id}")),
            )
            .await
        }

        LoadBalancerCommands::Algorithm { id, algorithm, wait } => {
            let response = lbs.change_algorithm(*id, algorithm).await?;
            wait_for_response(
                &client,
                &response,
                wait,
                Some(&format!("Switching load balancer {id} to {algorithm}")),
            )
            .await
        }
    }
}
