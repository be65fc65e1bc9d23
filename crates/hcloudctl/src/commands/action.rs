//! Action inspection commands

use hcloudctl_core::api::ActionHandler;

use crate::cli::ActionCommands;
use crate::commands::wait::wait_for_action;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::{OutputFormat, print_output};

pub async fn handle_action_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &ActionCommands,
    output: OutputFormat,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let actions = ActionHandler::new(client.clone());

    match cmd {
        ActionCommands::Get { id } => {
            let action = actions.get(*id).await?;
            print_output(action, output)
        }

        ActionCommands::Wait { id, wait } => {
            wait_for_action(&client, *id, wait, Some(&format!("Waiting for action {id}"))).await
        }
    }
}
