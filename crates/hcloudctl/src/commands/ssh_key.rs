//! SSH key commands

use hcloudctl_core::api::SshKeyHandler;

use crate::cli::SshKeyCommands;
use crate::commands::util::{confirm_action, print_list, read_text_arg};
use crate::connection::ConnectionManager;
use crate::error::{CliError, Result};
use crate::output::{OutputFormat, print_output};

const LIST_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("NAME", "name"),
    ("FINGERPRINT", "fingerprint"),
    ("CREATED", "created"),
];

pub async fn handle_ssh_key_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &SshKeyCommands,
    output: OutputFormat,
    yes: bool,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let keys = SshKeyHandler::new(client.clone());

    match cmd {
        SshKeyCommands::List => {
            let list = keys.list().await?;
            print_list(list, LIST_COLUMNS, output)
        }

        SshKeyCommands::Get { id } => {
            let key = keys.get(*id).await?;
            print_output(key, output)
        }

        SshKeyCommands::Create {
            name,
            public_key,
            from_file,
        } => {
            let material = match (public_key, from_file) {
                (Some(key), _) => read_text_arg(key)?.trim().to_string(),
                (None, Some(path)) => std::fs::read_to_string(path)?.trim().to_string(),
                (None, None) => {
                    return Err(CliError::InvalidInput {
                        message: "provide --public-key or --from-file".to_string(),
                    });
                }
            };
            let key = keys.create(name, &material, None).await?;
            print_output(key, output)
        }

        SshKeyCommands::Update { id, name } => {
            let key = keys.update(*id, &serde_json::json!({"name": name})).await?;
            print_output(key, output)
        }

        SshKeyCommands::Delete { id } => {
            confirm_action(&format!("Delete SSH key {id}?"), yes)?;
            keys.delete(*id).await?;
            println!("SSH key {id} deleted");
            Ok(())
        }
    }
}
