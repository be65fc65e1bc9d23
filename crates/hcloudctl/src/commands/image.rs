//! Image commands

use hcloudctl_core::api::ImageHandler;
use serde_json::json;

use crate::cli::ImageCommands;
use crate::commands::util::{confirm_action, print_list};
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::{OutputFormat, print_output};

const LIST_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("TYPE", "type"),
    ("NAME", "name"),
    ("DESCRIPTION", "description"),
    ("STATUS", "status"),
    ("SIZE_GB", "image_size"),
    ("CREATED", "created"),
];

pub async fn handle_image_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &ImageCommands,
    output: OutputFormat,
    yes: bool,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let images = ImageHandler::new(client.clone());

    match cmd {
        ImageCommands::List { image_type, server } => {
            let list = images.list(image_type.as_deref(), *server).await?;
            print_list(list, LIST_COLUMNS, output)
        }

        ImageCommands::Get { id } => {
            let image = images.get(*id).await?;
            print_output(image, output)
        }

        ImageCommands::Update { id, description } => {
            let response = images
                .update(*id, &json!({"description": description}))
                .await?;
            print_output(response.get("image").cloned().unwrap_or_default(), output)
        }

        ImageCommands::Delete { id } => {
            confirm_action(&format!("Delete image {id}?"), yes)?;
            images.delete(*id).await?;
            println!("Image {id} deleted");
            Ok(())
        }
    }
}
