//! Profile management commands

use hcloudctl_core::{Config, DEFAULT_API_URL, Profile};
use serde_json::{Value, json};

use crate::cli::ProfileCommands;
use crate::commands::util::{confirm_action, print_list};
use crate::connection::ConnectionManager;
use crate::error::{CliError, Result};
use crate::output::{OutputFormat, print_output};

const LIST_COLUMNS: &[(&str, &str)] = &[
    ("NAME", "name"),
    ("PROJECT", "project"),
    ("API_URL", "api_url"),
    ("DEFAULT", "default"),
];

fn redacted(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "****".to_string()
    }
}

fn profile_row(name: &str, profile: &Profile, is_default: bool) -> Value {
    json!({
        "name": name,
        "project": profile.project,
        "api_url": profile.api_url.as_deref().unwrap_or(DEFAULT_API_URL),
        "default": if is_default { "*" } else { "" },
    })
}

pub async fn handle_profile_command(
    conn_mgr: &mut ConnectionManager,
    cmd: &ProfileCommands,
    output: OutputFormat,
    yes: bool,
) -> Result<()> {
    match cmd {
        ProfileCommands::List => {
            let default = conn_mgr.config.default_profile.clone();
            let rows: Vec<Value> = conn_mgr
                .config
                .list_profiles()
                .into_iter()
                .map(|(name, profile)| {
                    profile_row(name, profile, default.as_deref() == Some(name))
                })
                .collect();
            print_list(Value::Array(rows), LIST_COLUMNS, output)
        }

        ProfileCommands::Show { name } => {
            let profile = conn_mgr
                .config
                .profiles
                .get(name)
                .ok_or_else(|| CliError::ProfileNotFound { name: name.clone() })?;
            let detail = json!({
                "name": name,
                "api_token": redacted(&profile.api_token),
                "project": profile.project,
                "api_url": profile.api_url.as_deref().unwrap_or(DEFAULT_API_URL),
                "default": conn_mgr.config.default_profile.as_deref() == Some(name.as_str()),
            });
            print_output(detail, output)
        }

        ProfileCommands::Set {
            name,
            api_token,
            project,
            api_url,
        } => {
            conn_mgr.config.set_profile(
                name.clone(),
                Profile {
                    api_token: api_token.clone(),
                    project: project.clone(),
                    api_url: api_url.clone(),
                },
            );
            // First profile becomes the default automatically
            if conn_mgr.config.profiles.len() == 1 {
                conn_mgr.config.default_profile = Some(name.clone());
            }
            conn_mgr.save_config()?;
            println!("Profile '{name}' saved");
            Ok(())
        }

        ProfileCommands::Remove { name } => {
            confirm_action(&format!("Remove profile '{name}'?"), yes)?;
            if conn_mgr.config.remove_profile(name).is_none() {
                return Err(CliError::ProfileNotFound { name: name.clone() });
            }
            conn_mgr.save_config()?;
            println!("Profile '{name}' removed");
            Ok(())
        }

        ProfileCommands::Default { name } => {
            if !conn_mgr.config.profiles.contains_key(name) {
                return Err(CliError::ProfileNotFound { name: name.clone() });
            }
            conn_mgr.config.default_profile = Some(name.clone());
            conn_mgr.save_config()?;
            println!("Default profile set to '{name}'");
            Ok(())
        }

        ProfileCommands::Path => {
            let path = match &conn_mgr.config_path {
                Some(path) => path.clone(),
                None => Config::config_path()?,
            };
            println!("{}", path.display());
            Ok(())
        }
    }
}
