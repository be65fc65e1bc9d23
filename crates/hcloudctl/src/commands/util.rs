//! Shared helpers for command implementations

use dialoguer::Confirm;
use serde_json::Value;

use crate::error::{CliError, Result};
use crate::output::{OutputFormat, print_output};

/// Print a resource list: raw for JSON/YAML, curated columns otherwise.
pub fn print_list(items: Value, columns: &[(&str, &str)], output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json | OutputFormat::Yaml => print_output(items, output),
        OutputFormat::Auto | OutputFormat::Table => {
            let mut rows = project_columns(&items, columns);
            colorize_status_column(&mut rows);
            print_output(rows, output)
        }
    }
}

/// Colorize any STATUS column in curated table rows.
fn colorize_status_column(rows: &mut Value) {
    for row in rows.as_array_mut().into_iter().flatten() {
        if let Some(Value::String(status)) = row.get("STATUS") {
            let colored = crate::output::colorize_status(status);
            row["STATUS"] = Value::String(colored);
        }
    }
}

/// Ask the user to confirm a destructive operation.
///
/// `--yes` skips the prompt. Declining aborts with [`CliError::Cancelled`].
pub fn confirm_action(prompt: &str, assume_yes: bool) -> Result<()> {
    if assume_yes {
        return Ok(());
    }
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: format!("could not read confirmation: {e}"),
        })?;
    if confirmed {
        Ok(())
    } else {
        Err(CliError::Cancelled)
    }
}

/// Resolve a `--data`-style argument: inline JSON, or `@path` to read a
/// file containing JSON.
pub fn parse_json_arg(input: &str) -> Result<Value> {
    let content = if let Some(path) = input.strip_prefix('@') {
        std::fs::read_to_string(path).map_err(|e| CliError::InvalidInput {
            message: format!("could not read {path}: {e}"),
        })?
    } else {
        input.to_string()
    };
    serde_json::from_str(&content).map_err(|e| CliError::InvalidInput {
        message: format!("invalid JSON: {e}"),
    })
}

/// Resolve a text argument that may be `@path`.
pub fn read_text_arg(input: &str) -> Result<String> {
    if let Some(path) = input.strip_prefix('@') {
        std::fs::read_to_string(path).map_err(|e| CliError::InvalidInput {
            message: format!("could not read {path}: {e}"),
        })
    } else {
        Ok(input.to_string())
    }
}

/// Shape a list of resources into curated table rows: keep only the named
/// top-level or dotted fields, in order.
pub fn project_columns(items: &Value, columns: &[(&str, &str)]) -> Value {
    let rows: Vec<Value> = items
        .as_array()
        .into_iter()
        .flatten()
        .map(|item| {
            let mut row = serde_json::Map::new();
            for (header, field_path) in columns {
                let pointer = format!("/{}", field_path.replace('.', "/"));
                let cell = item.pointer(&pointer).cloned().unwrap_or(Value::Null);
                row.insert((*header).to_string(), cell);
            }
            Value::Object(row)
        })
        .collect();
    Value::Array(rows)
}
