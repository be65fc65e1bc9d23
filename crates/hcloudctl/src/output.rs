//! Output rendering
//!
//! Every command produces a `serde_json::Value` (or something
//! serializable) and hands it here. JSON and YAML print the value as-is;
//! table output is derived generically from arrays of objects, with the
//! command modules free to pre-shape curated columns first.

use colored::Colorize;
use comfy_table::Table;
use serde::Serialize;
use serde_json::Value;

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, Default)]
pub enum OutputFormat {
    /// Tables for humans, unless the data has no tabular shape
    #[default]
    Auto,
    Json,
    Yaml,
    Table,
}

pub fn print_output<T: Serialize>(data: T, format: OutputFormat) -> Result<()> {
    let json_value = serde_json::to_value(data)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json_value)?);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&json_value).map_err(|e| CliError::Output {
                message: format!("YAML error: {e}"),
            })?;
            println!("{yaml}");
        }
        OutputFormat::Auto | OutputFormat::Table => {
            print_as_table(&json_value);
        }
    }

    Ok(())
}

fn print_as_table(value: &Value) {
    match value {
        Value::Array(arr) if arr.is_empty() => {
            println!("(no results)");
        }
        Value::Array(arr) => {
            let mut table = Table::new();
            if let Value::Object(first) = &arr[0] {
                let headers: Vec<String> = first.keys().cloned().collect();
                table.set_header(&headers);
                for item in arr {
                    if let Value::Object(obj) = item {
                        let row: Vec<String> = headers
                            .iter()
                            .map(|h| format_cell(obj.get(h).unwrap_or(&Value::Null)))
                            .collect();
                        table.add_row(row);
                    }
                }
            } else {
                table.set_header(vec!["Value"]);
                for item in arr {
                    table.add_row(vec![format_cell(item)]);
                }
            }
            println!("{table}");
        }
        Value::Object(obj) => {
            let mut table = Table::new();
            table.set_header(vec!["Key", "Value"]);
            for (key, val) in obj {
                table.add_row(vec![key.clone(), format_cell(val)]);
            }
            println!("{table}");
        }
        _ => {
            println!("{}", format_cell(value));
        }
    }
}

fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

/// Color a provider status string for terminal output.
pub fn colorize_status(status: &str) -> String {
    match status {
        "running" | "available" | "success" => status.green().to_string(),
        "error" | "unavailable" => status.red().to_string(),
        "initializing" | "starting" | "stopping" | "migrating" | "rebuilding" | "creating"
        | "attaching" | "detaching" => status.yellow().to_string(),
        "off" | "deleting" => status.dimmed().to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cells_summarize_nested_values() {
        assert_eq!(format_cell(&json!(null)), "-");
        assert_eq!(format_cell(&json!("web-1")), "web-1");
        assert_eq!(format_cell(&json!([1, 2, 3])), "[3 items]");
        assert_eq!(format_cell(&json!({"a": 1})), "{1 fields}");
    }

    #[test]
    fn print_output_accepts_all_formats() {
        let data = json!([{"id": 1, "name": "web-1"}]);
        for format in [
            OutputFormat::Auto,
            OutputFormat::Json,
            OutputFormat::Yaml,
            OutputFormat::Table,
        ] {
            print_output(&data, format).unwrap();
        }
    }
}
