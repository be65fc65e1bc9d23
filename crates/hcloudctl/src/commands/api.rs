//! Raw API access

use serde_json::Value;

use crate::cli::HttpMethod;
use crate::commands::util::parse_json_arg;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::{OutputFormat, print_output};

pub async fn handle_api_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    method: HttpMethod,
    path: &str,
    data: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let path = path.trim_start_matches('/');
    let body = data.map(parse_json_arg).transpose()?.unwrap_or(Value::Null);

    let response = match method {
        HttpMethod::Get => client.get(path).await?,
        HttpMethod::Post => client.post(path, &body).await?,
        HttpMethod::Put => client.put(path, &body).await?,
        HttpMethod::Delete => client.delete(path).await?,
    };

    if response.is_null() {
        // 204 or empty body; nothing to print
        return Ok(());
    }
    print_output(response, output)
}
