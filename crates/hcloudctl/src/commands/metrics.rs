//! Server metrics commands

use chrono::{Duration, SecondsFormat, Utc};
use hcloudctl_core::api::ServerHandler;

use crate::cli::MetricsCommands;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::{OutputFormat, print_output};

/// Pick a step that keeps the series around 200 samples.
fn step_for(window: Duration) -> u64 {
    let step = window.num_seconds() / 200;
    step.max(60) as u64
}

async fn fetch_metrics(
    servers: &ServerHandler,
    server_id: i64,
    metrics_type: &str,
    window: Duration,
    output: OutputFormat,
) -> Result<()> {
    let end = Utc::now();
    let start = end - window;
    let metrics = servers
        .metrics(
            server_id,
            metrics_type,
            &start.to_rfc3339_opts(SecondsFormat::Secs, true),
            &end.to_rfc3339_opts(SecondsFormat::Secs, true),
            Some(step_for(window)),
        )
        .await?;
    print_output(metrics, output)
}

pub async fn handle_metrics_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &MetricsCommands,
    output: OutputFormat,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let servers = ServerHandler::new(client);

    match cmd {
        MetricsCommands::Cpu { server_id, hours } => {
            fetch_metrics(
                &servers,
                *server_id,
                "cpu",
                Duration::hours(*hours as i64),
                output,
            )
            .await
        }
        MetricsCommands::Disk { server_id, days } => {
            fetch_metrics(
                &servers,
                *server_id,
                "disk",
                Duration::days(*days as i64),
                output,
            )
            .await
        }
        MetricsCommands::Network { server_id, days } => {
            fetch_metrics(
                &servers,
                *server_id,
                "network",
                Duration::days(*days as i64),
                output,
            )
            .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_scales_with_window() {
        assert_eq!(step_for(Duration::hours(1)), 60);
        assert_eq!(step_for(Duration::hours(24)), 432);
        assert_eq!(step_for(Duration::days(7)), 3024);
    }
}
