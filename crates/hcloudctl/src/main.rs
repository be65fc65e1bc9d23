use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};
use hcloudctl_core::Config;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod output;

use cli::{Cli, Commands};
use connection::ConnectionManager;
use error::CliError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load configuration from the explicit path or the default location
    let (config, config_path) = if let Some(config_file) = &cli.config_file {
        let path = std::path::PathBuf::from(config_file);
        debug!("Loading config from explicit path: {:?}", path);
        let config = Config::load_from_path(&path)?;
        (config, Some(path))
    } else {
        debug!("Loading config from default location");
        (Config::load()?, None)
    };
    let mut conn_mgr = ConnectionManager::with_config_path(config, config_path);

    if let Err(e) = execute_command(&cli, &mut conn_mgr).await {
        eprintln!("{}", e.display_with_suggestions());
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    // RUST_LOG wins over the verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "hcloudctl=warn,hcloudctl_core=warn",
            1 => "hcloudctl=info,hcloudctl_core=info",
            2 => "hcloudctl=debug,hcloudctl_core=debug",
            _ => "hcloudctl=trace,hcloudctl_core=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

async fn execute_command(cli: &Cli, conn_mgr: &mut ConnectionManager) -> Result<(), CliError> {
    let profile = cli.profile.as_deref();
    let output = cli.output;
    let yes = cli.yes;

    let start = std::time::Instant::now();
    let result = match &cli.command {
        Commands::Server(cmd) => {
            commands::server::handle_server_command(conn_mgr, profile, cmd, output, yes).await
        }
        Commands::Snapshot(cmd) => {
            commands::snapshot::handle_snapshot_command(conn_mgr, profile, cmd, output, yes).await
        }
        Commands::Backup(cmd) => {
            commands::backup::handle_backup_command(conn_mgr, profile, cmd, output, yes).await
        }
        Commands::Volume(cmd) => {
            commands::volume::handle_volume_command(conn_mgr, profile, cmd, output, yes).await
        }
        Commands::Network(cmd) => {
            commands::network::handle_network_command(conn_mgr, profile, cmd, output, yes).await
        }
        Commands::Firewall(cmd) => {
            commands::firewall::handle_firewall_command(conn_mgr, profile, cmd, output, yes).await
        }
        Commands::LoadBalancer(cmd) => {
            commands::load_balancer::handle_load_balancer_command(
                conn_mgr, profile, cmd, output, yes,
            )
            .await
        }
        Commands::FloatingIp(cmd) => {
            commands::floating_ip::handle_floating_ip_command(conn_mgr, profile, cmd, output, yes)
                .await
        }
        Commands::PrimaryIp(cmd) => {
            commands::primary_ip::handle_primary_ip_command(conn_mgr, profile, cmd, output, yes)
                .await
        }
        Commands::SshKey(cmd) => {
            commands::ssh_key::handle_ssh_key_command(conn_mgr, profile, cmd, output, yes).await
        }
        Commands::Iso(cmd) => {
            commands::location::handle_iso_command(conn_mgr, profile, cmd, output).await
        }
        Commands::Location(cmd) => {
            commands::location::handle_location_command(conn_mgr, profile, cmd, output).await
        }
        Commands::Datacenter(cmd) => {
            commands::location::handle_datacenter_command(conn_mgr, profile, cmd, output).await
        }
        Commands::ServerType(cmd) => {
            commands::location::handle_server_type_command(conn_mgr, profile, cmd, output).await
        }
        Commands::Image(cmd) => {
            commands::image::handle_image_command(conn_mgr, profile, cmd, output, yes).await
        }
        Commands::Metrics(cmd) => {
            commands::metrics::handle_metrics_command(conn_mgr, profile, cmd, output).await
        }
        Commands::Pricing(cmd) => {
            commands::pricing::handle_pricing_command(conn_mgr, profile, cmd, output).await
        }
        Commands::Batch(cmd) => {
            commands::batch::handle_batch_command(conn_mgr, profile, cmd, yes).await
        }
        Commands::Action(cmd) => {
            commands::action::handle_action_command(conn_mgr, profile, cmd, output).await
        }
        Commands::Profile(cmd) => {
            commands::profile::handle_profile_command(conn_mgr, cmd, output, yes).await
        }
        Commands::Api { method, path, data } => {
            info!("API call: {:?} {}", method, path);
            commands::api::handle_api_command(conn_mgr, profile, *method, path, data.as_deref(), output)
                .await
        }
        Commands::Completions { shell } => {
            generate_completions(*shell);
            Ok(())
        }
        Commands::Version => {
            match output {
                output::OutputFormat::Json | output::OutputFormat::Yaml => {
                    let data = serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "name": env!("CARGO_PKG_NAME"),
                    });
                    output::print_output(data, output)?;
                }
                _ => println!("hcloudctl {}", env!("CARGO_PKG_VERSION")),
            }
            Ok(())
        }
    };

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!("Command completed successfully in {:?}", duration),
        Err(e) => error!("Command failed after {:?}: {}", duration, e),
    }

    result
}

fn generate_completions(shell: cli::Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    match shell {
        cli::Shell::Bash => generate(shells::Bash, &mut cmd, &name, &mut std::io::stdout()),
        cli::Shell::Zsh => generate(shells::Zsh, &mut cmd, &name, &mut std::io::stdout()),
        cli::Shell::Fish => generate(shells::Fish, &mut cmd, &name, &mut std::io::stdout()),
        cli::Shell::PowerShell => {
            generate(shells::PowerShell, &mut cmd, &name, &mut std::io::stdout())
        }
        cli::Shell::Elvish => generate(shells::Elvish, &mut cmd, &name, &mut std::io::stdout()),
    }
}
