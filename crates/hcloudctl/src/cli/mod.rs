//! CLI structure and command definitions
//!
//! Defines the command-line interface using clap derive. One subcommand
//! group per resource type; `commands/` holds the implementations.

use clap::{Args, Parser, Subcommand};

pub mod resources;

pub use resources::*;

use crate::output::OutputFormat;

/// Hetzner Cloud management CLI
#[derive(Parser, Debug)]
#[command(name = "hcloudctl")]
#[command(version, about = "Manage Hetzner Cloud servers, volumes, networks and more")]
#[command(long_about = "
Manage Hetzner Cloud projects from the command line.

Mutating operations return a provider-side action; hcloudctl waits for it
to finish by default, showing a spinner, and reports the provider's error
message if it fails.

EXAMPLES:
    # Set up a profile
    hcloudctl profile set prod --api-token <token>

    # Create and start servers
    hcloudctl server create --name web-1 --type cx22 --image debian-12
    hcloudctl server start 42

    # Batch operations over several servers
    hcloudctl batch stop 42 43 44

    # JSON output for scripting
    hcloudctl server list -o json

    # Raw API access
    hcloudctl api get /servers

For more help on a specific command, run:
    hcloudctl <command> --help
")]
pub struct Cli {
    /// Profile to use for this command
    #[arg(long, short, global = true, env = "HCLOUDCTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to alternate configuration file
    #[arg(long, global = true, env = "HCLOUDCTL_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// Enable verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Common flags for operations that wait on provider actions
#[derive(Args, Debug, Clone, Copy)]
pub struct WaitArgs {
    /// Maximum time to wait for the action, in seconds
    #[arg(long, default_value_t = 300)]
    pub wait_timeout: u64,

    /// Seconds between two action status queries
    #[arg(long, default_value_t = 5)]
    pub poll_interval: u64,
}

impl WaitArgs {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.wait_timeout)
    }

    pub fn interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.poll_interval)
    }
}

impl Default for WaitArgs {
    fn default() -> Self {
        Self {
            wait_timeout: 300,
            poll_interval: 5,
        }
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage servers
    #[command(subcommand)]
    Server(ServerCommands),

    /// Manage server snapshots
    #[command(subcommand)]
    Snapshot(SnapshotCommands),

    /// Manage automated server backups
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Manage block storage volumes
    #[command(subcommand)]
    Volume(VolumeCommands),

    /// Manage private networks
    #[command(subcommand)]
    Network(NetworkCommands),

    /// Manage firewalls
    #[command(subcommand)]
    Firewall(FirewallCommands),

    /// Manage load balancers
    #[command(subcommand, name = "load-balancer", visible_alias = "lb")]
    LoadBalancer(LoadBalancerCommands),

    /// Manage floating IPs
    #[command(subcommand, name = "floating-ip")]
    FloatingIp(FloatingIpCommands),

    /// Manage primary IPs
    #[command(subcommand, name = "primary-ip")]
    PrimaryIp(PrimaryIpCommands),

    /// Manage SSH keys
    #[command(subcommand, name = "ssh-key")]
    SshKey(SshKeyCommands),

    /// Browse attachable ISO images
    #[command(subcommand)]
    Iso(IsoCommands),

    /// Browse locations
    #[command(subcommand)]
    Location(LocationCommands),

    /// Browse datacenters
    #[command(subcommand)]
    Datacenter(DatacenterCommands),

    /// Browse server types
    #[command(subcommand, name = "server-type")]
    ServerType(ServerTypeCommands),

    /// Manage disk images (snapshots, backups, system images)
    #[command(subcommand)]
    Image(ImageCommands),

    /// Show server metrics
    #[command(subcommand)]
    Metrics(MetricsCommands),

    /// Show pricing and estimated project costs
    #[command(subcommand)]
    Pricing(PricingCommands),

    /// Run an operation over several servers at once
    #[command(subcommand)]
    Batch(BatchCommands),

    /// Inspect or wait on provider actions
    #[command(subcommand)]
    Action(ActionCommands),

    /// Manage connection profiles
    #[command(subcommand)]
    #[command(after_help = "EXAMPLES:
    hcloudctl profile set prod --api-token <token> --project \"Production\"
    hcloudctl profile list
    hcloudctl profile default prod
")]
    Profile(ProfileCommands),

    /// Raw API access - direct REST endpoint calls
    #[command(after_help = "EXAMPLES:
    hcloudctl api get /servers
    hcloudctl api post /servers/42/actions/poweron
    hcloudctl api post /ssh_keys --data '{\"name\":\"k\",\"public_key\":\"...\"}'
    hcloudctl api post /ssh_keys --data @key.json
")]
    Api {
        /// HTTP method
        #[arg(value_parser = parse_http_method)]
        method: HttpMethod,

        /// API endpoint path (e.g. /servers)
        path: String,

        /// Request body (JSON string or @file)
        #[arg(long)]
        data: Option<String>,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show version information
    Version,
}

/// HTTP methods for raw API access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

fn parse_http_method(s: &str) -> Result<HttpMethod, String> {
    match s.to_lowercase().as_str() {
        "get" => Ok(HttpMethod::Get),
        "post" => Ok(HttpMethod::Post),
        "put" => Ok(HttpMethod::Put),
        "delete" => Ok(HttpMethod::Delete),
        other => Err(format!(
            "unknown method '{other}', expected get, post, put or delete"
        )),
    }
}

/// Supported shells for completion generation
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}
