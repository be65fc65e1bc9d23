//! Command implementations
//!
//! One module per top-level subcommand group. Each handler receives the
//! connection manager and the parsed subcommand, creates a client, calls
//! the matching core handler, waits on returned actions and prints the
//! result in the requested format.

pub mod action;
pub mod api;
pub mod backup;
pub mod batch;
pub mod firewall;
pub mod floating_ip;
pub mod image;
pub mod load_balancer;
pub mod location;
pub mod metrics;
pub mod network;
pub mod pricing;
pub mod primary_ip;
pub mod profile;
pub mod server;
pub mod snapshot;
pub mod ssh_key;
pub mod util;
pub mod volume;
pub mod wait;
