//! Resource handlers for the provider REST API
//!
//! One module per resource type, each exposing a thin handler struct with
//! one method per REST call. Payloads stay raw [`serde_json::Value`]; the
//! CLI layer decides which fields to render. Mutating calls return the
//! full response envelope so callers can pick out the `action` id(s) to
//! wait on.

pub mod actions;
pub mod firewalls;
pub mod floating_ips;
pub mod images;
pub mod isos;
pub mod load_balancers;
pub mod locations;
pub mod networks;
pub mod pricing;
pub mod primary_ips;
pub mod servers;
pub mod ssh_keys;
pub mod volumes;

pub use actions::{Action, ActionHandler, ActionStatus};
pub use firewalls::FirewallHandler;
pub use floating_ips::FloatingIpHandler;
pub use images::ImageHandler;
pub use isos::IsoHandler;
pub use load_balancers::LoadBalancerHandler;
pub use locations::LocationHandler;
pub use networks::NetworkHandler;
pub use pricing::{CategoryCost, PricingHandler, ProjectCosts};
pub use primary_ips::PrimaryIpHandler;
pub use servers::ServerHandler;
pub use ssh_keys::SshKeyHandler;
pub use volumes::VolumeHandler;
