//! Per-resource subcommand definitions

use clap::Subcommand;

use super::WaitArgs;

#[derive(Subcommand, Debug)]
pub enum ServerCommands {
    /// List all servers
    List,
    /// Show one server
    Get { id: i64 },
    /// Create a server
    Create {
        /// Server name
        #[arg(long)]
        name: String,
        /// Server type, e.g. cx22
        #[arg(long = "type")]
        server_type: String,
        /// Image name or id, e.g. debian-12
        #[arg(long)]
        image: String,
        /// Location, e.g. fsn1
        #[arg(long)]
        location: Option<String>,
        /// SSH key names or ids to provision (repeatable)
        #[arg(long = "ssh-key")]
        ssh_keys: Vec<String>,
        /// Cloud-init user data (inline or @file)
        #[arg(long)]
        user_data: Option<String>,
        /// Start the server after creation
        #[arg(long, default_value_t = true)]
        start_after_create: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Power a server on
    Start {
        id: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Shut a server down (ACPI), or cut power with --force
    Stop {
        id: i64,
        /// Hard power off instead of graceful shutdown
        #[arg(long)]
        force: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Reboot a server
    Reboot {
        id: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Delete a server
    Delete {
        id: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Rename a server
    Rename {
        id: i64,
        /// New name
        name: String,
    },
    /// Change the server type
    Resize {
        id: i64,
        /// Target server type, e.g. cx32
        #[arg(long = "type")]
        server_type: String,
        /// Also grow the disk (cannot be undone)
        #[arg(long)]
        upgrade_disk: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Rebuild a server from an image, wiping its disk
    Rebuild {
        id: i64,
        /// Image name or id to rebuild from
        #[arg(long)]
        image: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Enable rescue mode
    Rescue {
        id: i64,
        /// Rescue system type
        #[arg(long = "type", default_value = "linux64")]
        rescue_type: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Reset the root password
    #[command(name = "reset-password")]
    ResetPassword { id: i64 },
    /// Attach an ISO image
    #[command(name = "attach-iso")]
    AttachIso {
        id: i64,
        /// ISO name or id
        iso: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Detach the current ISO image
    #[command(name = "detach-iso")]
    DetachIso {
        id: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum SnapshotCommands {
    /// List snapshots, optionally for one server
    List {
        /// Only snapshots created from this server
        #[arg(long)]
        server: Option<i64>,
    },
    /// Snapshot a server's disk
    Create {
        /// Server to snapshot
        server_id: i64,
        /// Snapshot description
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Delete a snapshot
    Delete { id: i64 },
    /// Rebuild a server from a snapshot
    Rebuild {
        /// Server to rebuild
        server_id: i64,
        /// Snapshot to rebuild from
        snapshot_id: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// List backups, optionally for one server
    List {
        /// Only backups of this server
        #[arg(long)]
        server: Option<i64>,
    },
    /// Enable automated backups for a server
    Enable {
        server_id: i64,
        /// Backup window, e.g. 22-02 (UTC)
        #[arg(long)]
        window: Option<String>,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Disable automated backups for a server
    Disable {
        server_id: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Delete a backup
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum VolumeCommands {
    /// List all volumes
    List,
    /// Show one volume
    Get { id: i64 },
    /// Create a volume
    Create {
        #[arg(long)]
        name: String,
        /// Size in GB
        #[arg(long)]
        size: i64,
        /// Location to create in (exclusive with --server)
        #[arg(long, conflicts_with = "server")]
        location: Option<String>,
        /// Server to attach to at creation
        #[arg(long)]
        server: Option<i64>,
        /// Filesystem to format with, e.g. ext4
        #[arg(long)]
        format: Option<String>,
        /// Mount automatically on the attached server
        #[arg(long, requires = "server")]
        automount: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Delete a volume
    Delete { id: i64 },
    /// Attach a volume to a server
    Attach {
        id: i64,
        /// Server to attach to
        server: i64,
        #[arg(long)]
        automount: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Detach a volume from its server
    Detach {
        id: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Grow a volume (sizes only increase)
    Resize {
        id: i64,
        /// New size in GB
        #[arg(long)]
        size: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Enable or disable delete protection
    Protect {
        id: i64,
        /// Disable protection instead of enabling it
        #[arg(long)]
        disable: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum NetworkCommands {
    /// List all networks
    List,
    /// Show one network
    Get { id: i64 },
    /// Create a network
    Create {
        #[arg(long)]
        name: String,
        /// Network IP range in CIDR notation, e.g. 10.0.0.0/16
        #[arg(long)]
        ip_range: String,
        /// Also create a subnet with this range
        #[arg(long)]
        subnet: Option<String>,
        /// Network zone for the subnet, e.g. eu-central
        #[arg(long, default_value = "eu-central", requires = "subnet")]
        zone: String,
    },
    /// Rename a network
    Update {
        id: i64,
        #[arg(long)]
        name: String,
    },
    /// Delete a network
    Delete { id: i64 },
    /// Attach a server to a network
    Attach {
        id: i64,
        /// Server to attach
        server: i64,
        /// Fixed private IP to use
        #[arg(long)]
        ip: Option<String>,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Detach a server from a network
    Detach {
        id: i64,
        /// Server to detach
        server: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Add a subnet to a network
    #[command(name = "add-subnet")]
    AddSubnet {
        id: i64,
        /// Subnet range in CIDR notation
        #[arg(long)]
        ip_range: String,
        /// Network zone, e.g. eu-central
        #[arg(long, default_value = "eu-central")]
        zone: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Remove a subnet from a network
    #[command(name = "delete-subnet")]
    DeleteSubnet {
        id: i64,
        /// Subnet range to remove
        #[arg(long)]
        ip_range: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Enable or disable delete protection
    Protect {
        id: i64,
        #[arg(long)]
        disable: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum FirewallCommands {
    /// List all firewalls
    List,
    /// Show one firewall
    Get { id: i64 },
    /// Create a firewall
    Create {
        #[arg(long)]
        name: String,
        /// Initial rules as JSON array (inline or @file)
        #[arg(long)]
        rules: Option<String>,
    },
    /// Rename a firewall
    Update {
        id: i64,
        #[arg(long)]
        name: String,
    },
    /// Delete a firewall
    Delete { id: i64 },
    /// Replace the complete rule set
    #[command(name = "set-rules")]
    SetRules {
        id: i64,
        /// Rules as JSON array (inline or @file); an empty array clears
        rules: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Apply the firewall to a server
    Apply {
        id: i64,
        /// Server to apply to
        server: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Remove the firewall from a server
    Remove {
        id: i64,
        /// Server to remove from
        server: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum LoadBalancerCommands {
    /// List all load balancers
    List,
    /// Show one load balancer
    Get { id: i64 },
    /// List available load balancer types
    Types,
    /// Create a load balancer
    Create {
        #[arg(long)]
        name: String,
        /// Load balancer type, e.g. lb11
        #[arg(long = "type", default_value = "lb11")]
        lb_type: String,
        #[arg(long)]
        location: Option<String>,
        /// Network zone (exclusive with --location)
        #[arg(long, conflicts_with = "location")]
        network_zone: Option<String>,
        /// Balancing algorithm: round_robin or least_connections
        #[arg(long, default_value = "round_robin")]
        algorithm: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Delete a load balancer
    Delete { id: i64 },
    /// Add a server target
    #[command(name = "add-target")]
    AddTarget {
        id: i64,
        /// Server to add
        server: i64,
        /// Route traffic over the private network
        #[arg(long)]
        use_private_ip: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Remove a server target
    #[command(name = "remove-target")]
    RemoveTarget {
        id: i64,
        /// Server to remove
        server: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Add a service (JSON definition, inline or @file)
    #[command(name = "add-service")]
    AddService {
        id: i64,
        service: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Update a service (JSON definition, inline or @file)
    #[command(name = "update-service")]
    UpdateService {
        id: i64,
        service: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Delete the service on a listen port
    #[command(name = "delete-service")]
    DeleteService {
        id: i64,
        /// Listen port of the service
        listen_port: u16,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Change the balancing algorithm
    Algorithm {
        id: i64,
        /// round_robin or least_connections
        algorithm: String,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum FloatingIpCommands {
    /// List all floating IPs
    List,
    /// Show one floating IP
    Get { id: i64 },
    /// Create a floating IP
    Create {
        /// Address family: ipv4 or ipv6
        #[arg(long = "type", default_value = "ipv4")]
        ip_type: String,
        /// Home location (exclusive with --server)
        #[arg(long, conflicts_with = "server")]
        home_location: Option<String>,
        /// Assign to this server right away
        #[arg(long)]
        server: Option<i64>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Update description or name
    Update {
        id: i64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a floating IP
    Delete { id: i64 },
    /// Assign to a server
    Assign {
        id: i64,
        server: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Unassign from its server
    Unassign {
        id: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Set the reverse DNS entry for an address
    #[command(name = "set-rdns")]
    SetRdns {
        id: i64,
        /// Address to set the PTR record for
        #[arg(long)]
        ip: String,
        /// PTR record; omit to reset to default
        #[arg(long)]
        dns_ptr: Option<String>,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Enable or disable delete protection
    Protect {
        id: i64,
        #[arg(long)]
        disable: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum PrimaryIpCommands {
    /// List all primary IPs
    List,
    /// Show one primary IP
    Get { id: i64 },
    /// Create a primary IP
    Create {
        #[arg(long)]
        name: String,
        /// Address family: ipv4 or ipv6
        #[arg(long = "type", default_value = "ipv4")]
        ip_type: String,
        /// Datacenter to create in (exclusive with --server)
        #[arg(long, conflicts_with = "server")]
        datacenter: Option<String>,
        /// Assign to this server right away
        #[arg(long)]
        server: Option<i64>,
    },
    /// Rename a primary IP
    Update {
        id: i64,
        #[arg(long)]
        name: String,
    },
    /// Delete a primary IP
    Delete { id: i64 },
    /// Assign to a server (server must be powered off)
    Assign {
        id: i64,
        server: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Unassign from its server
    Unassign {
        id: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Set the reverse DNS entry for an address
    #[command(name = "set-rdns")]
    SetRdns {
        id: i64,
        #[arg(long)]
        ip: String,
        #[arg(long)]
        dns_ptr: Option<String>,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Enable or disable delete protection
    Protect {
        id: i64,
        #[arg(long)]
        disable: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum SshKeyCommands {
    /// List all SSH keys
    List,
    /// Show one SSH key
    Get { id: i64 },
    /// Register a public key
    Create {
        #[arg(long)]
        name: String,
        /// Public key material (exclusive with --from-file)
        #[arg(long, conflicts_with = "from_file")]
        public_key: Option<String>,
        /// Read the public key from a file, e.g. ~/.ssh/id_ed25519.pub
        #[arg(long)]
        from_file: Option<std::path::PathBuf>,
    },
    /// Rename a key
    Update {
        id: i64,
        #[arg(long)]
        name: String,
    },
    /// Delete a key
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum IsoCommands {
    /// List attachable ISO images
    List,
    /// Show one ISO image
    Get { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum LocationCommands {
    /// List locations
    List,
    /// Show one location
    Get { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum DatacenterCommands {
    /// List datacenters
    List,
    /// Show one datacenter
    Get { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ServerTypeCommands {
    /// List server types
    List,
    /// Show one server type
    Get { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ImageCommands {
    /// List images
    List {
        /// Filter by type: system, snapshot, backup, app
        #[arg(long = "type")]
        image_type: Option<String>,
        /// Only images bound to this server
        #[arg(long)]
        server: Option<i64>,
    },
    /// Show one image
    Get { id: i64 },
    /// Update an image description
    Update {
        id: i64,
        #[arg(long)]
        description: String,
    },
    /// Delete an image
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum MetricsCommands {
    /// CPU usage over a recent window
    Cpu {
        server_id: i64,
        /// Window length in hours
        #[arg(long, default_value_t = 24)]
        hours: u64,
    },
    /// Disk throughput and IOPS over a recent window
    Disk {
        server_id: i64,
        /// Window length in days
        #[arg(long, default_value_t = 1)]
        days: u64,
    },
    /// Network throughput over a recent window
    Network {
        server_id: i64,
        /// Window length in days
        #[arg(long, default_value_t = 7)]
        days: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum PricingCommands {
    /// Show the raw pricing catalog
    List,
    /// Estimate monthly costs for the current project
    Calculate,
}

#[derive(Subcommand, Debug)]
pub enum BatchCommands {
    /// Power several servers on
    Start {
        /// Server ids
        #[arg(required = true)]
        ids: Vec<i64>,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Shut several servers down
    Stop {
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Hard power off instead of graceful shutdown
        #[arg(long)]
        force: bool,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Delete several servers
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
        #[command(flatten)]
        wait: WaitArgs,
    },
    /// Snapshot several servers
    Snapshot {
        #[arg(required = true)]
        ids: Vec<i64>,
        /// Description prefix for the snapshots
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum ActionCommands {
    /// Show one action
    Get { id: i64 },
    /// Wait for an action to reach a terminal status
    Wait {
        id: i64,
        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List configured profiles
    List,
    /// Show one profile (token redacted)
    Show { name: String },
    /// Create or update a profile
    Set {
        name: String,
        /// API token for the project
        #[arg(long)]
        api_token: String,
        /// Human-readable project label
        #[arg(long)]
        project: Option<String>,
        /// Override the API base URL
        #[arg(long)]
        api_url: Option<String>,
    },
    /// Remove a profile
    Remove { name: String },
    /// Set the default profile
    Default { name: String },
    /// Print the config file path
    Path,
}
