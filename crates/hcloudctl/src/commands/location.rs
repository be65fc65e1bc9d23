//! Catalog commands: locations, datacenters, server types and ISOs

use hcloudctl_core::api::{IsoHandler, LocationHandler};

use crate::cli::{DatacenterCommands, IsoCommands, LocationCommands, ServerTypeCommands};
use crate::commands::util::print_list;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::{OutputFormat, print_output};

const LOCATION_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("NAME", "name"),
    ("CITY", "city"),
    ("COUNTRY", "country"),
    ("NETWORK_ZONE", "network_zone"),
];

const DATACENTER_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("NAME", "name"),
    ("DESCRIPTION", "description"),
    ("LOCATION", "location.name"),
];

const SERVER_TYPE_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("NAME", "name"),
    ("CORES", "cores"),
    ("MEMORY_GB", "memory"),
    ("DISK_GB", "disk"),
    ("CPU", "cpu_type"),
];

const ISO_COLUMNS: &[(&str, &str)] = &[
    ("ID", "id"),
    ("NAME", "name"),
    ("DESCRIPTION", "description"),
    ("TYPE", "type"),
];

pub async fn handle_location_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &LocationCommands,
    output: OutputFormat,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let locations = LocationHandler::new(client);

    match cmd {
        LocationCommands::List => {
            let list = locations.list().await?;
            print_list(list, LOCATION_COLUMNS, output)
        }
        LocationCommands::Get { id } => {
            let location = locations.get(*id).await?;
            print_output(location, output)
        }
    }
}

pub async fn handle_datacenter_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &DatacenterCommands,
    output: OutputFormat,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let locations = LocationHandler::new(client);

    match cmd {
        DatacenterCommands::List => {
            let list = locations.list_datacenters().await?;
            print_list(list, DATACENTER_COLUMNS, output)
        }
        DatacenterCommands::Get { id } => {
            let datacenter = locations.get_datacenter(*id).await?;
            print_output(datacenter, output)
        }
    }
}

pub async fn handle_server_type_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &ServerTypeCommands,
    output: OutputFormat,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let locations = LocationHandler::new(client);

    match cmd {
        ServerTypeCommands::List => {
            let list = locations.list_server_types().await?;
            print_list(list, SERVER_TYPE_COLUMNS, output)
        }
        ServerTypeCommands::Get { id } => {
            let server_type = locations.get_server_type(*id).await?;
            print_output(server_type, output)
        }
    }
}

pub async fn handle_iso_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &IsoCommands,
    output: OutputFormat,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let isos = IsoHandler::new(client);

    match cmd {
        IsoCommands::List => {
            let list = isos.list().await?;
            print_list(list, ISO_COLUMNS, output)
        }
        IsoCommands::Get { id } => {
            let iso = isos.get(*id).await?;
            print_output(iso, output)
        }
    }
}
