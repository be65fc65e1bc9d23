//! Pricing commands

use hcloudctl_core::api::{PricingHandler, ProjectCosts};

use crate::cli::PricingCommands;
use crate::connection::ConnectionManager;
use crate::error::Result;
use crate::output::{OutputFormat, print_output};

fn print_costs(costs: &ProjectCosts) {
    let currency = &costs.currency;
    println!("Estimated monthly costs (gross):");
    for (label, cost) in [
        ("Servers", &costs.servers),
        ("Volumes", &costs.volumes),
        ("Floating IPs", &costs.floating_ips),
        ("Load balancers", &costs.load_balancers),
    ] {
        println!(
            "  {label:<15} {count:>3}  {price:>10.2} {currency}",
            count = cost.count,
            price = cost.monthly_cost,
        );
    }
    println!("  {:<15} {:>3}  {:>10.2} {currency}", "Total", "", costs.total);
}

pub async fn handle_pricing_command(
    conn_mgr: &ConnectionManager,
    profile: Option<&str>,
    cmd: &PricingCommands,
    output: OutputFormat,
) -> Result<()> {
    let client = conn_mgr.create_client(profile)?;
    let pricing = PricingHandler::new(client);

    match cmd {
        PricingCommands::List => {
            let catalog = pricing.get().await?;
            print_output(catalog, output)
        }
        PricingCommands::Calculate => {
            let costs = pricing.project_costs().await?;
            match output {
                OutputFormat::Json | OutputFormat::Yaml => print_output(costs, output),
                _ => {
                    print_costs(&costs);
                    Ok(())
                }
            }
        }
    }
}
