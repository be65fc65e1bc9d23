//! Pricing catalog and project cost estimation
//!
//! The cost estimate cross-references the live resource inventory with
//! the pricing catalog to produce per-category monthly gross costs.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::client::{CloudClient, take_field};
use crate::error::Result;

/// Handler for `/pricing` plus the derived cost estimate
#[derive(Debug, Clone)]
pub struct PricingHandler {
    client: CloudClient,
}

/// Count and monthly gross cost for one resource category
#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryCost {
    pub count: usize,
    pub monthly_cost: f64,
}

/// Estimated monthly costs for the whole project
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectCosts {
    pub servers: CategoryCost,
    pub volumes: CategoryCost,
    pub floating_ips: CategoryCost,
    pub load_balancers: CategoryCost,
    pub total: f64,
    pub currency: String,
}

impl PricingHandler {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    /// Fetch the full pricing catalog
    pub async fn get(&self) -> Result<Value> {
        let resp = self.client.get("pricing").await?;
        Ok(take_field(resp, "pricing"))
    }

    /// Estimate the project's monthly costs from its current inventory.
    ///
    /// Servers and load balancers are priced by the type they run as;
    /// volumes by size in GB; floating IPs flat per address. Resources
    /// whose type is missing from the catalog count toward the inventory
    /// but not the cost.
    pub async fn project_costs(&self) -> Result<ProjectCosts> {
        let pricing = self.get().await?;
        let mut costs = ProjectCosts {
            currency: pricing
                .get("currency")
                .and_then(Value::as_str)
                .unwrap_or("EUR")
                .to_string(),
            ..Default::default()
        };

        let server_prices = price_map_by_id(&pricing, "server_types");
        let servers = take_field(self.client.get("servers").await?, "servers");
        for server in servers.as_array().into_iter().flatten() {
            costs.servers.count += 1;
            if let Some(type_id) = server
                .pointer("/server_type/id")
                .and_then(Value::as_i64)
            {
                if let Some(price) = server_prices.get(&type_id) {
                    costs.servers.monthly_cost += price;
                } else {
                    debug!(type_id, "server type missing from pricing catalog");
                }
            }
        }

        let per_gb = first_monthly_price(pricing.pointer("/volume")).unwrap_or(0.0);
        let volumes = take_field(self.client.get("volumes").await?, "volumes");
        for volume in volumes.as_array().into_iter().flatten() {
            costs.volumes.count += 1;
            let size_gb = volume.get("size").and_then(Value::as_f64).unwrap_or(0.0);
            costs.volumes.monthly_cost += size_gb * per_gb;
        }

        let per_ip = first_monthly_price(pricing.pointer("/floating_ip")).unwrap_or(0.0);
        let ips = take_field(self.client.get("floating_ips").await?, "floating_ips");
        let ip_count = ips.as_array().map(Vec::len).unwrap_or(0);
        costs.floating_ips.count = ip_count;
        costs.floating_ips.monthly_cost = ip_count as f64 * per_ip;

        let lb_prices = price_map_by_id(&pricing, "load_balancer_types");
        let lbs = take_field(self.client.get("load_balancers").await?, "load_balancers");
        for lb in lbs.as_array().into_iter().flatten() {
            costs.load_balancers.count += 1;
            if let Some(type_id) = lb
                .pointer("/load_balancer_type/id")
                .and_then(Value::as_i64)
            {
                if let Some(price) = lb_prices.get(&type_id) {
                    costs.load_balancers.monthly_cost += price;
                }
            }
        }

        costs.total = costs.servers.monthly_cost
            + costs.volumes.monthly_cost
            + costs.floating_ips.monthly_cost
            + costs.load_balancers.monthly_cost;

        Ok(costs)
    }
}

/// Index typed prices (server types, load balancer types) by their id.
fn price_map_by_id(pricing: &Value, key: &str) -> HashMap<i64, f64> {
    let mut map = HashMap::new();
    for entry in pricing
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        let Some(id) = entry.get("id").and_then(Value::as_i64) else {
            continue;
        };
        if let Some(price) = first_monthly_price(Some(entry)) {
            map.insert(id, price);
        }
    }
    map
}

/// Pull the gross monthly price out of the first `prices` entry. The
/// catalog writes prices as strings.
fn first_monthly_price(entry: Option<&Value>) -> Option<f64> {
    let monthly = entry?
        .get("prices")?
        .as_array()?
        .first()?
        .get("price_monthly")?;
    match monthly.get("gross") {
        Some(Value::String(s)) => s.parse().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => monthly.as_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn catalog() -> Value {
        json!({
            "pricing": {
                "currency": "EUR",
                "server_types": [
                    {"id": 1, "prices": [{"price_monthly": {"gross": "4.90"}}]},
                    {"id": 2, "prices": [{"price_monthly": {"gross": "9.80"}}]},
                ],
                "load_balancer_types": [
                    {"id": 1, "prices": [{"price_monthly": {"gross": "6.40"}}]},
                ],
                "volume": {"prices": [{"price_monthly": {"gross": "0.05"}}]},
                "floating_ip": {"prices": [{"price_monthly": {"gross": "1.19"}}]},
            }
        })
    }

    async fn mount_inventory(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/pricing"))
            .respond_with(ResponseTemplate::new(200).set_body_json(catalog()))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/servers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "servers": [
                    {"id": 10, "server_type": {"id": 1}},
                    {"id": 11, "server_type": {"id": 2}},
                ]
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/volumes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "volumes": [{"id": 20, "size": 100}]
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/floating_ips"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "floating_ips": [{"id": 30}, {"id": 31}]
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/load_balancers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "load_balancers": [{"id": 40, "load_balancer_type": {"id": 1}}]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn project_costs_sum_per_category() {
        let server = MockServer::start().await;
        mount_inventory(&server).await;

        let client = CloudClient::builder()
            .api_token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap();
        let costs = PricingHandler::new(client).project_costs().await.unwrap();

        assert_eq!(costs.servers.count, 2);
        assert!((costs.servers.monthly_cost - 14.70).abs() < 1e-9);
        assert_eq!(costs.volumes.count, 1);
        assert!((costs.volumes.monthly_cost - 5.0).abs() < 1e-9);
        assert_eq!(costs.floating_ips.count, 2);
        assert!((costs.floating_ips.monthly_cost - 2.38).abs() < 1e-9);
        assert_eq!(costs.load_balancers.count, 1);
        assert!((costs.total - (14.70 + 5.0 + 2.38 + 6.40)).abs() < 1e-9);
        assert_eq!(costs.currency, "EUR");
    }

    #[test]
    fn price_parsing_accepts_string_and_number() {
        let entry = json!({"prices": [{"price_monthly": {"gross": "4.90"}}]});
        assert_eq!(first_monthly_price(Some(&entry)), Some(4.90));

        let entry = json!({"prices": [{"price_monthly": {"gross": 4.90}}]});
        assert_eq!(first_monthly_price(Some(&entry)), Some(4.90));

        let entry = json!({"prices": []});
        assert_eq!(first_monthly_price(Some(&entry)), None);
    }
}
