//! Private network resource handler
//!
//! Attaching and detaching servers lives on the server actions endpoint;
//! this handler covers the network object and its subnets.

use serde_json::{Value, json};

use crate::client::{CloudClient, take_field};
use crate::error::Result;

/// Handler for `/networks` endpoints
#[derive(Debug, Clone)]
pub struct NetworkHandler {
    client: CloudClient,
}

impl NetworkHandler {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Value> {
        let resp = self.client.get("networks").await?;
        Ok(take_field(resp, "networks"))
    }

    pub async fn get(&self, network_id: i64) -> Result<Value> {
        let resp = self.client.get(&format!("networks/{network_id}")).await?;
        Ok(take_field(resp, "network"))
    }

    /// Create a network with an IP range and optional initial subnets
    pub async fn create(&self, body: &Value) -> Result<Value> {
        self.client.post("networks", body).await
    }

    pub async fn update(&self, network_id: i64, body: &Value) -> Result<Value> {
        self.client
            .put(&format!("networks/{network_id}"), body)
            .await
    }

    pub async fn delete(&self, network_id: i64) -> Result<Value> {
        self.client.delete(&format!("networks/{network_id}")).await
    }

    pub async fn add_subnet(
        &self,
        network_id: i64,
        ip_range: &str,
        network_zone: &str,
    ) -> Result<Value> {
        self.action(
            network_id,
            "add_subnet",
            json!({
                "type": "cloud",
                "ip_range": ip_range,
                "network_zone": network_zone,
            }),
        )
        .await
    }

    pub async fn delete_subnet(&self, network_id: i64, ip_range: &str) -> Result<Value> {
        self.action(network_id, "delete_subnet", json!({"ip_range": ip_range}))
            .await
    }

    pub async fn change_protection(&self, network_id: i64, delete: bool) -> Result<Value> {
        self.action(network_id, "change_protection", json!({"delete": delete}))
            .await
    }

    async fn action(&self, network_id: i64, action: &str, body: Value) -> Result<Value> {
        self.client
            .post(&format!("networks/{network_id}/actions/{action}"), &body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn add_subnet_sends_cloud_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/networks/2/actions/add_subnet"))
            .and(body_json(json!({
                "type": "cloud",
                "ip_range": "10.0.1.0/24",
                "network_zone": "eu-central",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "action": {"id": 5, "command": "add_subnet", "status": "running",
                           "progress": 0, "error": null}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CloudClient::builder()
            .api_token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap();
        NetworkHandler::new(client)
            .add_subnet(2, "10.0.1.0/24", "eu-central")
            .await
            .unwrap();
    }
}
