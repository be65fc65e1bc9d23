//! Floating IP resource handler

use serde_json::{Value, json};

use crate::client::{CloudClient, take_field};
use crate::error::Result;

/// Handler for `/floating_ips` endpoints
#[derive(Debug, Clone)]
pub struct FloatingIpHandler {
    client: CloudClient,
}

impl FloatingIpHandler {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Value> {
        let resp = self.client.get("floating_ips").await?;
        Ok(take_field(resp, "floating_ips"))
    }

    pub async fn get(&self, ip_id: i64) -> Result<Value> {
        let resp = self.client.get(&format!("floating_ips/{ip_id}")).await?;
        Ok(take_field(resp, "floating_ip"))
    }

    /// Create a floating IP, bound to a home location or assigned to a
    /// server right away
    pub async fn create(&self, body: &Value) -> Result<Value> {
        self.client.post("floating_ips", body).await
    }

    pub async fn update(&self, ip_id: i64, body: &Value) -> Result<Value> {
        self.client
            .put(&format!("floating_ips/{ip_id}"), body)
            .await
    }

    pub async fn delete(&self, ip_id: i64) -> Result<Value> {
        self.client.delete(&format!("floating_ips/{ip_id}")).await
    }

    pub async fn assign(&self, ip_id: i64, server_id: i64) -> Result<Value> {
        self.action(ip_id, "assign", json!({"server": server_id})).await
    }

    pub async fn unassign(&self, ip_id: i64) -> Result<Value> {
        self.action(ip_id, "unassign", json!({})).await
    }

    pub async fn change_dns_ptr(&self, ip_id: i64, ip: &str, dns_ptr: Option<&str>) -> Result<Value> {
        self.action(ip_id, "change_dns_ptr", json!({"ip": ip, "dns_ptr": dns_ptr}))
            .await
    }

    pub async fn change_protection(&self, ip_id: i64, delete: bool) -> Result<Value> {
        self.action(ip_id, "change_protection", json!({"delete": delete}))
            .await
    }

    async fn action(&self, ip_id: i64, action: &str, body: Value) -> Result<Value> {
        self.client
            .post(&format!("floating_ips/{ip_id}/actions/{action}"), &body)
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
    async fn assign_posts_server_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/floating_ips/6/actions/assign"))
            .and(body_json(json!({"server": 42})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "action": {"id": 31, "command": "assign_floating_ip", "status": "running",
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
        FloatingIpHandler::new(client).assign(6, 42).await.unwrap();
    }
}
