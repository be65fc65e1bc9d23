//! Primary IP resource handler
//!
//! Unlike floating IPs, primary IPs assign to a typed resource and only
//! while the target is powered off.

use serde_json::{Value, json};

use crate::client::{CloudClient, take_field};
use crate::error::Result;

/// Handler for `/primary_ips` endpoints
#[derive(Debug, Clone)]
pub struct PrimaryIpHandler {
    client: CloudClient,
}

impl PrimaryIpHandler {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Value> {
        let resp = self.client.get("primary_ips").await?;
        Ok(take_field(resp, "primary_ips"))
    }

    pub async fn get(&self, ip_id: i64) -> Result<Value> {
        let resp = self.client.get(&format!("primary_ips/{ip_id}")).await?;
        Ok(take_field(resp, "primary_ip"))
    }

    pub async fn create(&self, body: &Value) -> Result<Value> {
        self.client.post("primary_ips", body).await
    }

    pub async fn update(&self, ip_id: i64, body: &Value) -> Result<Value> {
        self.client.put(&format!("primary_ips/{ip_id}"), body).await
    }

    pub async fn delete(&self, ip_id: i64) -> Result<Value> {
        self.client.delete(&format!("primary_ips/{ip_id}")).await
    }

    /// Assign to a resource; `assignee_type` is currently always `server`
    pub async fn assign(
        &self,
        ip_id: i64,
        assignee_id: i64,
        assignee_type: &str,
    ) -> Result<Value> {
        self.action(
            ip_id,
            "assign",
            json!({"assignee_id": assignee_id, "assignee_type": assignee_type}),
        )
        .await
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
            .post(&format!("primary_ips/{ip_id}/actions/{action}"), &body)
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
    async fn assign_sends_typed_assignee() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/primary_ips/9/actions/assign"))
            .and(body_json(json!({"assignee_id": 42, "assignee_type": "server"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "action": {"id": 14, "command": "assign_primary_ip", "status": "running",
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
        PrimaryIpHandler::new(client)
            .assign(9, 42, "server")
            .await
            .unwrap();
    }
}
