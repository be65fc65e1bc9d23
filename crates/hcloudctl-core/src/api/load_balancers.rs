//! Load balancer resource handler

use serde_json::{Value, json};

use crate::client::{CloudClient, take_field};
use crate::error::Result;

/// Handler for `/load_balancers` endpoints
#[derive(Debug, Clone)]
pub struct LoadBalancerHandler {
    client: CloudClient,
}

impl LoadBalancerHandler {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Value> {
        let resp = self.client.get("load_balancers").await?;
        Ok(take_field(resp, "load_balancers"))
    }

    pub async fn get(&self, lb_id: i64) -> Result<Value> {
        let resp = self.client.get(&format!("load_balancers/{lb_id}")).await?;
        Ok(take_field(resp, "load_balancer"))
    }

    pub async fn create(&self, body: &Value) -> Result<Value> {
        self.client.post("load_balancers", body).await
    }

    pub async fn update(&self, lb_id: i64, body: &Value) -> Result<Value> {
        self.client
            .put(&format!("load_balancers/{lb_id}"), body)
            .await
    }

    pub async fn delete(&self, lb_id: i64) -> Result<Value> {
        self.client
            .delete(&format!("load_balancers/{lb_id}"))
            .await
    }

    /// Add a target. `target` is the full target object (`server`,
    /// `label_selector` or `ip` form).
    pub async fn add_target(&self, lb_id: i64, target: &Value) -> Result<Value> {
        self.action(lb_id, "add_target", target.clone()).await
    }

    pub async fn remove_target(&self, lb_id: i64, target: &Value) -> Result<Value> {
        self.action(lb_id, "remove_target", target.clone()).await
    }

    /// Add a service definition (protocol, listen_port, destination_port,
    /// health_check, ...)
    pub async fn add_service(&self, lb_id: i64, service: &Value) -> Result<Value> {
        self.action(lb_id, "add_service", service.clone()).await
    }

    pub async fn update_service(&self, lb_id: i64, service: &Value) -> Result<Value> {
        self.action(lb_id, "update_service", service.clone()).await
    }

    pub async fn delete_service(&self, lb_id: i64, listen_port: u16) -> Result<Value> {
        self.action(lb_id, "delete_service", json!({"listen_port": listen_port}))
            .await
    }

    pub async fn change_algorithm(&self, lb_id: i64, algorithm: &str) -> Result<Value> {
        self.action(lb_id, "change_algorithm", json!({"type": algorithm}))
            .await
    }

    /// List available load balancer types with their limits and pricing
    pub async fn list_types(&self) -> Result<Value> {
        let resp = self.client.get("load_balancer_types").await?;
        Ok(take_field(resp, "load_balancer_types"))
    }

    async fn action(&self, lb_id: i64, action: &str, body: Value) -> Result<Value> {
        self.client
            .post(&format!("load_balancers/{lb_id}/actions/{action}"), &body)
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
    async fn delete_service_targets_listen_port() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/load_balancers/3/actions/delete_service"))
            .and(body_json(json!({"listen_port": 443})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "action": {"id": 12, "command": "delete_service", "status": "running",
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
        LoadBalancerHandler::new(client)
            .delete_service(3, 443)
            .await
            .unwrap();
    }
}
