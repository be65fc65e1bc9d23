//! Firewall resource handler
//!
//! Rule sets are replaced wholesale by `set_rules`; applying to or
//! removing from resources returns a list of actions, one per resource.

use serde_json::{Value, json};

use crate::client::{CloudClient, take_field};
use crate::error::Result;

/// Handler for `/firewalls` endpoints
#[derive(Debug, Clone)]
pub struct FirewallHandler {
    client: CloudClient,
}

impl FirewallHandler {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Value> {
        let resp = self.client.get("firewalls").await?;
        Ok(take_field(resp, "firewalls"))
    }

    pub async fn get(&self, firewall_id: i64) -> Result<Value> {
        let resp = self.client.get(&format!("firewalls/{firewall_id}")).await?;
        Ok(take_field(resp, "firewall"))
    }

    pub async fn create(&self, body: &Value) -> Result<Value> {
        self.client.post("firewalls", body).await
    }

    pub async fn update(&self, firewall_id: i64, body: &Value) -> Result<Value> {
        self.client
            .put(&format!("firewalls/{firewall_id}"), body)
            .await
    }

    pub async fn delete(&self, firewall_id: i64) -> Result<Value> {
        self.client
            .delete(&format!("firewalls/{firewall_id}"))
            .await
    }

    /// Replace the complete rule set. An empty list removes all rules.
    pub async fn set_rules(&self, firewall_id: i64, rules: &Value) -> Result<Value> {
        self.action(firewall_id, "set_rules", json!({"rules": rules}))
            .await
    }

    /// Apply the firewall to servers or label selectors. The response
    /// carries one action per resource.
    pub async fn apply_to_resources(
        &self,
        firewall_id: i64,
        resources: &Value,
    ) -> Result<Value> {
        self.action(
            firewall_id,
            "apply_to_resources",
            json!({"apply_to": resources}),
        )
        .await
    }

    pub async fn remove_from_resources(
        &self,
        firewall_id: i64,
        resources: &Value,
    ) -> Result<Value> {
        self.action(
            firewall_id,
            "remove_from_resources",
            json!({"remove_from": resources}),
        )
        .await
    }

    async fn action(&self, firewall_id: i64, action: &str, body: Value) -> Result<Value> {
        self.client
            .post(&format!("firewalls/{firewall_id}/actions/{action}"), &body)
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
    async fn apply_to_resources_returns_action_list() {
        let server = MockServer::start().await;
        let resources = json!([{"type": "server", "server": {"id": 42}}]);
        Mock::given(method("POST"))
            .and(path("/firewalls/8/actions/apply_to_resources"))
            .and(body_json(json!({"apply_to": resources})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "actions": [{"id": 1, "command": "apply_firewall", "status": "running",
                             "progress": 0, "error": null}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CloudClient::builder()
            .api_token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap();
        let resp = FirewallHandler::new(client)
            .apply_to_resources(8, &resources)
            .await
            .unwrap();
        assert_eq!(resp["actions"][0]["id"], 1);
    }
}
