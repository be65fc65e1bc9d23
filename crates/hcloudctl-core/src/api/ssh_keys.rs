//! SSH key resource handler
//!
//! Purely synchronous resource; no actions to await.

use serde_json::{Value, json};

use crate::client::{CloudClient, take_field};
use crate::error::Result;

/// Handler for `/ssh_keys` endpoints
#[derive(Debug, Clone)]
pub struct SshKeyHandler {
    client: CloudClient,
}

impl SshKeyHandler {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Value> {
        let resp = self.client.get("ssh_keys").await?;
        Ok(take_field(resp, "ssh_keys"))
    }

    pub async fn get(&self, key_id: i64) -> Result<Value> {
        let resp = self.client.get(&format!("ssh_keys/{key_id}")).await?;
        Ok(take_field(resp, "ssh_key"))
    }

    pub async fn create(
        &self,
        name: &str,
        public_key: &str,
        labels: Option<&Value>,
    ) -> Result<Value> {
        let mut body = json!({"name": name, "public_key": public_key});
        if let Some(labels) = labels {
            body["labels"] = labels.clone();
        }
        let resp = self.client.post("ssh_keys", &body).await?;
        Ok(take_field(resp, "ssh_key"))
    }

    /// Rename a key or replace its labels
    pub async fn update(&self, key_id: i64, body: &Value) -> Result<Value> {
        let resp = self.client.put(&format!("ssh_keys/{key_id}"), body).await?;
        Ok(take_field(resp, "ssh_key"))
    }

    pub async fn delete(&self, key_id: i64) -> Result<Value> {
        self.client.delete(&format!("ssh_keys/{key_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn create_unwraps_new_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ssh_keys"))
            .and(body_json(json!({
                "name": "deploy",
                "public_key": "ssh-ed25519 AAAA... deploy@host",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "ssh_key": {"id": 3, "name": "deploy"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CloudClient::builder()
            .api_token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap();
        let key = SshKeyHandler::new(client)
            .create("deploy", "ssh-ed25519 AAAA... deploy@host", None)
            .await
            .unwrap();
        assert_eq!(key["id"], 3);
    }
}
