//! Volume resource handler

use serde_json::{Value, json};

use crate::client::{CloudClient, take_field};
use crate::error::Result;

/// Handler for `/volumes` endpoints
#[derive(Debug, Clone)]
pub struct VolumeHandler {
    client: CloudClient,
}

impl VolumeHandler {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Value> {
        let resp = self.client.get("volumes").await?;
        Ok(take_field(resp, "volumes"))
    }

    pub async fn get(&self, volume_id: i64) -> Result<Value> {
        let resp = self.client.get(&format!("volumes/{volume_id}")).await?;
        Ok(take_field(resp, "volume"))
    }

    /// Create a volume. Either `location` or `server` must be present in
    /// the body; attaching at creation time also formats when `format` is
    /// given.
    pub async fn create(&self, body: &Value) -> Result<Value> {
        self.client.post("volumes", body).await
    }

    pub async fn update(&self, volume_id: i64, body: &Value) -> Result<Value> {
        self.client.put(&format!("volumes/{volume_id}"), body).await
    }

    pub async fn delete(&self, volume_id: i64) -> Result<Value> {
        self.client.delete(&format!("volumes/{volume_id}")).await
    }

    pub async fn attach(
        &self,
        volume_id: i64,
        server_id: i64,
        automount: bool,
    ) -> Result<Value> {
        self.action(
            volume_id,
            "attach",
            json!({"server": server_id, "automount": automount}),
        )
        .await
    }

    pub async fn detach(&self, volume_id: i64) -> Result<Value> {
        self.action(volume_id, "detach", json!({})).await
    }

    /// Grow the volume. Sizes only ever increase.
    pub async fn resize(&self, volume_id: i64, size_gb: i64) -> Result<Value> {
        self.action(volume_id, "resize", json!({"size": size_gb})).await
    }

    pub async fn change_protection(&self, volume_id: i64, delete: bool) -> Result<Value> {
        self.action(volume_id, "change_protection", json!({"delete": delete}))
            .await
    }

    async fn action(&self, volume_id: i64, action: &str, body: Value) -> Result<Value> {
        self.client
            .post(&format!("volumes/{volume_id}/actions/{action}"), &body)
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
    async fn attach_posts_server_and_automount() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/volumes/4/actions/attach"))
            .and(body_json(json!({"server": 42, "automount": true})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "action": {"id": 77, "command": "attach_volume", "status": "running",
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
        let resp = VolumeHandler::new(client).attach(4, 42, true).await.unwrap();
        assert_eq!(resp["action"]["id"], 77);
    }
}
