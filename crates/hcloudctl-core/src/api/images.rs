//! Image resource handler
//!
//! Snapshots and backups are both images; the CLI filters by `type` to
//! present them as separate resources.

use serde_json::Value;

use crate::client::{CloudClient, take_field};
use crate::error::Result;

/// Handler for `/images` endpoints
#[derive(Debug, Clone)]
pub struct ImageHandler {
    client: CloudClient,
}

impl ImageHandler {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    /// List images, optionally filtered by type (`snapshot`, `backup`,
    /// `system`, `app`) and by the server they are bound to.
    pub async fn list(
        &self,
        image_type: Option<&str>,
        bound_to: Option<i64>,
    ) -> Result<Value> {
        let mut path = String::from("images");
        let mut sep = '?';
        if let Some(t) = image_type {
            path.push_str(&format!("{sep}type={t}"));
            sep = '&';
        }
        if let Some(server_id) = bound_to {
            path.push_str(&format!("{sep}bound_to={server_id}"));
        }
        let resp = self.client.get(&path).await?;
        Ok(take_field(resp, "images"))
    }

    pub async fn get(&self, image_id: i64) -> Result<Value> {
        let resp = self.client.get(&format!("images/{image_id}")).await?;
        Ok(take_field(resp, "image"))
    }

    /// Update description, labels or convert a backup to a snapshot
    pub async fn update(&self, image_id: i64, body: &Value) -> Result<Value> {
        self.client.put(&format!("images/{image_id}"), body).await
    }

    pub async fn delete(&self, image_id: i64) -> Result<Value> {
        self.client.delete(&format!("images/{image_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn list_filters_by_type_and_binding() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/images"))
            .and(query_param("type", "snapshot"))
            .and(query_param("bound_to", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "images": [{"id": 11, "type": "snapshot"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CloudClient::builder()
            .api_token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap();
        let images = ImageHandler::new(client)
            .list(Some("snapshot"), Some(3))
            .await
            .unwrap();
        assert_eq!(images[0]["id"], 11);
    }
}
