//! Authenticated HTTP client for the Hetzner Cloud REST API
//!
//! Every call issues exactly one request and normalizes the outcome: 2xx
//! bodies are returned as parsed JSON (empty bodies become `Value::Null`),
//! everything else becomes a [`CoreError::Api`] carrying the provider's
//! `error.message` when the body has one.

use reqwest::{Method, StatusCode, header};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{CoreError, Result};

/// Client for the provider REST API
#[derive(Debug, Clone)]
pub struct CloudClient {
    http: reqwest::Client,
    base_url: String,
}

/// Builder for [`CloudClient`]
#[derive(Debug, Default)]
pub struct CloudClientBuilder {
    api_token: Option<String>,
    base_url: Option<String>,
    user_agent: Option<String>,
}

impl CloudClientBuilder {
    /// API token used for bearer authentication (required)
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Override the API base URL (defaults to the public endpoint)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// User agent sent with every request
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    pub fn build(self) -> Result<CloudClient> {
        let token = self
            .api_token
            .ok_or_else(|| CoreError::Config("API token is required".into()))?;

        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| CoreError::Config("API token contains invalid characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .user_agent(
                self.user_agent
                    .unwrap_or_else(|| format!("hcloudctl/{}", env!("CARGO_PKG_VERSION"))),
            )
            .default_headers(headers)
            .build()?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| crate::DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(CloudClient { http, base_url })
    }
}

impl CloudClient {
    pub fn builder() -> CloudClientBuilder {
        CloudClientBuilder::default()
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Value> {
        self.request(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value> {
        self.request(Method::DELETE, path, None).await
    }

    /// Issue one request and normalize the response.
    ///
    /// Used directly by the `api` passthrough command; the typed handlers
    /// go through the convenience wrappers above.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("{} {}", method, url);

        let mut req = self.http.request(method, &url);
        if let Some(body) = body {
            trace!("request body: {}", body);
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if status.is_success() {
            if text.is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&text)?);
        }

        Err(CoreError::Api {
            status: status.as_u16(),
            message: extract_error_message(&text, status),
        })
    }
}

/// Pull the provider's `error.message` out of an error body, falling back
/// to the raw body or the status line.
fn extract_error_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(message) = value
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
        {
            return message.to_string();
        }
    }
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

/// Take a named field out of a response object, leaving `Null` for absent
/// keys. Handlers use this to unwrap envelopes like `{"servers": [...]}`.
pub(crate) fn take_field(mut response: Value, key: &str) -> Value {
    response.get_mut(key).map(Value::take).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{bearer_token, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> CloudClient {
        CloudClient::builder()
            .api_token("test-token")
            .base_url(server.uri())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn get_sends_bearer_token_and_parses_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/servers"))
            .and(bearer_token("test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"servers": []})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let resp = client.get("servers").await.unwrap();
        assert_eq!(resp, json!({"servers": []}));
    }

    #[tokio::test]
    async fn empty_body_becomes_null() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/ssh_keys/7"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let resp = client.delete("ssh_keys/7").await.unwrap();
        assert!(resp.is_null());
    }

    #[tokio::test]
    async fn provider_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/servers/42"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"code": "not_found", "message": "server not found"}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get("servers/42").await.unwrap_err();
        match err {
            CoreError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "server not found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn take_field_handles_missing_key() {
        let v = json!({"server": {"id": 1}});
        assert_eq!(take_field(v.clone(), "server"), json!({"id": 1}));
        assert!(take_field(v, "volume").is_null());
    }
}
