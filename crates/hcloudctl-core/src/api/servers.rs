//! Server resource handler
//!
//! Covers the server CRUD surface plus the lifecycle actions exposed under
//! `/servers/{id}/actions/...`. Every mutating call returns the full
//! response envelope so the caller can extract the action id(s) to await.

use serde_json::{Value, json};

use crate::client::{CloudClient, take_field};
use crate::error::Result;

/// Handler for `/servers` endpoints
#[derive(Debug, Clone)]
pub struct ServerHandler {
    client: CloudClient,
}

impl ServerHandler {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    /// List all servers in the project
    pub async fn list(&self) -> Result<Value> {
        let resp = self.client.get("servers").await?;
        Ok(take_field(resp, "servers"))
    }

    /// Get one server by id
    pub async fn get(&self, server_id: i64) -> Result<Value> {
        let resp = self.client.get(&format!("servers/{server_id}")).await?;
        Ok(take_field(resp, "server"))
    }

    /// Find a server by its exact name
    pub async fn get_by_name(&self, name: &str) -> Result<Value> {
        let resp = self
            .client
            .get(&format!("servers?name={name}"))
            .await?;
        let mut servers = take_field(resp, "servers");
        match servers.as_array_mut().and_then(|a| {
            if a.is_empty() { None } else { Some(a[0].take()) }
        }) {
            Some(server) => Ok(server),
            None => Ok(Value::Null),
        }
    }

    /// Create a server. `body` carries name, server_type, image and the
    /// optional fields (location, ssh_keys, user_data, labels, ...).
    pub async fn create(&self, body: &Value) -> Result<Value> {
        self.client.post("servers", body).await
    }

    /// Rename a server or replace its labels
    pub async fn update(&self, server_id: i64, body: &Value) -> Result<Value> {
        self.client
            .put(&format!("servers/{server_id}"), body)
            .await
    }

    /// Delete a server
    pub async fn delete(&self, server_id: i64) -> Result<Value> {
        self.client.delete(&format!("servers/{server_id}")).await
    }

    pub async fn power_on(&self, server_id: i64) -> Result<Value> {
        self.action(server_id, "poweron", json!({})).await
    }

    /// Graceful ACPI shutdown
    pub async fn shutdown(&self, server_id: i64) -> Result<Value> {
        self.action(server_id, "shutdown", json!({})).await
    }

    /// Hard power off, like pulling the plug
    pub async fn power_off(&self, server_id: i64) -> Result<Value> {
        self.action(server_id, "poweroff", json!({})).await
    }

    pub async fn reboot(&self, server_id: i64) -> Result<Value> {
        self.action(server_id, "reboot", json!({})).await
    }

    /// Resize to a different server type. `upgrade_disk` makes the change
    /// irreversible.
    pub async fn change_type(
        &self,
        server_id: i64,
        server_type: &str,
        upgrade_disk: bool,
    ) -> Result<Value> {
        self.action(
            server_id,
            "change_type",
            json!({"server_type": server_type, "upgrade_disk": upgrade_disk}),
        )
        .await
    }

    /// Rebuild the server from an image, wiping its disk
    pub async fn rebuild(&self, server_id: i64, image: &Value) -> Result<Value> {
        self.action(server_id, "rebuild", json!({"image": image})).await
    }

    pub async fn enable_backup(
        &self,
        server_id: i64,
        backup_window: Option<&str>,
    ) -> Result<Value> {
        let body = match backup_window {
            Some(window) => json!({"backup_window": window}),
            None => json!({}),
        };
        self.action(server_id, "enable_backup", body).await
    }

    pub async fn disable_backup(&self, server_id: i64) -> Result<Value> {
        self.action(server_id, "disable_backup", json!({})).await
    }

    /// Enable rescue mode; the response carries the one-time root password
    pub async fn enable_rescue(&self, server_id: i64, rescue_type: &str) -> Result<Value> {
        self.action(server_id, "enable_rescue", json!({"type": rescue_type}))
            .await
    }

    pub async fn disable_rescue(&self, server_id: i64) -> Result<Value> {
        self.action(server_id, "disable_rescue", json!({})).await
    }

    /// Reset the root password; the response carries the new password
    pub async fn reset_password(&self, server_id: i64) -> Result<Value> {
        self.action(server_id, "reset_password", json!({})).await
    }

    /// Create a snapshot or backup image of the server's disk
    pub async fn create_image(
        &self,
        server_id: i64,
        image_type: &str,
        description: Option<&str>,
    ) -> Result<Value> {
        let mut body = json!({"type": image_type});
        if let Some(desc) = description {
            body["description"] = json!(desc);
        }
        self.action(server_id, "create_image", body).await
    }

    pub async fn attach_iso(&self, server_id: i64, iso: &str) -> Result<Value> {
        self.action(server_id, "attach_iso", json!({"iso": iso})).await
    }

    pub async fn detach_iso(&self, server_id: i64) -> Result<Value> {
        self.action(server_id, "detach_iso", json!({})).await
    }

    pub async fn attach_to_network(&self, server_id: i64, body: &Value) -> Result<Value> {
        self.action(server_id, "attach_to_network", body.clone()).await
    }

    pub async fn detach_from_network(&self, server_id: i64, network_id: i64) -> Result<Value> {
        self.action(
            server_id,
            "detach_from_network",
            json!({"network": network_id}),
        )
        .await
    }

    /// Fetch time-series metrics. `metrics_type` is a comma-separated list
    /// of `cpu`, `disk`, `network`; `start`/`end` are RFC 3339 timestamps.
    pub async fn metrics(
        &self,
        server_id: i64,
        metrics_type: &str,
        start: &str,
        end: &str,
        step: Option<u64>,
    ) -> Result<Value> {
        let mut path = format!(
            "servers/{server_id}/metrics?type={metrics_type}&start={start}&end={end}"
        );
        if let Some(step) = step {
            path.push_str(&format!("&step={step}"));
        }
        let resp = self.client.get(&path).await?;
        Ok(take_field(resp, "metrics"))
    }

    async fn action(&self, server_id: i64, action: &str, body: Value) -> Result<Value> {
        self.client
            .post(&format!("servers/{server_id}/actions/{action}"), &body)
            .await
    }
}
