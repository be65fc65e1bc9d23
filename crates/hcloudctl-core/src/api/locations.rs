//! Location, datacenter and server type catalogs
//!
//! All read-only reference data grouped in one handler.

use serde_json::Value;

use crate::client::{CloudClient, take_field};
use crate::error::Result;

/// Handler for `/locations`, `/datacenters` and `/server_types`
#[derive(Debug, Clone)]
pub struct LocationHandler {
    client: CloudClient,
}

impl LocationHandler {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Value> {
        let resp = self.client.get("locations").await?;
        Ok(take_field(resp, "locations"))
    }

    pub async fn get(&self, location_id: i64) -> Result<Value> {
        let resp = self.client.get(&format!("locations/{location_id}")).await?;
        Ok(take_field(resp, "location"))
    }

    pub async fn list_datacenters(&self) -> Result<Value> {
        let resp = self.client.get("datacenters").await?;
        Ok(take_field(resp, "datacenters"))
    }

    pub async fn get_datacenter(&self, datacenter_id: i64) -> Result<Value> {
        let resp = self
            .client
            .get(&format!("datacenters/{datacenter_id}"))
            .await?;
        Ok(take_field(resp, "datacenter"))
    }

    pub async fn list_server_types(&self) -> Result<Value> {
        let resp = self.client.get("server_types").await?;
        Ok(take_field(resp, "server_types"))
    }

    pub async fn get_server_type(&self, type_id: i64) -> Result<Value> {
        let resp = self.client.get(&format!("server_types/{type_id}")).await?;
        Ok(take_field(resp, "server_type"))
    }
}
