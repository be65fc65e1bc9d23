//! ISO image catalog handler
//!
//! Read-only; attaching an ISO to a server is a server action.

use serde_json::Value;

use crate::client::{CloudClient, take_field};
use crate::error::Result;

/// Handler for `/isos` endpoints
#[derive(Debug, Clone)]
pub struct IsoHandler {
    client: CloudClient,
}

impl IsoHandler {
    pub fn new(client: CloudClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Value> {
        let resp = self.client.get("isos").await?;
        Ok(take_field(resp, "isos"))
    }

    pub async fn get(&self, iso_id: i64) -> Result<Value> {
        let resp = self.client.get(&format!("isos/{iso_id}")).await?;
        Ok(take_field(resp, "iso"))
    }
}
