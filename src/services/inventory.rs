// src/services/inventory.rs

//! Inventory fetcher.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::Result;
use crate::models::InventorySnapshot;

/// Source of inventory snapshots.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Fetch one fresh snapshot.
    async fn fetch(&self) -> Result<InventorySnapshot>;
}

/// Fetches the inventory with a single HTTP GET.
pub struct HttpInventory {
    client: Client,
    url: String,
}

impl HttpInventory {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl InventorySource for HttpInventory {
    async fn fetch(&self) -> Result<InventorySnapshot> {
        let body = self.client.get(&self.url).send().await?.text().await?;
        log::debug!("Fetched {} bytes from {}", body.len(), self.url);
        Ok(serde_json::from_str(&body)?)
    }
}
