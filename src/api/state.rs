use std::sync::Arc;

use crate::{
    config::Config,
    services::{MemStorage, Storage},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    /// Base URL handed to the Shopify provider on external imports
    pub shopify_api_url: String,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, shopify_api_url: impl Into<String>) -> Self {
        Self {
            storage,
            shopify_api_url: shopify_api_url.into(),
        }
    }

    /// Builds the in-memory store described by the configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let storage = if config.seed_catalog {
            MemStorage::seeded()?
        } else {
            MemStorage::new()
        };

        Ok(Self::new(Arc::new(storage), config.shopify_api_url.clone()))
    }
}
