//! External product catalog abstraction
//!
//! Providers pull clothing from a third-party shop API and translate it into
//! catalog items. The rest of the service only sees `NewClothingItem`s, so new
//! sources can be added without touching storage or matching.
use crate::{error::AppResult, models::NewClothingItem};

pub mod shopify;

pub use shopify::ShopifyProvider;

/// Trait for external product sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProductProvider: Send + Sync {
    /// Fetch up to `limit` products from the given collection/category
    ///
    /// Returned items are flagged external and carry shopping links.
    async fn fetch_products(&self, category: &str, limit: u32) -> AppResult<Vec<NewClothingItem>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
