use crate::{
    error::AppResult,
    models::{ClothingItem, NewClothingItem},
    services::{providers::ProductProvider, storage::Storage},
};

/// Pulls products from an external provider into the catalog
///
/// Every imported item is flagged external and gets a fresh catalog id.
pub async fn import_external_products(
    storage: &dyn Storage,
    provider: &dyn ProductProvider,
    category: &str,
    limit: u32,
) -> AppResult<Vec<ClothingItem>> {
    let products = provider.fetch_products(category, limit).await?;

    let mut stored = Vec::with_capacity(products.len());
    for product in products {
        let item = storage
            .add_clothing_item(NewClothingItem {
                is_external: true,
                ..product
            })
            .await?;
        stored.push(item);
    }

    tracing::info!(
        provider = provider.name(),
        storage = storage.name(),
        category = %category,
        imported = stored.len(),
        "Imported external products"
    );

    Ok(stored)
}
