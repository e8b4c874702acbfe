use crate::{
    error::{AppError, AppResult},
    models::{ClothingItem, ItemId, Recommendation},
    services::{
        matching::{complementary_items, recommend_matches},
        storage::Storage,
    },
};

/// Ranks catalog items by how well they go with a single reference item
///
/// Candidates are the whole catalog, narrowed to `category` when given.
pub async fn match_for_item(
    storage: &dyn Storage,
    item_id: ItemId,
    category: Option<&str>,
    limit: usize,
) -> AppResult<Vec<Recommendation>> {
    let reference = storage
        .clothing_item(item_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Reference item not found".to_string()))?;

    let all_items = storage.clothing_items().await?;
    let candidates = all_items
        .iter()
        .filter(|item| category.map_or(true, |c| item.category == c));

    let recommendations: Vec<Recommendation> = recommend_matches(&reference, candidates, limit)
        .into_iter()
        .map(Recommendation::from)
        .collect();

    tracing::debug!(
        item_id,
        category = category.unwrap_or("*"),
        results = recommendations.len(),
        "Ranked matches for reference item"
    );

    Ok(recommendations)
}

/// Ranks items of `target_category` against everything already in an outfit
///
/// Ids that do not resolve are dropped without error; repeated ids count once
/// per occurrence toward the average.
pub async fn complement_outfit(
    storage: &dyn Storage,
    item_ids: &[ItemId],
    target_category: &str,
    limit: usize,
) -> AppResult<Vec<Recommendation>> {
    let all_items = storage.clothing_items().await?;

    let selected: Vec<&ClothingItem> = item_ids
        .iter()
        .filter_map(|id| all_items.iter().find(|item| item.id == *id))
        .collect();

    if selected.len() < item_ids.len() {
        tracing::debug!(
            requested = item_ids.len(),
            resolved = selected.len(),
            "Dropped unresolved outfit item ids"
        );
    }

    let recommendations: Vec<Recommendation> =
        complementary_items(&selected, &all_items, target_category, limit)
            .into_iter()
            .map(Recommendation::from)
            .collect();

    tracing::debug!(
        selected = selected.len(),
        target_category,
        results = recommendations.len(),
        "Ranked complementary items"
    );

    Ok(recommendations)
}
