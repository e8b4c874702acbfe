use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{parse_id, AppError, AppResult},
    middleware::RequestId,
    models::{
        ClothingItem, Credentials, ExternalUrls, Favorite, ItemFilter, ItemId, NewFavorite,
        Outfit, Recommendation, User,
    },
    services::{
        external_products::import_external_products, matching::DEFAULT_LIMIT,
        providers::ShopifyProvider, recommendations,
    },
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct MatchQuery {
    pub category: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitRecommendationRequest {
    /// Any integer; ids outside the catalog's id range resolve to nothing
    pub item_ids: Vec<i64>,
    pub target_category: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingLinksRequest {
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalFetchRequest {
    pub api_key: String,
    pub category: String,
    #[serde(default = "default_fetch_limit")]
    pub limit: u32,
}

fn default_fetch_limit() -> u32 {
    10
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> AppResult<(StatusCode, Json<User>)> {
    let Json(credentials) = payload?;
    if !credentials.is_valid() {
        return Err(AppError::InvalidInput(
            "Username and password are required".to_string(),
        ));
    }

    let user = state
        .storage
        .create_user(credentials.into_new_user())
        .await?;
    tracing::info!(user_id = user.id, "Registered user");

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> AppResult<Json<User>> {
    let Json(credentials) = payload?;

    match state.storage.user_by_username(credentials.username.trim()).await? {
        Some(user) if user.verify_password(&credentials.password) => Ok(Json(user)),
        _ => Err(AppError::Unauthorized(
            "Invalid username or password".to_string(),
        )),
    }
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let id = parse_id(&id)?;
    state
        .storage
        .user(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// List clothing items, optionally filtered by attribute
pub async fn get_clothing(
    State(state): State<AppState>,
    filter: Result<Query<ItemFilter>, QueryRejection>,
) -> AppResult<Json<Vec<ClothingItem>>> {
    let Query(filter) = filter?;
    Ok(Json(state.storage.clothing_items_matching(filter).await?))
}

pub async fn get_popular_clothing(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ClothingItem>>> {
    let items = state
        .storage
        .clothing_items_matching(ItemFilter::popular())
        .await?;
    Ok(Json(items))
}

pub async fn get_clothing_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ClothingItem>> {
    let id = parse_id(&id)?;
    state
        .storage
        .clothing_item(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
}

pub async fn get_clothing_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<Vec<ClothingItem>>> {
    let items = state
        .storage
        .clothing_items_matching(ItemFilter::category(category))
        .await?;
    Ok(Json(items))
}

/// Replace the shopping links of an existing item
pub async fn set_shopping_links(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ShoppingLinksRequest>, JsonRejection>,
) -> AppResult<Json<ClothingItem>> {
    let id = parse_id(&id)?;
    let Json(request) = payload?;

    state
        .storage
        .set_external_urls(id, request.external_urls)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
}

/// Rank the catalog against a single reference item
pub async fn match_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(item_id): Path<String>,
    query: Result<Query<MatchQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let item_id = parse_id(&item_id)?;
    let Query(query) = query?;
    let category = query.category.as_deref().filter(|c| !c.is_empty());

    tracing::info!(
        request_id = %request_id,
        item_id,
        category = ?category,
        "Processing match recommendation request"
    );

    let results = recommendations::match_for_item(
        state.storage.as_ref(),
        item_id,
        category,
        query.limit.unwrap_or(DEFAULT_LIMIT),
    )
    .await?;

    Ok(Json(results))
}

/// Rank items of a category against everything already in the outfit
pub async fn outfit_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<OutfitRecommendationRequest>, JsonRejection>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let Json(request) = payload?;
    let item_ids: Vec<ItemId> = request
        .item_ids
        .iter()
        .filter_map(|&id| ItemId::try_from(id).ok())
        .collect();

    tracing::info!(
        request_id = %request_id,
        selected_count = request.item_ids.len(),
        target_category = %request.target_category,
        "Processing outfit recommendation request"
    );

    let results = recommendations::complement_outfit(
        state.storage.as_ref(),
        &item_ids,
        &request.target_category,
        request.limit.unwrap_or(DEFAULT_LIMIT),
    )
    .await?;

    Ok(Json(results))
}

pub async fn get_outfits(State(state): State<AppState>) -> AppResult<Json<Vec<Outfit>>> {
    Ok(Json(state.storage.outfits().await?))
}

pub async fn get_outfit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Outfit>> {
    let id = parse_id(&id)?;
    state
        .storage
        .outfit(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Outfit not found".to_string()))
}

pub async fn get_outfits_by_occasion(
    State(state): State<AppState>,
    Path(occasion): Path<String>,
) -> AppResult<Json<Vec<Outfit>>> {
    Ok(Json(state.storage.outfits_by_occasion(&occasion).await?))
}

/// Save an item or outfit as a favorite
pub async fn add_favorite(
    State(state): State<AppState>,
    payload: Result<Json<NewFavorite>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Favorite>)> {
    let Json(request) = payload?;
    if !request.is_valid() {
        return Err(AppError::InvalidInput(
            "Either itemId or outfitId must be provided".to_string(),
        ));
    }

    let favorite = state.storage.add_favorite(request).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

pub async fn get_favorites(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Favorite>>> {
    let user_id = parse_id(&user_id)
        .map_err(|_| AppError::InvalidInput("Invalid user ID format".to_string()))?;
    Ok(Json(state.storage.favorites_for_user(user_id).await?))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_id(&id)?;
    state.storage.remove_favorite(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_external_clothing(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ClothingItem>>> {
    let items = state
        .storage
        .clothing_items_matching(ItemFilter::external())
        .await?;
    Ok(Json(items))
}

/// Import products from the Shopify API into the catalog
pub async fn fetch_external(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<ExternalFetchRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Vec<ClothingItem>>)> {
    let Json(request) = payload?;

    tracing::info!(
        request_id = %request_id,
        category = %request.category,
        limit = request.limit,
        "Processing external product import"
    );

    let provider = ShopifyProvider::new(request.api_key, state.shopify_api_url.clone());
    let items = import_external_products(
        state.storage.as_ref(),
        &provider,
        &request.category,
        request.limit,
    )
    .await?;

    if items.is_empty() {
        return Err(AppError::NotFound(
            "No items found from external API".to_string(),
        ));
    }

    Ok((StatusCode::CREATED, Json(items)))
}
