use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        // Accounts
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/user/:id", get(handlers::get_user))
        // Catalog
        .route("/clothing", get(handlers::get_clothing))
        .route("/clothing/popular", get(handlers::get_popular_clothing))
        .route("/clothing/category/:category", get(handlers::get_clothing_by_category))
        .route("/clothing/:id", get(handlers::get_clothing_item))
        .route("/clothing/:id/shopping-links", post(handlers::set_shopping_links))
        // Recommendations
        .route("/recommendations/match/:item_id", get(handlers::match_recommendations))
        .route("/recommendations/outfit", post(handlers::outfit_recommendations))
        // Outfits
        .route("/outfits", get(handlers::get_outfits))
        .route("/outfits/occasion/:occasion", get(handlers::get_outfits_by_occasion))
        .route("/outfits/:id", get(handlers::get_outfit))
        // Favorites (GET takes a user id, DELETE a favorite id)
        .route("/favorites", post(handlers::add_favorite))
        .route(
            "/favorites/:id",
            get(handlers::get_favorites).delete(handlers::remove_favorite),
        )
        // External products
        .route("/external/clothing", get(handlers::get_external_clothing))
        .route("/external/fetch", post(handlers::fetch_external))
}
