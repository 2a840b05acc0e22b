//! Route bindings and application assembly.

use axum::http::HeaderValue;
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::handlers::{
    create_product, delete_product, get_product_by_id, list_products, toggle_availability,
    update_product,
};
use crate::openapi;
use crate::state::AppState;

/// Method + path bindings for the product resource.
pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product_by_id)
                .put(update_product)
                .patch(toggle_availability)
                .delete(delete_product),
        )
        .with_state(state)
}

/// Full application: product routes under `/api/products`, the docs
/// endpoint, CORS restricted to the configured frontend origin, and
/// per-request tracing.
pub fn app(state: AppState, config: &Config) -> Router {
    Router::new()
        .nest("/api/products", product_routes(state))
        .merge(openapi::docs_routes())
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

/// Allows exactly the configured `FRONTEND_URL` origin; with no origin
/// configured (or an unparseable one), no cross-origin caller is allowed.
fn cors_layer(config: &Config) -> CorsLayer {
    let Some(origin) = &config.frontend_url else {
        return CorsLayer::new();
    };
    match origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
        Err(_) => {
            tracing::warn!("FRONTEND_URL is not a valid origin value; CORS left closed");
            CorsLayer::new()
        }
    }
}
