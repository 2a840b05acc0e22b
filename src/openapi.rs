//! OpenAPI document generated from the handler annotations, served at
//! `/docs`.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::handlers;
use crate::product::{CreateProductRequest, Product, UpdateProductRequest};
use crate::validation::FieldError;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "REST API Products",
        description = "API operations for the product catalog"
    ),
    paths(
        handlers::list_products,
        handlers::get_product_by_id,
        handlers::create_product,
        handlers::update_product,
        handlers::toggle_availability,
        handlers::delete_product,
    ),
    components(schemas(Product, CreateProductRequest, UpdateProductRequest, FieldError)),
    tags((name = "Products", description = "Product catalog operations"))
)]
pub struct ApiDoc;

async fn docs() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn docs_routes() -> Router {
    Router::new().route("/docs", get(docs))
}
