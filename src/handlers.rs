//! Product CRUD handlers. Each one runs its endpoint's validation chain,
//! performs one storage operation (two for the load-then-save endpoints),
//! and shapes the `{data: ...}` response.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::product::ProductUpdate;
use crate::response::Data;
use crate::state::AppState;
use crate::validation;

pub const MSG_PRODUCT_NOT_FOUND: &str = "Producto no encontrado";
pub const MSG_PRODUCT_DELETED: &str = "Producto eliminado";

/// All products, ascending by id, without audit columns.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "List of products"),
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let products = state.store.find_all().await?;
    Ok((StatusCode::OK, Json(Data { data: products })))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = crate::product::Product),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn get_product_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = validation::parse_id(&id).map_err(ApiError::Validation)?;
    let product = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(MSG_PRODUCT_NOT_FOUND))?;
    Ok((StatusCode::OK, Json(Data { data: product })))
}

/// The body is forwarded as-is: every writable column it supplies is
/// trusted, availability included.
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = crate::product::CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = crate::product::Product),
        (status = 400, description = "Invalid input data"),
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = validation::validate_new_product(&body).map_err(ApiError::Validation)?;
    let product = state.store.insert(draft).await?;
    Ok((StatusCode::CREATED, Json(Data { data: product })))
}

/// Loads the row, applies only the fields present in the body, persists.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    request_body = crate::product::UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = crate::product::Product),
        (status = 400, description = "Invalid id or input data"),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl IntoResponse, ApiError> {
    let (id, update) =
        validation::validate_update_request(&id, &body).map_err(ApiError::Validation)?;
    let existing = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(MSG_PRODUCT_NOT_FOUND))?;
    let merged = ProductUpdate {
        name: update.name.unwrap_or(existing.name),
        price: update.price.unwrap_or(existing.price),
        availability: update.availability.unwrap_or(existing.availability),
    };
    let product = state
        .store
        .update(id, merged)
        .await?
        .ok_or(ApiError::NotFound(MSG_PRODUCT_NOT_FOUND))?;
    Ok((StatusCode::OK, Json(Data { data: product })))
}

/// Flips `availability` to its logical negation. Any request body is
/// ignored.
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Availability toggled", body = crate::product::Product),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn toggle_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = validation::parse_id(&id).map_err(ApiError::Validation)?;
    let existing = state
        .store
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(MSG_PRODUCT_NOT_FOUND))?;
    let flipped = ProductUpdate {
        name: existing.name,
        price: existing.price,
        availability: !existing.availability,
    };
    let product = state
        .store
        .update(id, flipped)
        .await?
        .ok_or(ApiError::NotFound(MSG_PRODUCT_NOT_FOUND))?;
    Ok((StatusCode::OK, Json(Data { data: product })))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i32, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Product not found"),
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id = validation::parse_id(&id).map_err(ApiError::Validation)?;
    state
        .store
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound(MSG_PRODUCT_NOT_FOUND))?;
    state.store.delete(id).await?;
    Ok((StatusCode::OK, Json(Data { data: MSG_PRODUCT_DELETED })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};

    use crate::routes::product_routes;
    use crate::state::AppState;
    use crate::store::InMemoryProductStore;
    use crate::validation::{MSG_INVALID_ID, MSG_PRICE_INVALID};

    use super::{MSG_PRODUCT_DELETED, MSG_PRODUCT_NOT_FOUND};

    fn test_server() -> TestServer {
        let state = AppState::new(Arc::new(InMemoryProductStore::new()));
        TestServer::new(product_routes(state)).unwrap()
    }

    async fn create_monitor(server: &TestServer) -> Value {
        let response = server
            .post("/")
            .json(&json!({"name": "Monitor curvo", "price": 300}))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["data"].clone()
    }

    #[tokio::test]
    async fn create_then_read_round_trips() {
        let server = test_server();
        let created = create_monitor(&server).await;
        assert_eq!(created["id"], 1);
        assert_eq!(created["availability"], true);

        let response = server.get("/1").await;
        response.assert_status_ok();
        let fetched = response.json::<Value>();
        assert_eq!(fetched["data"]["name"], "Monitor curvo");
        assert_eq!(fetched["data"]["price"], 300.0);
        assert_eq!(fetched["data"]["availability"], true);
    }

    #[tokio::test]
    async fn create_with_empty_body_yields_four_errors() {
        let server = test_server();
        let response = server.post("/").json(&json!({})).await;
        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(body["errors"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn create_with_nonpositive_price_yields_one_error() {
        let server = test_server();
        let response = server
            .post("/")
            .json(&json!({"name": "Monitor", "price": 0}))
            .await;
        response.assert_status_bad_request();
        let body = response.json::<Value>();
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["message"], MSG_PRICE_INVALID);
    }

    #[tokio::test]
    async fn create_with_non_numeric_price_yields_two_errors() {
        let server = test_server();
        let response = server
            .post("/")
            .json(&json!({"name": "Monitor", "price": "hola"}))
            .await;
        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn create_trusts_body_supplied_availability() {
        let server = test_server();
        let response = server
            .post("/")
            .json(&json!({"name": "Monitor", "price": 300, "availability": false}))
            .await;
        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["data"]["availability"], false);
    }

    #[tokio::test]
    async fn read_unknown_id_is_not_found() {
        let server = test_server();
        let response = server.get("/999").await;
        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["error"], MSG_PRODUCT_NOT_FOUND);
    }

    #[tokio::test]
    async fn read_non_integer_id_is_bad_request_with_one_error() {
        let server = test_server();
        let response = server.get("/uno").await;
        response.assert_status_bad_request();
        let body = response.json::<Value>();
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["message"], MSG_INVALID_ID);
    }

    #[tokio::test]
    async fn list_is_ascending_and_hides_audit_fields() {
        let server = test_server();
        create_monitor(&server).await;
        create_monitor(&server).await;

        let response = server.get("/").await;
        response.assert_status_ok();
        let body = response.json::<Value>();
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["id"], 1);
        assert_eq!(data[1]["id"], 2);
        assert!(data[0].get("createdAt").is_none());
        assert!(data[0].get("updatedAt").is_none());
    }

    #[tokio::test]
    async fn single_item_responses_carry_audit_fields() {
        let server = test_server();
        let created = create_monitor(&server).await;
        assert!(created.get("createdAt").is_some());

        let fetched = server.get("/1").await.json::<Value>();
        assert!(fetched["data"].get("updatedAt").is_some());
    }

    #[tokio::test]
    async fn update_overwrites_the_row() {
        let server = test_server();
        create_monitor(&server).await;

        let response = server
            .put("/1")
            .json(&json!({"name": "Monitor plano", "price": 500, "availability": false}))
            .await;
        response.assert_status_ok();
        let updated = response.json::<Value>();
        assert_eq!(updated["data"]["name"], "Monitor plano");
        assert_eq!(updated["data"]["price"], 500.0);
        assert_eq!(updated["data"]["availability"], false);

        let fetched = server.get("/1").await.json::<Value>();
        assert_eq!(fetched["data"]["price"], 500.0);
    }

    #[tokio::test]
    async fn update_with_invalid_body_is_bad_request() {
        let server = test_server();
        create_monitor(&server).await;
        let response = server.put("/1").json(&json!({})).await;
        response.assert_status_bad_request();
        let body = response.json::<Value>();
        assert_eq!(body["errors"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let server = test_server();
        let response = server
            .put("/42")
            .json(&json!({"name": "Monitor", "price": 300, "availability": true}))
            .await;
        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["error"], MSG_PRODUCT_NOT_FOUND);
    }

    #[tokio::test]
    async fn patch_flips_availability_each_time() {
        let server = test_server();
        let created = create_monitor(&server).await;
        assert_eq!(created["availability"], true);

        let first = server.patch("/1").await;
        first.assert_status_ok();
        assert_eq!(first.json::<Value>()["data"]["availability"], false);

        let second = server.patch("/1").await;
        second.assert_status_ok();
        assert_eq!(second.json::<Value>()["data"]["availability"], true);
    }

    #[tokio::test]
    async fn patch_unknown_id_is_not_found() {
        let server = test_server();
        let response = server.patch("/7").await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_removes_the_product() {
        let server = test_server();
        create_monitor(&server).await;

        let response = server.delete("/1").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"], MSG_PRODUCT_DELETED);

        server.get("/1").await.assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_unknown_id_is_not_found() {
        let server = test_server();
        let response = server.delete("/1").await;
        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["error"], MSG_PRODUCT_NOT_FOUND);
    }
}
