//! Product row mapping for the `products` table, plus request payload shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the `products` table as returned by the API.
///
/// Audit columns are optional: the list query selects rows without them, so
/// they are absent from the list response and present everywhere else.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Monitor curvo 49 pulgadas")]
    pub name: String,
    #[schema(example = 300.0)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    #[sqlx(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Writable columns for an insert. `availability` defaults to true when the
/// request body does not supply it.
#[derive(Clone, Debug, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

/// Full set of writable columns for an update; the handler merges the
/// request body over the existing row before building one of these.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductUpdate {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}

/// Documented create payload. Handlers validate the raw JSON body; this
/// shape exists for the generated API documentation.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Monitor curvo 49 pulgadas")]
    pub name: String,
    #[schema(example = 399.0)]
    pub price: f64,
}

/// Documented full-update payload.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: String,
    pub price: f64,
    pub availability: bool,
}
