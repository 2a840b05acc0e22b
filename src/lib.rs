//! Product catalog REST API: axum routes, per-endpoint validation chains,
//! and a PostgreSQL-backed product store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod product;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;

pub use config::Config;
pub use error::ApiError;
pub use product::{NewProduct, Product, ProductUpdate};
pub use routes::{app, product_routes};
pub use state::AppState;
pub use store::{
    connect_db, ensure_products_table, reset_products_table, InMemoryProductStore, PgProductStore,
    ProductStore, StoreError,
};
