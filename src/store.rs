//! Storage access for products: a narrow trait with PostgreSQL and
//! in-memory implementations, plus the `products` table DDL.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;

use crate::product::{NewProduct, Product, ProductUpdate};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("{0}")]
    Internal(String),
}

/// The storage operations the handlers need, and nothing more.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products ordered by ascending id, without the audit columns.
    async fn find_all(&self) -> Result<Vec<Product>, StoreError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, StoreError>;

    async fn insert(&self, new: NewProduct) -> Result<Product, StoreError>;

    /// Overwrites the writable columns of an existing row. Returns `None`
    /// when the id is absent.
    async fn update(&self, id: i32, update: ProductUpdate) -> Result<Option<Product>, StoreError>;

    /// Returns true when a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;

    /// Removes every row and restarts the id sequence.
    async fn clear(&self) -> Result<(), StoreError>;
}

const PRODUCTS_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    price DOUBLE PRECISION NOT NULL,
    availability BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)
"#;

/// Verify the connection, then create the `products` table if needed.
pub async fn connect_db(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    ensure_products_table(pool).await
}

pub async fn ensure_products_table(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(PRODUCTS_DDL).execute(pool).await?;
    Ok(())
}

/// Drop and recreate the table, restarting the id sequence. Used by the
/// maintenance binary.
pub async fn reset_products_table(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query("DROP TABLE IF EXISTS products").execute(pool).await?;
    ensure_products_table(pool).await
}

/// PostgreSQL-backed store. All queries are parameterized and return the
/// written row via `RETURNING`.
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, availability FROM products ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, Product>(
            "SELECT id, name, price, availability, created_at, updated_at \
             FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn insert(&self, new: NewProduct) -> Result<Product, StoreError> {
        let row = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, price, availability) VALUES ($1, $2, $3) \
             RETURNING id, name, price, availability, created_at, updated_at",
        )
        .bind(&new.name)
        .bind(new.price)
        .bind(new.availability)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i32, update: ProductUpdate) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, Product>(
            "UPDATE products SET name = $2, price = $3, availability = $4, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING id, name, price, availability, created_at, updated_at",
        )
        .bind(id)
        .bind(&update.name)
        .bind(update.price)
        .bind(update.availability)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        reset_products_table(&self.pool).await
    }
}

/// Thread-safe in-memory store. Backs the test suite; the `BTreeMap` keeps
/// iteration in ascending id order.
pub struct InMemoryProductStore {
    inner: Mutex<Inner>,
}

struct Inner {
    rows: BTreeMap<i32, Product>,
    next_id: i32,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Internal("store lock poisoned".into()))
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .rows
            .values()
            .map(|p| Product {
                created_at: None,
                updated_at: None,
                ..p.clone()
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, StoreError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn insert(&self, new: NewProduct) -> Result<Product, StoreError> {
        let mut inner = self.lock()?;
        let id = inner.next_id;
        inner.next_id += 1;
        let now = Utc::now();
        let product = Product {
            id,
            name: new.name,
            price: new.price,
            availability: new.availability,
            created_at: Some(now),
            updated_at: Some(now),
        };
        inner.rows.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: i32, update: ProductUpdate) -> Result<Option<Product>, StoreError> {
        let mut inner = self.lock()?;
        match inner.rows.get_mut(&id) {
            Some(row) => {
                row.name = update.name;
                row.price = update.price;
                row.availability = update.availability;
                row.updated_at = Some(Utc::now());
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.lock()?.rows.remove(&id).is_some())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.rows.clear();
        inner.next_id = 1;
        Ok(())
    }
}
