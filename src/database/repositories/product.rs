//! Product repository implementation

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::models::product::{Product, ProductCreate, ProductFilter, ProductUpdate};
use crate::utils::errors::ApiError;

const PRODUCT_COLUMNS: &str = "id, name, description, price, quantity, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new product
    pub async fn create(&self, request: &ProductCreate) -> Result<Product, ApiError> {
        let now = Utc::now();
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            INSERT INTO products (name, description, price, quantity, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .bind(request.quantity)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Find product by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Product>, ApiError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Replace every editable field of a product. Returns `None` when it does not exist.
    pub async fn update(&self, id: i64, request: &ProductUpdate) -> Result<Option<Product>, ApiError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            r#"
            UPDATE products
            SET name = ?2,
                description = ?3,
                price = ?4,
                quantity = ?5,
                updated_at = ?6
            WHERE id = ?1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&request.name)
        .bind(&request.description)
        .bind(request.price)
        .bind(request.quantity)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Delete product, reporting whether a row was removed
    pub async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List products matching a price range, sorted and paginated
    pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, ApiError> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE 1 = 1"));

        if let Some(min_price) = filter.min_price {
            query.push(" AND price >= ").push_bind(min_price);
        }
        if let Some(max_price) = filter.max_price {
            query.push(" AND price <= ").push_bind(max_price);
        }

        // Column and direction come from closed enums, never from raw input
        query
            .push(" ORDER BY ")
            .push(filter.sort_by.column())
            .push(" ")
            .push(filter.sort_order.keyword())
            .push(", id ASC LIMIT ")
            .push_bind(filter.limit)
            .push(" OFFSET ")
            .push_bind(filter.skip);

        let products = query
            .build_query_as::<Product>()
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// List every product in insertion order
    pub async fn list_all(&self) -> Result<Vec<Product>, ApiError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Count total products
    pub async fn count(&self) -> Result<i64, ApiError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
