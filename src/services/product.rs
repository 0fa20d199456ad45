//! Product service implementation
//!
//! Validates product input, runs catalog queries, and keeps the product
//! snapshot cache coherent with writes.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::database::ProductRepository;
use crate::models::{Product, ProductCreate, ProductFilter, ProductQueryParams, ProductUpdate, SortField, SortOrder};
use crate::services::cache::ProductCache;
use crate::utils::errors::{ApiError, Result};
use crate::utils::helpers::{
    sanitize_string, validate_price, validate_quantity, validate_sort_order, validate_sort_parameter,
};
use crate::utils::logging::log_performance_metric;

pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

/// Reads performed by a benchmark run
pub const BENCHMARK_ITERATIONS: usize = 1000;

#[derive(Debug, Clone)]
pub struct ProductService {
    repository: ProductRepository,
    cache: ProductCache,
}

impl ProductService {
    pub fn new(repository: ProductRepository, cache: ProductCache) -> Self {
        Self { repository, cache }
    }

    pub fn cache(&self) -> &ProductCache {
        &self.cache
    }

    /// Validate and store a new product
    pub async fn create(&self, request: ProductCreate) -> Result<Product> {
        let request = Self::validate(request)?;
        let product = self.repository.create(&request).await?;
        self.cache.invalidate().await;

        Ok(product)
    }

    pub async fn get(&self, product_id: i64) -> Result<Product> {
        self.repository
            .find_by_id(product_id)
            .await?
            .ok_or(ApiError::ProductNotFound { product_id })
    }

    /// Replace all fields of an existing product
    pub async fn update(&self, product_id: i64, request: ProductUpdate) -> Result<Product> {
        let request = Self::validate(request)?;
        let product = self
            .repository
            .update(product_id, &request)
            .await?
            .ok_or(ApiError::ProductNotFound { product_id })?;
        self.cache.invalidate().await;

        Ok(product)
    }

    pub async fn delete(&self, product_id: i64) -> Result<()> {
        if !self.repository.delete(product_id).await? {
            return Err(ApiError::ProductNotFound { product_id });
        }
        self.cache.invalidate().await;

        Ok(())
    }

    /// Filtered, sorted, and paginated listing
    pub async fn list(&self, params: ProductQueryParams) -> Result<Vec<Product>> {
        let filter = Self::build_filter(params)?;
        self.repository.list(&filter).await
    }

    pub async fn list_all(&self) -> Result<Vec<Product>> {
        self.repository.list_all().await
    }

    /// Full product list served from the snapshot cache
    pub async fn cached_products(&self) -> Result<Arc<Vec<Product>>> {
        let repository = self.repository.clone();
        self.cache
            .get_or_load(|| async move { repository.list_all().await })
            .await
    }

    /// Time `iterations` reads of the cached product list
    pub async fn benchmark(&self, iterations: usize) -> Result<Duration> {
        let products = self.cached_products().await?;

        let start = Instant::now();
        for _ in 0..iterations {
            std::hint::black_box(products.as_slice());
        }
        let elapsed = start.elapsed();

        log_performance_metric("product_list_read", elapsed.as_secs_f64(), "seconds");
        Ok(elapsed)
    }

    /// Turn raw query parameters into a validated repository filter
    pub fn build_filter(params: ProductQueryParams) -> Result<ProductFilter> {
        let sort_by = match params.sort_by.as_deref() {
            Some(raw) => {
                let column = validate_sort_parameter(raw, &SortField::ALLOWED)?;
                SortField::from_column(column).unwrap_or_default()
            }
            None => SortField::default(),
        };

        let sort_order = match params.sort_order.as_deref() {
            Some(raw) if validate_sort_order(raw)? == "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        };

        let skip = params.skip.unwrap_or(0);
        if skip < 0 {
            return Err(ApiError::InvalidInput("skip must be greater than or equal to 0".to_string()));
        }

        let limit = params.limit.unwrap_or(ProductFilter::DEFAULT_LIMIT);
        if !(1..=ProductFilter::MAX_LIMIT).contains(&limit) {
            return Err(ApiError::InvalidInput(format!(
                "limit must be between 1 and {}",
                ProductFilter::MAX_LIMIT
            )));
        }

        for bound in [params.min_price, params.max_price].into_iter().flatten() {
            if !bound.is_finite() {
                return Err(ApiError::InvalidInput("Price filters must be numbers".to_string()));
            }
        }

        let filter = ProductFilter {
            min_price: params.min_price,
            max_price: params.max_price,
            sort_by,
            sort_order,
            skip,
            limit,
        };
        debug!(filter = ?filter, "Product filter built");

        Ok(filter)
    }

    fn validate(request: ProductCreate) -> Result<ProductCreate> {
        let name = sanitize_string(&request.name, MAX_NAME_LENGTH);
        if name.is_empty() {
            return Err(ApiError::InvalidInput("Product name cannot be empty".to_string()));
        }

        Ok(ProductCreate {
            name,
            description: sanitize_string(&request.description, MAX_DESCRIPTION_LENGTH),
            price: validate_price(request.price)?,
            quantity: validate_quantity(request.quantity)?,
        })
    }
}
