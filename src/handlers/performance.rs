//! Latency and caching demonstration endpoints

use std::time::Duration;

use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::middleware::CurrentUser;
use crate::models::{BenchmarkResponse, Product};
use crate::services::product::BENCHMARK_ITERATIONS;
use crate::utils::errors::Result;

/// Simulated I/O latency of `/async-products`
pub const ASYNC_IO_DELAY: Duration = Duration::from_millis(100);

/// Wait on simulated I/O without holding a worker thread, then list products
pub async fn async_products(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Product>>> {
    tokio::time::sleep(ASYNC_IO_DELAY).await;
    Ok(Json(state.services.products.list_all().await?))
}

pub async fn cached_products(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Product>>> {
    let products = state.services.products.cached_products().await?;
    Ok(Json(products.as_ref().clone()))
}

pub async fn benchmark(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<BenchmarkResponse>> {
    let elapsed = state.services.products.benchmark(BENCHMARK_ITERATIONS).await?;

    Ok(Json(BenchmarkResponse {
        message: "Benchmark completed".to_string(),
        time_taken_seconds: elapsed.as_secs_f64(),
    }))
}
