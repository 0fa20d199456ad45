//! Product snapshot cache
//!
//! Holds one read-through snapshot of the full product list. Every write
//! through the product service invalidates it.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use tracing::debug;

use crate::models::Product;
use crate::utils::errors::Result;

#[derive(Debug)]
struct Snapshot {
    products: Arc<Vec<Product>>,
    loaded_at: Instant,
}

#[derive(Debug, Default)]
struct CacheInner {
    slot: RwLock<Option<Snapshot>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

/// Cache hit/miss counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Clone)]
pub struct ProductCache {
    ttl: Duration,
    inner: Arc<CacheInner>,
}

impl ProductCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Arc::new(CacheInner::default()),
        }
    }

    /// Return the cached snapshot, loading it when absent or older than the TTL
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<Arc<Vec<Product>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<Product>>>,
    {
        if let Some(products) = self.fresh_snapshot().await {
            self.inner.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(products);
        }

        let mut slot = self.inner.slot.write().await;
        // Another task may have refilled the slot while we waited for the lock
        if let Some(snapshot) = slot.as_ref().filter(|s| s.loaded_at.elapsed() < self.ttl) {
            self.inner.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(snapshot.products.clone());
        }

        self.inner.misses.fetch_add(1, Ordering::Relaxed);
        let products = Arc::new(load().await?);
        debug!(count = products.len(), "Product cache refilled");
        *slot = Some(Snapshot {
            products: products.clone(),
            loaded_at: Instant::now(),
        });

        Ok(products)
    }

    /// Current snapshot if it is still within the TTL
    pub async fn peek(&self) -> Option<Arc<Vec<Product>>> {
        self.fresh_snapshot().await
    }

    /// Drop the snapshot so the next read reloads it
    pub async fn invalidate(&self) {
        let mut slot = self.inner.slot.write().await;
        if slot.take().is_some() {
            debug!("Product cache invalidated");
        }
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.inner.hits.load(Ordering::Relaxed),
            misses: self.inner.misses.load(Ordering::Relaxed),
        }
    }

    async fn fresh_snapshot(&self) -> Option<Arc<Vec<Product>>> {
        let slot = self.inner.slot.read().await;
        slot.as_ref()
            .filter(|s| s.loaded_at.elapsed() < self.ttl)
            .map(|s| s.products.clone())
    }
}
