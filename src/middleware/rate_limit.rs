//! Rate limiting middleware
//!
//! This module provides per-client request limits for the API routes and a
//! sliding-window tracker that reports clients hammering a single endpoint.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::num::NonZeroU32;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, Method, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use governor::clock::{Clock, DefaultClock};
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};
use tracing::{debug, info, warn};

use crate::app::AppState;
use crate::config::RateLimitConfig;
use crate::utils::errors::{ApiError, Result};

type KeyedLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

/// Route groups that share a request budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitScope {
    Signup,
    Login,
    ProductWrites,
    ProductReads,
}

impl RateLimitScope {
    /// Map a request onto the budget it draws from, if any
    pub fn classify(method: &Method, path: &str) -> Option<Self> {
        let product_route = path == "/products" || path.starts_with("/products/");

        match (method, path) {
            (&Method::POST, "/signup") => Some(RateLimitScope::Signup),
            (&Method::POST, "/token") => Some(RateLimitScope::Login),
            (&Method::GET, "/async-products" | "/cached-products") => Some(RateLimitScope::ProductReads),
            (&Method::GET, _) if product_route => Some(RateLimitScope::ProductReads),
            (&Method::POST | &Method::PUT | &Method::DELETE, _) if product_route => {
                Some(RateLimitScope::ProductWrites)
            }
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RateLimitScope::Signup => "signup",
            RateLimitScope::Login => "login",
            RateLimitScope::ProductWrites => "products",
            RateLimitScope::ProductReads => "get_products",
        }
    }
}

struct ScopedLimiter {
    per_minute: u32,
    limiter: KeyedLimiter,
}

impl ScopedLimiter {
    fn new(per_minute: u32) -> Result<Self> {
        let burst = NonZeroU32::new(per_minute)
            .ok_or_else(|| ApiError::Config("Rate limits must be greater than 0".to_string()))?;

        Ok(Self {
            per_minute,
            limiter: RateLimiter::keyed(Quota::per_minute(burst)),
        })
    }
}

/// Per-client limiter for every scope
pub struct RateLimitMiddleware {
    enabled: bool,
    limiters: HashMap<RateLimitScope, ScopedLimiter>,
}

impl RateLimitMiddleware {
    /// Create a new RateLimitMiddleware instance
    pub fn new(config: &RateLimitConfig) -> Result<Self> {
        let limiters = HashMap::from([
            (RateLimitScope::Signup, ScopedLimiter::new(config.signup_per_minute)?),
            (RateLimitScope::Login, ScopedLimiter::new(config.login_per_minute)?),
            (RateLimitScope::ProductWrites, ScopedLimiter::new(config.product_writes_per_minute)?),
            (RateLimitScope::ProductReads, ScopedLimiter::new(config.product_reads_per_minute)?),
        ]);

        Ok(Self {
            enabled: config.enabled,
            limiters,
        })
    }

    /// Check if a client may make one more request in `scope`
    pub fn check(&self, scope: RateLimitScope, client: &str) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let Some(scoped) = self.limiters.get(&scope) else {
            return Ok(());
        };

        match scoped.limiter.check_key(&client.to_string()) {
            Ok(()) => {
                debug!(client = client, scope = scope.as_str(), "Rate limit check passed");
                Ok(())
            }
            Err(not_until) => {
                let wait = not_until.wait_time_from(DefaultClock::default().now());
                warn!(client = client, scope = scope.as_str(), "Rate limit exceeded");
                Err(ApiError::RateLimitExceeded {
                    limit: format!("{} per 1 minute", scoped.per_minute),
                    retry_after_secs: wait.as_secs().max(1),
                })
            }
        }
    }

    /// Drop limiter state for clients that have fully recovered their budget
    pub fn cleanup_old_entries(&self) {
        for scoped in self.limiters.values() {
            scoped.limiter.retain_recent();
            scoped.limiter.shrink_to_fit();
        }

        let remaining: usize = self.limiters.values().map(|s| s.limiter.len()).sum();
        debug!(remaining_entries = remaining, "Cleaned up old rate limit entries");
    }
}

/// Sliding one-minute window of request times per client and endpoint
pub struct SuspiciousActivityTracker {
    threshold: usize,
    window: Duration,
    request_times: Mutex<HashMap<String, Vec<Instant>>>,
}

impl SuspiciousActivityTracker {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            window: Duration::from_secs(60),
            request_times: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request and report whether the client exceeded the threshold
    pub fn check_suspicious_activity(&self, ip_address: &str, endpoint: &str) -> bool {
        let key = format!("{}:{}", ip_address, endpoint);
        let now = Instant::now();

        let mut request_times = self.request_times.lock().unwrap_or_else(|e| e.into_inner());
        let times = request_times.entry(key).or_default();
        times.retain(|&t| now.duration_since(t) < self.window);
        times.push(now);

        if times.len() > self.threshold {
            warn!(
                ip_address = ip_address,
                endpoint = endpoint,
                requests = times.len(),
                "Suspicious activity detected: {} requests from {} to {} in 1 minute",
                times.len(),
                ip_address,
                endpoint
            );
            return true;
        }

        false
    }

    /// Remove keys with no requests inside the window
    pub fn cleanup_old_entries(&self) -> usize {
        let now = Instant::now();
        let mut request_times = self.request_times.lock().unwrap_or_else(|e| e.into_inner());
        let before = request_times.len();

        request_times.retain(|_, times| {
            times.retain(|&t| now.duration_since(t) < self.window);
            !times.is_empty()
        });

        let removed = before - request_times.len();
        if removed > 0 {
            info!(removed = removed, "Pruned idle activity windows");
        }
        removed
    }

    pub fn tracked_keys(&self) -> usize {
        self.request_times.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Client address: socket peer, then the first `X-Forwarded-For` hop
pub fn client_ip(request: &Request<Body>) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    forwarded_for(request.headers()).unwrap_or_else(|| "unknown".to_string())
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if let Some(scope) = RateLimitScope::classify(request.method(), request.uri().path()) {
        let client = client_ip(&request);
        if let Err(e) = state.rate_limiter.check(scope, &client) {
            return e.into_response();
        }
    }

    next.run(request).await
}
