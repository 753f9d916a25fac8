// src/api/middleware/rate_limit.rs
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{web, Error, HttpResponse, ResponseError};
use chrono::Utc;
use futures::future::{ready, LocalBoxFuture, Ready};
use log::warn;
use moka::sync::Cache;
use thiserror::Error;

use crate::api::types::RateLimitResponse;
use crate::api::utils::client_ip;
use crate::core::config::RateLimitConfig;

/// Seconds a throttled client is told to wait; one fixed window.
pub const RETRY_AFTER_SECONDS: u64 = 60;

/// Fixed-window counters keyed by client IP and minute, backed by an
/// in-memory cache whose entries outlive the window they count and then
/// expire on their own.
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    requests: Cache<String, Arc<AtomicU64>>,
    generated: Cache<String, Arc<AtomicU64>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let build = || {
            Cache::builder()
                .max_capacity(100_000)
                .time_to_live(Duration::from_secs(2 * RETRY_AFTER_SECONDS))
                .build()
        };
        Self {
            config,
            requests: build(),
            generated: build(),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn counter(cache: &Cache<String, Arc<AtomicU64>>, client: &str) -> Arc<AtomicU64> {
        let window = Utc::now().format("%Y-%m-%d-%H-%M");
        let key = format!("{client}:{window}");
        cache.get_with(key, || Arc::new(AtomicU64::new(0)))
    }

    /// Counts one request against the client's budget for the current
    /// window. Returns false once the budget is spent.
    pub fn allow_request(&self, client: &str) -> bool {
        if !self.config.enabled {
            return true;
        }
        let counter = Self::counter(&self.requests, client);
        counter.fetch_add(1, Ordering::Relaxed) < self.config.requests_per_minute
    }

    /// Reserves `chars` generated characters against the client's volume
    /// budget. Reserves nothing when the request would overflow it.
    pub fn reserve_chars(&self, client: &str, chars: u64) -> bool {
        if !self.config.enabled {
            return true;
        }
        let counter = Self::counter(&self.generated, client);
        let mut used = counter.load(Ordering::Relaxed);
        loop {
            if used + chars > self.config.chars_per_minute {
                return false;
            }
            match counter.compare_exchange(
                used,
                used + chars,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(actual) => used = actual,
            }
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct RateLimitExceeded {
    pub error: &'static str,
    pub message: String,
}

impl ResponseError for RateLimitExceeded {
    fn status_code(&self) -> StatusCode {
        StatusCode::TOO_MANY_REQUESTS
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::TooManyRequests().json(RateLimitResponse {
            success: false,
            error: self.error.to_string(),
            message: self.message.clone(),
            retry_after: RETRY_AFTER_SECONDS,
        })
    }
}

/// Middleware enforcing the per-request budget on every route it wraps.
/// The limiter itself is picked up from app data, so test setups without
/// one simply pass through.
pub struct RequestBudget;

impl<S, B> Transform<S, ServiceRequest> for RequestBudget
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestBudgetMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestBudgetMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequestBudgetMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestBudgetMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let limiter = req.app_data::<web::Data<RateLimiter>>().cloned();

        Box::pin(async move {
            if let Some(limiter) = limiter {
                let client = client_ip(req.request());
                if !limiter.allow_request(&client) {
                    warn!("request budget exhausted for client {}", client);
                    return Err(RateLimitExceeded {
                        error: "Rate limit exceeded",
                        message: format!(
                            "Too many requests. Limit: {} per minute.",
                            limiter.config().requests_per_minute
                        ),
                    }
                    .into());
                }
            }
            service.call(req).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(requests: u64, chars: u64) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            enabled: true,
            requests_per_minute: requests,
            chars_per_minute: chars,
        })
    }

    #[test]
    fn request_budget_is_per_client() {
        let limiter = limiter(2, 1000);
        assert!(limiter.allow_request("10.0.0.1"));
        assert!(limiter.allow_request("10.0.0.1"));
        assert!(!limiter.allow_request("10.0.0.1"));
        // A different client has its own window.
        assert!(limiter.allow_request("10.0.0.2"));
    }

    #[test]
    fn volume_budget_reserves_nothing_on_overflow() {
        let limiter = limiter(100, 50);
        assert!(limiter.reserve_chars("10.0.0.1", 30));
        assert!(!limiter.reserve_chars("10.0.0.1", 30));
        // The failed reservation did not consume the remaining budget.
        assert!(limiter.reserve_chars("10.0.0.1", 20));
    }

    #[test]
    fn disabled_limiter_allows_everything() {
        let limiter = RateLimiter::new(RateLimitConfig {
            enabled: false,
            requests_per_minute: 0,
            chars_per_minute: 0,
        });
        for _ in 0..10 {
            assert!(limiter.allow_request("10.0.0.1"));
            assert!(limiter.reserve_chars("10.0.0.1", 1000));
        }
    }
}
