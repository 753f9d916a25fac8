// src/core/config.rs
use std::env;
use std::str::FromStr;

/// Runtime settings for the HTTP service, loaded from the environment (after
/// `dotenvy` has populated it from `.env`). Generation bounds and charsets
/// are compile-time constants and deliberately not configurable here.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub cors_enabled: bool,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Requests allowed per client per minute window.
    pub requests_per_minute: u64,
    /// Generated password characters allowed per client per minute window.
    pub chars_per_minute: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            cors_enabled: true,
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_minute: 60,
            chars_per_minute: 10_000,
        }
    }
}

impl ServerConfig {
    pub fn load() -> Self {
        let defaults = Self::default();
        Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port: env_parse("PORT", defaults.port),
            cors_enabled: env_parse("CORS_ENABLED", defaults.cors_enabled),
            rate_limit: RateLimitConfig {
                enabled: env_parse("RATE_LIMIT_ENABLED", defaults.rate_limit.enabled),
                requests_per_minute: env_parse(
                    "RATE_LIMIT_REQUESTS_PER_MINUTE",
                    defaults.rate_limit.requests_per_minute,
                ),
                chars_per_minute: env_parse(
                    "RATE_LIMIT_CHARS_PER_MINUTE",
                    defaults.rate_limit.chars_per_minute,
                ),
            },
        }
    }
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}
