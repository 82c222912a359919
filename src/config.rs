//! Configuration Module
//!
//! Handles loading and managing facade configuration from environment variables.

use std::env;
use std::time::Duration;

/// Cache facade configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Redis connection URL
    pub redis_url: String,
    /// Maximum number of pooled Redis connections
    pub pool_size: usize,
    /// Namespace prefix prepended to every key written through the facade
    pub namespace: String,
    /// TTL in seconds applied to every write; 0 means entries never expire
    pub ttl_seconds: u64,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `REDIS_URL` - Redis connection URL (default: "redis://127.0.0.1:6379")
    /// - `REDIS_POOL_SIZE` - Maximum pooled connections (default: 16)
    /// - `CACHE_NAMESPACE` - Key namespace prefix (default: "cache:")
    /// - `CACHE_TTL` - TTL in seconds, 0 disables expiry (default: 300)
    pub fn from_env() -> Self {
        Self {
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            pool_size: env::var("REDIS_POOL_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(16),
            namespace: env::var("CACHE_NAMESPACE").unwrap_or_else(|_| "cache:".to_string()),
            ttl_seconds: env::var("CACHE_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }

    /// Returns the configured TTL as a `Duration`, or `None` when expiry
    /// is disabled (`ttl_seconds == 0`).
    pub fn ttl(&self) -> Option<Duration> {
        if self.ttl_seconds == 0 {
            None
        } else {
            Some(Duration::from_secs(self.ttl_seconds))
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://127.0.0.1:6379".to_string(),
            pool_size: 16,
            namespace: "cache:".to_string(),
            ttl_seconds: 300,
        }
    }
}
