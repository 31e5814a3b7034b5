//! Cross-request cache of route display names.
//!
//! Route metadata changes rarely, so a resolved display name is reused
//! across boards until its TTL lapses. Only successful names are stored:
//! an upstream failure is retried on the next board instead of being
//! remembered.

use std::time::Duration;

use moka::future::Cache as MokaCache;

/// Configuration for the route-name cache.
#[derive(Debug, Clone)]
pub struct RouteCacheConfig {
    /// TTL for cached names.
    pub ttl: Duration,

    /// Maximum number of cached names.
    pub max_capacity: u64,
}

impl Default for RouteCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            max_capacity: 256,
        }
    }
}

/// Service code → display name.
///
/// Cloning shares the underlying cache.
#[derive(Clone)]
pub struct RouteNameCache {
    names: MokaCache<String, String>,
}

impl RouteNameCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &RouteCacheConfig) -> Self {
        let names = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { names }
    }

    /// Get a cached display name.
    pub async fn get(&self, code: &str) -> Option<String> {
        self.names.get(code).await
    }

    /// Insert a display name.
    pub async fn insert(&self, code: &str, name: String) {
        self.names.insert(code.to_string(), name).await;
    }

    /// Get cache statistics (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.names.entry_count()
    }

    /// Invalidate all cached names.
    pub fn invalidate_all(&self) {
        self.names.invalidate_all();
    }
}

impl std::fmt::Debug for RouteNameCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteNameCache")
            .field("entries", &self.names.entry_count())
            .finish()
    }
}
