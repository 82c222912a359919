//! Loader Module
//!
//! Caller-supplied capability that computes values the store does not have.

use std::collections::HashMap;

use async_trait::async_trait;

// == Loader Trait ==
/// Computes a value for a single key, or for a set of keys in bulk.
///
/// Bulk loading is an explicitly optional operation: implementations that
/// can batch their lookups override [`supports_bulk`](Loader::supports_bulk)
/// to return `true` and provide [`load_all`](Loader::load_all). The facade
/// checks `supports_bulk` directly and falls back to per-key loads when it
/// returns `false`; `load_all` is never invoked in that case.
///
/// A loader returning `Ok(None)` means "I have no value for this key". The
/// facade treats that as an invalid load, never as a cacheable result.
///
/// Loaders should be idempotent: the facade performs no single-flight
/// de-duplication, so concurrent misses on the same key each invoke the
/// loader independently.
#[async_trait]
pub trait Loader<K, V>: Send + Sync {
    /// Loads the value for a single key.
    ///
    /// Any failure is reported through `anyhow::Error`; the facade wraps it
    /// and preserves the cause.
    async fn load(&self, key: &K) -> anyhow::Result<Option<V>>;

    /// Whether this loader supports bulk loading.
    fn supports_bulk(&self) -> bool {
        false
    }

    /// Loads values for a set of keys in one batch.
    ///
    /// Only invoked when [`supports_bulk`](Loader::supports_bulk) returns
    /// `true`. Returning `Ok(None)` means the loader produced no mapping at
    /// all, which the facade rejects as an invalid load. A returned mapping
    /// must cover every requested key; missing entries fail the overall call
    /// after the values that were returned have been written through.
    async fn load_all(&self, keys: &[K]) -> anyhow::Result<Option<HashMap<K, V>>>
    where
        K: Sync,
    {
        let _ = keys;
        Ok(None)
    }
}
