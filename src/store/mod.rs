//! Store Module
//!
//! Byte-oriented key-value store capability consumed by the facade.
//!
//! The facade never talks to a concrete backend directly; it goes through
//! the [`Store`] trait so the Redis adapter and the in-process test store
//! are interchangeable.

mod memory;
mod redis;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::StoreError;

// Re-export public types
pub use memory::MemoryStore;
pub use redis::RedisStore;

// == Store Trait ==
/// Raw byte key-value operations against a remote (or in-process) store.
///
/// Connection lifecycle is the implementation's responsibility: each call
/// acquires whatever resources it needs and releases them on every exit
/// path before returning.
#[async_trait]
pub trait Store: Send + Sync {
    /// Reads a single key. Absence is `Ok(None)`, never an error.
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Reads many keys in one round trip.
    ///
    /// The reply has exactly one slot per requested key, in request order,
    /// with `None` marking absent entries.
    async fn get_many(&self, keys: &[Vec<u8>]) -> Result<Vec<Option<Vec<u8>>>, StoreError>;

    /// Writes a single key. When `ttl` is set, the value and its expiry are
    /// applied atomically.
    async fn set(&self, key: &[u8], value: &[u8], ttl: Option<Duration>)
        -> Result<(), StoreError>;

    /// Writes many entries in one round trip. When `ttl` is set, expiry is
    /// applied to every written key within the same batch.
    async fn set_many(
        &self,
        entries: &[(Vec<u8>, Vec<u8>)],
        ttl: Option<Duration>,
    ) -> Result<(), StoreError>;

    /// Sets or refreshes the expiry of an existing key. A no-op for keys
    /// that do not exist.
    async fn expire(&self, key: &[u8], ttl: Duration) -> Result<(), StoreError>;

    /// Deletes a single key. Deleting an absent key is a no-op.
    async fn delete(&self, key: &[u8]) -> Result<(), StoreError>;

    /// Deletes many keys in one round trip.
    async fn delete_many(&self, keys: &[Vec<u8>]) -> Result<(), StoreError>;
}
