//! Loadcache - a load-through cache facade backed by Redis
//!
//! Presents a conventional get-or-compute cache contract over a remote,
//! shared key-value store: check the store, compute on miss through a
//! caller-supplied loader, write the result back, return it. The facade
//! owns key namespacing, TTL expiration, on-the-wire codecs and a precise
//! partial-failure contract for bulk loads; all cached state lives in the
//! external store.
//!
//! ```no_run
//! use std::sync::Arc;
//! use loadcache::{CacheConfig, JsonCodec, RedisStore, RemoteCache};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = CacheConfig::from_env();
//! let store = Arc::new(RedisStore::connect(&config)?);
//!
//! let cache: RemoteCache<String, String> = RemoteCache::new(
//!     store,
//!     Arc::new(JsonCodec),
//!     Arc::new(JsonCodec),
//!     config.namespace.clone(),
//!     config.ttl(),
//! );
//!
//! cache.put(&"greeting".to_string(), &"hello".to_string()).await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod codec;
pub mod config;
pub mod error;
pub mod loader;
pub mod store;

pub use cache::RemoteCache;
pub use codec::{Codec, JsonCodec, MsgPackCodec};
pub use config::CacheConfig;
pub use error::{CacheError, CodecError, LoadError, StoreError};
pub use loader::Loader;
pub use store::{MemoryStore, RedisStore, Store};
