//! Error types for the cache facade
//!
//! Provides unified error handling using thiserror.
//!
//! Two families of errors exist. Operations that never involve a loader
//! (`get_if_present`, `put`, `put_all`, `invalidate`, `invalidate_all`)
//! surface [`CacheError`], which passes store and codec failures through
//! untouched. Load-triggering operations (`get`, `get_with`, `get_all`)
//! surface [`LoadError`], which unifies every underlying cause (loader,
//! store, or codec failure) into a single type with the original cause
//! preserved.

use thiserror::Error;

// == Store Error Enum ==
/// Errors raised by a [`Store`](crate::store::Store) backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A connection could not be acquired from the pool
    #[error("connection unavailable: {0}")]
    Connection(String),

    /// A store command failed after a connection was acquired
    #[error("store command failed: {0}")]
    Command(String),
}

// == Codec Error Enum ==
/// Errors raised by a [`Codec`](crate::codec::Codec) implementation.
#[derive(Error, Debug)]
pub enum CodecError {
    /// A key or value could not be encoded to bytes
    #[error("encode failed: {0}")]
    Encode(String),

    /// Stored bytes could not be decoded back into a value
    #[error("decode failed: {0}")]
    Decode(String),
}

// == Cache Error Enum ==
/// Error type for cache operations that do not involve a loader.
///
/// Store-client errors propagate as-is; there is no loader to unify against.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The store backend failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Key or value (de)serialization failed
    #[error(transparent)]
    Codec(#[from] CodecError),
}

// == Load Error Enum ==
/// Unified error type for load-triggering operations.
///
/// Callers of `get`, `get_with` and `get_all` always observe this single
/// type regardless of whether the underlying failure came from the loader,
/// the store, or a codec.
///
/// Loader panics are not caught; they unwind through the facade like any
/// other Rust panic. Cancellation is expressed by dropping the future, so
/// there is no interrupted variant.
#[derive(Error, Debug)]
pub enum LoadError {
    /// A loader reported success without producing a value, or a bulk
    /// loader produced no mapping at all. The message names the offending
    /// key(s).
    #[error("loader returned no value: {0}")]
    InvalidLoad(String),

    /// A load-triggering operation was called on a facade constructed
    /// without a loader. This is a usage error, not a cache miss.
    #[error("no loader bound to this cache")]
    LoaderMissing,

    /// The loader itself failed; the original cause is preserved
    #[error("loader failed")]
    Loader(#[source] anyhow::Error),

    /// The store or a codec failed during a load-through path
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl From<StoreError> for LoadError {
    fn from(err: StoreError) -> Self {
        LoadError::Cache(CacheError::Store(err))
    }
}

impl From<CodecError> for LoadError {
    fn from(err: CodecError) -> Self {
        LoadError::Cache(CacheError::Codec(err))
    }
}
