//! Cache Facade Module
//!
//! [`RemoteCache`] presents a conventional get-or-compute cache contract
//! backed by a remote, shared key-value store rather than local memory.
//! It owns key namespacing, TTL application, and the error and
//! partial-failure policy; all storage lives in the external store and the
//! facade holds no cached state between calls.

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::codec::Codec;
use crate::error::{CacheError, LoadError};
use crate::loader::Loader;
use crate::store::Store;

// == Sequential Load Outcome ==
/// Result of the per-key fallback loop in [`RemoteCache::get_all`].
///
/// The loop's outcome is carried as a value so that persisting the
/// collected entries is an explicit step that happens before any failure
/// is raised, not a side effect of unwinding.
struct SequentialOutcome<K, V> {
    /// Values loaded successfully, in request order
    collected: Vec<(K, V)>,
    /// First key whose load produced no value; recorded, not raised, so the
    /// loop keeps going
    missing: Option<K>,
    /// Loader error that stopped the loop
    error: Option<anyhow::Error>,
}

// == Remote Cache ==
/// Load-through cache facade over a byte-oriented remote store.
///
/// A `RemoteCache` is an immutable configuration value: a store handle, two
/// codecs, a namespace prefix, an optional TTL and an optional loader. It
/// has no mutable state of its own, so it is `Clone` and safe for
/// concurrent use without locking.
///
/// Every key sent to the store is the namespace prefix concatenated with
/// the encoded key, so two facades with different prefixes over the same
/// store never observe each other's entries.
///
/// There is no single-flight de-duplication: two tasks that concurrently
/// miss on the same key both invoke the loader and both write the result,
/// last writer wins. Loaders are expected to be idempotent.
pub struct RemoteCache<K, V> {
    store: Arc<dyn Store>,
    key_codec: Arc<dyn Codec<K>>,
    value_codec: Arc<dyn Codec<V>>,
    prefix: Vec<u8>,
    ttl: Option<Duration>,
    loader: Option<Arc<dyn Loader<K, V>>>,
}

impl<K, V> Clone for RemoteCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key_codec: Arc::clone(&self.key_codec),
            value_codec: Arc::clone(&self.value_codec),
            prefix: self.prefix.clone(),
            ttl: self.ttl,
            loader: self.loader.clone(),
        }
    }
}

impl<K, V> RemoteCache<K, V>
where
    K: Hash + Eq + Clone + Debug + Send + Sync,
    V: Send + Sync,
{
    // == Constructor ==
    /// Creates a facade without a loader.
    ///
    /// Load-triggering operations (`get`, `get_all`, `refresh`) require a
    /// loader; on a facade built this way they fail with
    /// [`LoadError::LoaderMissing`].
    ///
    /// # Arguments
    /// * `store` - The byte-oriented store backend
    /// * `key_codec` / `value_codec` - Independent wire encodings for keys and values
    /// * `prefix` - Namespace prefix prepended to every encoded key
    /// * `ttl` - Expiry applied to every write; `None` means entries never expire
    pub fn new(
        store: Arc<dyn Store>,
        key_codec: Arc<dyn Codec<K>>,
        value_codec: Arc<dyn Codec<V>>,
        prefix: impl Into<Vec<u8>>,
        ttl: Option<Duration>,
    ) -> Self {
        Self {
            store,
            key_codec,
            value_codec,
            prefix: prefix.into(),
            ttl,
            loader: None,
        }
    }

    /// Binds a loader, enabling the load-through operations.
    pub fn with_loader(mut self, loader: Arc<dyn Loader<K, V>>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// The expiry applied to writes through this facade.
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    // == Key Encoding ==
    /// Encodes a key and prepends the namespace prefix.
    fn namespaced(&self, key: &K) -> Result<Vec<u8>, CacheError> {
        let encoded = self.key_codec.encode(key)?;
        let mut wire_key = Vec::with_capacity(self.prefix.len() + encoded.len());
        wire_key.extend_from_slice(&self.prefix);
        wire_key.extend_from_slice(&encoded);
        Ok(wire_key)
    }

    /// Encodes a batch of entries into namespaced wire pairs.
    fn encode_pairs<'a>(
        &self,
        entries: impl IntoIterator<Item = (&'a K, &'a V)>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, CacheError>
    where
        K: 'a,
        V: 'a,
    {
        entries
            .into_iter()
            .map(|(key, value)| Ok((self.namespaced(key)?, self.value_codec.encode(value)?)))
            .collect()
    }

    // == Single-Key Read ==
    /// Reads a single key from the store without triggering a load.
    ///
    /// Absence is `Ok(None)`, never an error. One store round trip, no
    /// writes.
    pub async fn get_if_present(&self, key: &K) -> Result<Option<V>, CacheError> {
        let wire_key = self.namespaced(key)?;
        match self.store.get(&wire_key).await? {
            Some(bytes) => {
                debug!(key = ?key, "cache hit");
                Ok(Some(self.value_codec.decode(&bytes)?))
            }
            None => {
                debug!(key = ?key, "cache miss");
                Ok(None)
            }
        }
    }

    // == Load-Through Single-Key Read ==
    /// Reads a single key, invoking the bound loader on a miss and writing
    /// the result back before returning it.
    pub async fn get(&self, key: &K) -> Result<V, LoadError> {
        match &self.loader {
            Some(loader) => self.get_with(key, loader.load(key)).await,
            None => Err(LoadError::LoaderMissing),
        }
    }

    /// Reads a single key, running the given loading future on a miss.
    ///
    /// A loading future that resolves to `Ok(None)` is an invalid load:
    /// nothing is written and the call fails naming the key. Otherwise the
    /// loaded value is written back (with this facade's TTL) and returned.
    pub async fn get_with<F>(&self, key: &K, init: F) -> Result<V, LoadError>
    where
        F: Future<Output = anyhow::Result<Option<V>>> + Send,
    {
        if let Some(value) = self.get_if_present(key).await? {
            return Ok(value);
        }

        let loaded = init.await.map_err(LoadError::Loader)?;
        let value = loaded.ok_or_else(|| LoadError::InvalidLoad(format!("key={key:?}")))?;

        self.put(key, &value).await?;
        Ok(value)
    }

    // == Bulk Read ==
    /// Reads many keys in one store round trip, regardless of input size.
    ///
    /// Duplicates are allowed. Absent keys are omitted from the result;
    /// their reply slots are never decoded.
    pub async fn get_all_present(&self, keys: &[K]) -> Result<HashMap<K, V>, CacheError> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }

        let wire_keys = keys
            .iter()
            .map(|key| self.namespaced(key))
            .collect::<Result<Vec<_>, _>>()?;
        let replies = self.store.get_many(&wire_keys).await?;

        let mut present = HashMap::new();
        for (key, reply) in keys.iter().zip(replies) {
            if let Some(bytes) = reply {
                present.insert(key.clone(), self.value_codec.decode(&bytes)?);
            }
        }
        Ok(present)
    }

    // == Bulk Read With Load-Through ==
    /// Reads many keys, loading and writing back whatever the store does
    /// not have.
    ///
    /// Residual keys (requested but not present) are loaded in one batch
    /// when the loader supports bulk loading, and one at a time in request
    /// order otherwise. On either path, values the loader did produce are
    /// persisted before any failure is raised, so a partial bulk load is
    /// never thrown away.
    pub async fn get_all(&self, keys: &[K]) -> Result<HashMap<K, V>, LoadError> {
        let mut result = self.get_all_present(keys).await?;

        // Residual keys: requested minus satisfied, de-duplicated,
        // request order preserved.
        let mut seen = HashSet::new();
        let residual: Vec<K> = keys
            .iter()
            .filter(|key| !result.contains_key(*key) && seen.insert((*key).clone()))
            .cloned()
            .collect();
        if residual.is_empty() {
            return Ok(result);
        }

        let loader = self.loader.as_ref().ok_or(LoadError::LoaderMissing)?;

        if loader.supports_bulk() {
            let loaded = loader.load_all(&residual).await.map_err(LoadError::Loader)?;
            let mut loaded = loaded
                .ok_or_else(|| LoadError::InvalidLoad("bulk loader returned no mapping".into()))?;

            // Persist everything the loader returned before checking
            // coverage; a partial mapping is already durable when the
            // coverage check below fails.
            self.put_all(&loaded).await?;

            for key in &residual {
                match loaded.remove(key) {
                    Some(value) => {
                        result.insert(key.clone(), value);
                    }
                    None => {
                        return Err(LoadError::InvalidLoad(format!(
                            "bulk load missing value for key={key:?}"
                        )));
                    }
                }
            }
            Ok(result)
        } else {
            let outcome = Self::load_sequentially(loader.as_ref(), &residual).await;

            // Write what succeeded, then decide whether to fail.
            let pairs = self.encode_pairs(outcome.collected.iter().map(|(k, v)| (k, v)))?;
            self.store.set_many(&pairs, self.ttl).await?;

            // A missing value takes reporting precedence over a loader
            // error recorded later in the loop.
            if let Some(key) = outcome.missing {
                return Err(LoadError::InvalidLoad(format!("key={key:?}")));
            }
            if let Some(error) = outcome.error {
                return Err(LoadError::Loader(error));
            }

            result.extend(outcome.collected);
            Ok(result)
        }
    }

    /// Per-key fallback used when the loader declares bulk loading
    /// unsupported.
    ///
    /// A key with no value is recorded and the loop continues; a loader
    /// error stops the loop immediately, leaving later keys unattempted.
    async fn load_sequentially(
        loader: &dyn Loader<K, V>,
        keys: &[K],
    ) -> SequentialOutcome<K, V> {
        let mut outcome = SequentialOutcome {
            collected: Vec::new(),
            missing: None,
            error: None,
        };

        for key in keys {
            match loader.load(key).await {
                Ok(Some(value)) => outcome.collected.push((key.clone(), value)),
                Ok(None) => {
                    if outcome.missing.is_none() {
                        outcome.missing = Some(key.clone());
                    }
                }
                Err(error) => {
                    outcome.error = Some(error);
                    break;
                }
            }
        }

        outcome
    }

    // == Writes ==
    /// Writes a single entry. With a TTL configured, the value and its
    /// expiry are applied atomically. Idempotent.
    pub async fn put(&self, key: &K, value: &V) -> Result<(), CacheError> {
        let wire_key = self.namespaced(key)?;
        let bytes = self.value_codec.encode(value)?;
        self.store.set(&wire_key, &bytes, self.ttl).await?;
        Ok(())
    }

    /// Writes many entries in one bulk store write. With a TTL configured,
    /// expiry is applied to every written key in the same batch.
    pub async fn put_all(&self, entries: &HashMap<K, V>) -> Result<(), CacheError> {
        if entries.is_empty() {
            return Ok(());
        }

        let pairs = self.encode_pairs(entries.iter())?;
        self.store.set_many(&pairs, self.ttl).await?;
        Ok(())
    }

    // == Invalidation ==
    /// Deletes a single key. Deleting an absent key is a no-op, never an
    /// error.
    pub async fn invalidate(&self, key: &K) -> Result<(), CacheError> {
        let wire_key = self.namespaced(key)?;
        self.store.delete(&wire_key).await?;
        Ok(())
    }

    /// Deletes many keys in one round trip, de-duplicating first.
    pub async fn invalidate_all(&self, keys: &[K]) -> Result<(), CacheError> {
        let mut seen = HashSet::new();
        let mut wire_keys = Vec::new();
        for key in keys {
            let wire_key = self.namespaced(key)?;
            if seen.insert(wire_key.clone()) {
                wire_keys.push(wire_key);
            }
        }
        if wire_keys.is_empty() {
            return Ok(());
        }

        self.store.delete_many(&wire_keys).await?;
        Ok(())
    }

    // == Refresh ==
    /// Unconditionally loads the key and writes the result, skipping the
    /// "check first" step of [`get`](RemoteCache::get).
    ///
    /// Fire-and-forget by design, intended for background cache warming:
    /// every loader or store failure is swallowed and logged at warn level,
    /// and a load that produces no value is skipped rather than written.
    pub async fn refresh(&self, key: &K) {
        let Some(loader) = &self.loader else {
            warn!(key = ?key, "refresh skipped: no loader bound");
            return;
        };

        match loader.load(key).await {
            Ok(Some(value)) => {
                if let Err(error) = self.put(key, &value).await {
                    warn!(key = ?key, error = %error, "refresh write failed");
                }
            }
            Ok(None) => {
                warn!(key = ?key, "refresh skipped: loader returned no value");
            }
            Err(error) => {
                warn!(key = ?key, error = %error, "refresh load failed");
            }
        }
    }
}
