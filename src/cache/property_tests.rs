//! Property-Based Tests for the Cache Facade
//!
//! Uses proptest to verify facade invariants over arbitrary keys and values.

use proptest::prelude::*;
use std::sync::Arc;

use crate::cache::RemoteCache;
use crate::codec::JsonCodec;
use crate::store::MemoryStore;

// == Strategies ==
/// Generates cache keys of printable characters
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_:-]{1,64}"
}

/// Generates cache values, including empty strings
fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,256}"
}

fn facade(store: Arc<MemoryStore>, prefix: &str) -> RemoteCache<String, String> {
    RemoteCache::new(store, Arc::new(JsonCodec), Arc::new(JsonCodec), prefix, None)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // For any key and value, a put followed by get_if_present returns an
    // equal value, and a key never written reads as absent.
    #[test]
    fn prop_round_trip(key in key_strategy(), value in value_strategy()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let store = Arc::new(MemoryStore::new());
            let cache = facade(store, "rt:");

            cache.put(&key, &value).await.unwrap();
            let read = cache.get_if_present(&key).await.unwrap();
            prop_assert_eq!(read, Some(value));

            let absent = cache.get_if_present(&format!("{key}/other")).await.unwrap();
            prop_assert_eq!(absent, None);
            Ok(())
        })?;
    }

    // Two facades with different namespace prefixes over the same store
    // never observe each other's entries.
    #[test]
    fn prop_namespace_isolation(key in key_strategy(), value in value_strategy()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let store = Arc::new(MemoryStore::new());
            let sessions = facade(Arc::clone(&store), "sessions:");
            let profiles = facade(store, "profiles:");

            sessions.put(&key, &value).await.unwrap();

            prop_assert_eq!(profiles.get_if_present(&key).await.unwrap(), None);
            prop_assert_eq!(sessions.get_if_present(&key).await.unwrap(), Some(value));
            Ok(())
        })?;
    }

    // Invalidating a key, present or absent, is idempotent and never errors.
    #[test]
    fn prop_invalidate_idempotent(key in key_strategy(), value in value_strategy()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let store = Arc::new(MemoryStore::new());
            let cache = facade(store, "inv:");

            cache.put(&key, &value).await.unwrap();
            cache.invalidate(&key).await.unwrap();
            cache.invalidate(&key).await.unwrap();

            prop_assert_eq!(cache.get_if_present(&key).await.unwrap(), None);
            Ok(())
        })?;
    }
}
