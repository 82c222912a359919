//! Redis Store Module
//!
//! [`Store`](super::Store) adapter over a pooled Redis connection.

use std::time::Duration;

use async_trait::async_trait;
use deadpool_redis::{Config, Connection, Pool, PoolConfig, Runtime};
use redis::AsyncCommands;

use crate::config::CacheConfig;
use crate::error::StoreError;
use crate::store::Store;

// == Redis Store ==
/// Redis-backed store using a deadpool connection pool.
///
/// Every operation acquires a connection from the pool for the duration of
/// the call; the connection returns to the pool when it is dropped, on both
/// success and error paths.
#[derive(Clone)]
pub struct RedisStore {
    pool: Pool,
}

impl RedisStore {
    /// Creates a store from an existing connection pool.
    pub fn from_pool(pool: Pool) -> Self {
        Self { pool }
    }

    /// Creates a store by building a pool from the given configuration.
    pub fn connect(config: &CacheConfig) -> Result<Self, StoreError> {
        let mut pool_config = Config::from_url(&config.redis_url);
        pool_config.pool = Some(PoolConfig::new(config.pool_size));

        let pool = pool_config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self { pool })
    }

    async fn conn(&self) -> Result<Connection, StoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))
    }
}

/// Redis rejects an expiry of zero seconds, so sub-second TTLs round up
/// to one second.
fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

fn command_err(e: redis::RedisError) -> StoreError {
    StoreError::Command(e.to_string())
}

#[async_trait]
impl Store for RedisStore {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let mut conn = self.conn().await?;
        conn.get::<_, Option<Vec<u8>>>(key)
            .await
            .map_err(command_err)
    }

    async fn get_many(&self, keys: &[Vec<u8>]) -> Result<Vec<Option<Vec<u8>>>, StoreError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn().await?;
        conn.mget::<_, Vec<Option<Vec<u8>>>>(keys)
            .await
            .map_err(command_err)
    }

    async fn set(
        &self,
        key: &[u8],
        value: &[u8],
        ttl: Option<Duration>,
    ) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        match ttl {
            // SETEX applies value and expiry atomically
            Some(ttl) => conn
                .set_ex::<_, _, ()>(key, value, ttl_secs(ttl))
                .await
                .map_err(command_err),
            None => conn.set::<_, _, ()>(key, value).await.map_err(command_err),
        }
    }

    async fn set_many(
        &self,
        entries: &[(Vec<u8>, Vec<u8>)],
        ttl: Option<Duration>,
    ) -> Result<(), StoreError> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn().await?;
        match ttl {
            // A single MULTI/EXEC pipeline of SETEX commands, so no key is
            // ever observable without its expiry.
            Some(ttl) => {
                let secs = ttl_secs(ttl);
                let mut pipe = redis::pipe();
                pipe.atomic();
                for (key, value) in entries {
                    pipe.set_ex(key, value, secs).ignore();
                }
                let _: () = pipe.query_async(&mut conn).await.map_err(command_err)?;
                Ok(())
            }
            None => conn
                .set_multiple::<_, _, ()>(entries)
                .await
                .map_err(command_err),
        }
    }

    async fn expire(&self, key: &[u8], ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        conn.expire::<_, ()>(key, ttl_secs(ttl) as i64)
            .await
            .map_err(command_err)
    }

    async fn delete(&self, key: &[u8]) -> Result<(), StoreError> {
        let mut conn = self.conn().await?;
        conn.del::<_, ()>(key).await.map_err(command_err)
    }

    async fn delete_many(&self, keys: &[Vec<u8>]) -> Result<(), StoreError> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn().await?;
        conn.del::<_, ()>(keys).await.map_err(command_err)
    }
}
