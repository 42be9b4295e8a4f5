//! Redis-backed transient store.

use super::TransientStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};

/// Store backed by a shared Redis instance.
///
/// Expiry is delegated to Redis (`SET .. EX`), so no local cleanup is needed.
/// The multiplexed connection is cheap to clone and shared by all requests.
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
    key_prefix: String,
}

impl RedisStore {
    /// Connect to Redis and verify it answers `PING`.
    ///
    /// # Arguments
    /// * `redis_url` - e.g. `redis://localhost:6379`
    /// * `key_prefix` - prepended to every key (may be empty)
    pub async fn connect(redis_url: &str, key_prefix: &str) -> Result<Self> {
        let client = Client::open(redis_url).context("Invalid Redis URL")?;
        let mut connection = client
            .get_multiplexed_async_connection()
            .await
            .context("Failed to connect to Redis")?;

        let _: String = redis::cmd("PING")
            .query_async(&mut connection)
            .await
            .context("Redis ping failed")?;

        Ok(Self {
            connection,
            key_prefix: key_prefix.to_string(),
        })
    }

    fn prefixed_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl TransientStore for RedisStore {
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: () = conn
            .set_ex(self.prefixed_key(key), value, ttl_seconds)
            .await
            .with_context(|| format!("Redis SET failed for {}", key))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn
            .get(self.prefixed_key(key))
            .await
            .with_context(|| format!("Redis GET failed for {}", key))?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: () = conn
            .del(self.prefixed_key(key))
            .await
            .with_context(|| format!("Redis DEL failed for {}", key))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_invalid_url() {
        let result = RedisStore::connect("not-a-redis-url", "").await;
        assert!(result.is_err());
    }
}
