//! Transient key-value store shared by all connector steps.
//!
//! Every piece of cross-request data (pending OAuth state, freshly issued
//! credentials) lives here with a per-key expiry. The connector never keeps
//! state in process memory, so any instance can serve any step of a flow.
//!
//! # Backends
//!
//! - [`MemoryStore`] - single-process `DashMap`, used for tests and local runs
//! - [`RedisStore`] - shared Redis instance (`SET EX` / `GET` / `DEL`)

use anyhow::Result;
use async_trait::async_trait;

mod memory;
mod redis;

pub use self::memory::{run_store_cleanup, MemoryStore};
pub use self::redis::RedisStore;

/// Key-value store with per-key time-to-live.
///
/// Writes to an existing key replace it (last write wins).
#[async_trait]
pub trait TransientStore: Send + Sync {
    /// Store `value` under `key`, expiring after `ttl_seconds`.
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()>;

    /// Fetch the value for `key`, `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Build a provider-scoped store key: `{provider}_{purpose}:{org_id}:{user_id}`.
pub fn store_key(provider: &str, purpose: &str, org_id: &str, user_id: &str) -> String {
    format!("{}_{}:{}:{}", provider, purpose, org_id, user_id)
}
