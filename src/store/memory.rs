//! In-memory transient store.

use super::TransientStore;
use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Stored value with its expiry deadline
#[derive(Clone, Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Process-local store backed by a lock-free map.
///
/// Expired entries are invisible to `get` and dropped lazily; call
/// [`MemoryStore::cleanup_expired`] (or spawn [`run_store_cleanup`]) to
/// reclaim entries that are never read again.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<DashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every expired entry
    pub fn cleanup_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| !entry.is_expired(now));
    }

    /// Number of entries currently held, including expired ones not yet reclaimed
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl TransientStore for MemoryStore {
    async fn set_with_ttl(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
        };
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        let value = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => None,
            None => return Ok(None),
        };

        // Guard is released above; safe to mutate the shard now.
        self.entries.remove_if(key, |_, entry| entry.is_expired(now));
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Background task to periodically reclaim expired entries
pub async fn run_store_cleanup(store: MemoryStore, interval_seconds: u64) {
    // tokio::time::interval panics on a zero period
    let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds.max(1)));

    loop {
        interval.tick().await;
        store.cleanup_expired();
        tracing::debug!("Transient store cleanup complete, {} entries remaining", store.len());
    }
}
