//! Read-Through Policy Module
//!
//! Composes the cache store with an arbitrary fetch collaborator. Lookups
//! consult the store first; on a miss or an expired entry the fetcher is
//! invoked and its result stored. Two staleness policies are supported:
//! `wait` blocks the caller until revalidation completes, `cache_first`
//! serves the stale entry immediately and revalidates in the background.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{current_timestamp_ms, CacheEntry, CacheStore};
use crate::error::FetchError;
use crate::fetch::Fetch;
use crate::units::interval::NEVER;

// == Update Mode ==
/// Staleness handling for expired entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateMode {
    /// Serve the stale entry immediately, revalidate in the background
    #[default]
    CacheFirst,
    /// Block the caller until revalidation completes
    Wait,
}

// == Update Policy ==
/// Expiry configuration for stored entries.
#[derive(Debug, Clone, Copy)]
pub struct UpdatePolicy {
    /// Entry lifetime in milliseconds; negative means entries never expire
    pub expire_after: i64,
    /// How expired entries are handled
    pub mode: UpdateMode,
}

impl UpdatePolicy {
    pub fn new(expire_after: i64, mode: UpdateMode) -> Self {
        Self { expire_after, mode }
    }
}

impl Default for UpdatePolicy {
    fn default() -> Self {
        Self {
            expire_after: NEVER,
            mode: UpdateMode::CacheFirst,
        }
    }
}

// == Cached Fetcher ==
/// A fetch function wrapped with a read-through cache.
///
/// With no update policy configured, lookups bypass the store entirely and
/// go straight to the fetcher.
#[derive(Debug)]
pub struct CachedFetcher<F> {
    /// Shared store; one lock over the whole map since eviction may touch
    /// arbitrary keys
    store: Arc<RwLock<CacheStore>>,
    /// The fetch collaborator
    fetcher: Arc<F>,
    /// None = caching disabled
    policy: Option<UpdatePolicy>,
}

// Manual impl: cloning shares the store and fetcher, F itself need not be Clone.
impl<F> Clone for CachedFetcher<F> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            fetcher: Arc::clone(&self.fetcher),
            policy: self.policy,
        }
    }
}

impl<F: Fetch> CachedFetcher<F> {
    // == Constructor ==
    /// Wraps a fetcher with a store and an optional update policy.
    pub fn new(fetcher: F, store: CacheStore, policy: Option<UpdatePolicy>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            fetcher: Arc::new(fetcher),
            policy,
        }
    }

    // == Store Access ==
    /// Shared handle to the underlying store (stats reporting).
    pub fn store(&self) -> Arc<RwLock<CacheStore>> {
        Arc::clone(&self.store)
    }

    // == Lookup ==
    /// Resolves a key to content, consulting the cache first.
    ///
    /// Exactly one result is delivered to the caller per lookup. Fetch
    /// errors pass through unmodified; they are never cached. Dropping the
    /// returned future cancels an in-flight blocking fetch, while a
    /// background revalidation runs to completion on its own.
    pub async fn lookup(&self, key: &str) -> Result<CacheEntry, FetchError> {
        let Some(policy) = self.policy else {
            return self.fetcher.fetch(key).await;
        };

        {
            let mut store = self.store.write().await;
            if let Some(entry) = store.get(key) {
                if !entry.is_expired() {
                    return Ok(entry.clone());
                }
                match policy.mode {
                    UpdateMode::CacheFirst => {
                        // Serve stale now; the entry stays in place until a
                        // successful revalidation replaces it
                        let stale = entry.clone();
                        drop(store);
                        self.spawn_revalidation(key.to_string());
                        return Ok(stale);
                    }
                    UpdateMode::Wait => {
                        // Stale data is consumed; the caller gets whatever
                        // the fetch yields, error included
                        store.remove(key);
                    }
                }
            }
        }

        self.fetch_and_store(key).await
    }

    // == Fetch And Store ==
    /// Invokes the fetcher and stores a successful result.
    ///
    /// The store lock is only taken after the fetch completes. An entry too
    /// large to ever fit is still returned to the caller, just not cached.
    async fn fetch_and_store(&self, key: &str) -> Result<CacheEntry, FetchError> {
        let entry = self.stamp(self.fetcher.fetch(key).await?);
        let mut store = self.store.write().await;
        store.put(key.to_string(), entry.clone());
        Ok(entry)
    }

    // == Stamp ==
    /// Sets the expiry timestamp on a fresh fetch result.
    fn stamp(&self, mut entry: CacheEntry) -> CacheEntry {
        if let Some(policy) = self.policy {
            if policy.expire_after >= 0 {
                entry.expires_at = Some(current_timestamp_ms() + policy.expire_after as u64);
            }
        }
        entry
    }

    // == Background Revalidation ==
    /// Refreshes an expired entry without a waiting caller.
    ///
    /// Failures have no one to report to: they are logged and swallowed,
    /// and the stale entry keeps being served until a fetch succeeds.
    fn spawn_revalidation(&self, key: String) {
        let this = self.clone();
        tokio::spawn(async move {
            match this.fetch_and_store(&key).await {
                Ok(_) => debug!(key = %key, "background revalidation stored fresh content"),
                Err(err) => debug!(key = %key, error = %err, "background revalidation failed"),
            }
        });
    }
}
