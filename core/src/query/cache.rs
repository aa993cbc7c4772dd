use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use super::events::CacheEvent;
use super::key::QueryKey;
use crate::error::QueryError;

struct Entry<V> {
    data: Option<V>,
    invalidated: bool,
    /// Bumped by `cancel_queries`; a fetch started under an older generation
    /// is discarded when it completes.
    generation: u64,
    in_flight: usize,
    updated_at: Option<DateTime<Utc>>,
}

impl<V> Default for Entry<V> {
    fn default() -> Self {
        Self {
            data: None,
            invalidated: false,
            generation: 0,
            in_flight: 0,
            updated_at: None,
        }
    }
}

/// Shared key-value store of server reads.
///
/// Cloning is cheap; clones share entries and the event channel.
pub struct QueryCache<V> {
    inner: Arc<QueryCacheInner<V>>,
}

struct QueryCacheInner<V> {
    entries: RwLock<HashMap<QueryKey, Entry<V>>>,
    event_tx: broadcast::Sender<CacheEvent>,
}

impl<V> Clone for QueryCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> QueryCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(event_tx: broadcast::Sender<CacheEvent>) -> Self {
        Self {
            inner: Arc::new(QueryCacheInner {
                entries: RwLock::new(HashMap::new()),
                event_tx,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.inner.event_tx.subscribe()
    }

    fn emit(&self, event: CacheEvent) {
        // No receivers is fine.
        let _ = self.inner.event_tx.send(event);
    }

    pub async fn get_query_data(&self, key: &QueryKey) -> Option<V> {
        let entries = self.inner.entries.read().await;
        entries.get(key).and_then(|entry| entry.data.clone())
    }

    /// Writes `data` and clears the invalidated flag.
    pub async fn set_query_data(&self, key: &QueryKey, data: V) {
        {
            let mut entries = self.inner.entries.write().await;
            let entry = entries.entry(key.clone()).or_default();
            entry.data = Some(data);
            entry.invalidated = false;
            entry.updated_at = Some(Utc::now());
        }
        self.emit(CacheEvent::Updated {
            key: key.clone(),
            timestamp: Utc::now(),
        });
    }

    /// Puts a snapshot taken with `get_query_data` back verbatim, including
    /// the empty case.
    pub async fn restore_query_data(&self, key: &QueryKey, snapshot: Option<V>) {
        {
            let mut entries = self.inner.entries.write().await;
            let entry = entries.entry(key.clone()).or_default();
            entry.data = snapshot;
            entry.updated_at = Some(Utc::now());
        }
        self.emit(CacheEvent::RolledBack {
            key: key.clone(),
            timestamp: Utc::now(),
        });
    }

    /// Marks the entry stale so the next `ensure_query_data` refetches.
    pub async fn invalidate_queries(&self, key: &QueryKey) {
        {
            let mut entries = self.inner.entries.write().await;
            entries.entry(key.clone()).or_default().invalidated = true;
        }
        tracing::debug!(target: "trainconf.query", stage = "query.invalidate", key = %key);
        self.emit(CacheEvent::Invalidated {
            key: key.clone(),
            timestamp: Utc::now(),
        });
    }

    pub async fn is_invalidated(&self, key: &QueryKey) -> bool {
        let entries = self.inner.entries.read().await;
        entries.get(key).is_some_and(|entry| entry.invalidated)
    }

    pub async fn is_fetching(&self, key: &QueryKey) -> bool {
        let entries = self.inner.entries.read().await;
        entries.get(key).is_some_and(|entry| entry.in_flight > 0)
    }

    pub async fn updated_at(&self, key: &QueryKey) -> Option<DateTime<Utc>> {
        let entries = self.inner.entries.read().await;
        entries.get(key).and_then(|entry| entry.updated_at)
    }

    /// Supersedes every fetch currently in flight for `key`. Their results
    /// are dropped on arrival; cached data is left as it is.
    pub async fn cancel_queries(&self, key: &QueryKey) {
        let in_flight = {
            let mut entries = self.inner.entries.write().await;
            let entry = entries.entry(key.clone()).or_default();
            entry.generation = entry.generation.wrapping_add(1);
            entry.in_flight
        };
        if in_flight > 0 {
            tracing::debug!(
                target: "trainconf.query",
                stage = "query.cancel",
                key = %key,
                in_flight
            );
            self.emit(CacheEvent::Cancelled {
                key: key.clone(),
                in_flight,
                timestamp: Utc::now(),
            });
        }
    }

    /// Runs `fetch` and stores its result, unless `cancel_queries` was
    /// called for `key` while it ran.
    pub async fn fetch_query<F>(&self, key: &QueryKey, fetch: F) -> Result<V, QueryError>
    where
        F: Future<Output = Result<V, QueryError>>,
    {
        let generation = {
            let mut entries = self.inner.entries.write().await;
            let entry = entries.entry(key.clone()).or_default();
            entry.in_flight += 1;
            entry.generation
        };
        tracing::debug!(target: "trainconf.query", stage = "query.fetch.in", key = %key);

        let result = fetch.await;

        let mut entries = self.inner.entries.write().await;
        let entry = entries.entry(key.clone()).or_default();
        entry.in_flight = entry.in_flight.saturating_sub(1);

        if entry.generation != generation {
            tracing::debug!(
                target: "trainconf.query",
                stage = "query.fetch.discarded",
                key = %key
            );
            return Err(QueryError::Cancelled(key.to_string()));
        }

        let data = result?;
        entry.data = Some(data.clone());
        entry.invalidated = false;
        entry.updated_at = Some(Utc::now());
        drop(entries);

        tracing::debug!(target: "trainconf.query", stage = "query.fetch.out", key = %key);
        self.emit(CacheEvent::Updated {
            key: key.clone(),
            timestamp: Utc::now(),
        });
        Ok(data)
    }

    /// Cached data when present and fresh, otherwise the result of a fetch.
    pub async fn ensure_query_data<F, Fut>(
        &self,
        key: &QueryKey,
        fetch: F,
    ) -> Result<V, QueryError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, QueryError>>,
    {
        {
            let entries = self.inner.entries.read().await;
            if let Some(Entry {
                data: Some(data),
                invalidated: false,
                ..
            }) = entries.get(key)
            {
                return Ok(data.clone());
            }
        }
        self.fetch_query(key, fetch()).await
    }
}
