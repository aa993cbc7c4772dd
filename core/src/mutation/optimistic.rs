use std::future::Future;

use super::transitions::{MutationPhase, MutationTransition};
use crate::error::MutationError;
use crate::query::{QueryCache, QueryKey};

/// One optimistic write against a cached query.
///
/// `apply` cancels in-flight fetches for the key, snapshots the cached value
/// and writes the optimistic one. `settle` restores the snapshot when the
/// request failed and invalidates the key either way. [`Self::run`] does the
/// whole sequence around a request future.
pub struct OptimisticMutation<V> {
    cache: QueryCache<V>,
    key: QueryKey,
    phase: MutationPhase,
    snapshot: Option<V>,
}

impl<V> OptimisticMutation<V>
where
    V: Clone + Send + Sync + 'static,
{
    pub fn new(cache: QueryCache<V>, key: QueryKey) -> Self {
        Self {
            cache,
            key,
            phase: MutationPhase::Idle,
            snapshot: None,
        }
    }

    pub fn phase(&self) -> MutationPhase {
        self.phase
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Value the cache held before `apply`.
    pub fn snapshot(&self) -> Option<&V> {
        self.snapshot.as_ref()
    }

    fn transition(&mut self, to: MutationPhase) -> Result<(), MutationError> {
        MutationTransition::validate(self.phase, to)?;
        tracing::debug!(
            target: "trainconf.mutation",
            key = %self.key,
            from = MutationTransition::phase_description(self.phase),
            to = MutationTransition::phase_description(to),
            "mutation phase changed"
        );
        self.phase = to;
        Ok(())
    }

    /// Returns the optimistic value, or `None` when nothing was cached yet
    /// and there was nothing to update.
    pub async fn apply<F>(&mut self, update: F) -> Result<Option<V>, MutationError>
    where
        F: FnOnce(&V) -> V,
    {
        self.transition(MutationPhase::OptimisticallyApplied)?;

        self.cache.cancel_queries(&self.key).await;
        let snapshot = self.cache.get_query_data(&self.key).await;
        let optimistic = snapshot.as_ref().map(update);
        if let Some(next) = &optimistic {
            self.cache.set_query_data(&self.key, next.clone()).await;
        }
        self.snapshot = snapshot;
        Ok(optimistic)
    }

    pub async fn settle<T>(&mut self, result: anyhow::Result<T>) -> Result<T, MutationError> {
        let outcome = match result {
            Ok(value) => {
                self.transition(MutationPhase::SettledSuccess)?;
                Ok(value)
            }
            Err(err) => {
                self.transition(MutationPhase::SettledFailureRolledBack)?;
                tracing::warn!(
                    target: "trainconf.mutation",
                    key = %self.key,
                    error = %err,
                    "request failed, restoring snapshot"
                );
                self.cache
                    .restore_query_data(&self.key, self.snapshot.clone())
                    .await;
                Err(MutationError::Request(err))
            }
        };
        self.cache.invalidate_queries(&self.key).await;
        outcome
    }

    /// cancel, snapshot, optimistic write, await `request`, rollback on
    /// failure, invalidate.
    pub async fn run<F, Fut, T>(
        cache: QueryCache<V>,
        key: QueryKey,
        update: F,
        request: Fut,
    ) -> Result<T, MutationError>
    where
        F: FnOnce(&V) -> V,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        let mut mutation = Self::new(cache, key);
        mutation.apply(update).await?;
        let result = request.await;
        mutation.settle(result).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::ProjectIdentifier;
    use crate::error::QueryError;
    use crate::query::CacheEvent;
    use tokio::sync::{broadcast, oneshot};

    fn setup() -> (QueryCache<Vec<u32>>, QueryKey) {
        let (tx, _) = broadcast::channel(32);
        (
            QueryCache::new(tx),
            QueryKey::config_parameters(&ProjectIdentifier::new("o", "w", "p")),
        )
    }

    #[allow(clippy::ptr_arg)]
    fn push(v: &Vec<u32>) -> Vec<u32> {
        let mut next = v.clone();
        next.push(99);
        next
    }

    #[tokio::test]
    async fn test_success_keeps_optimistic_value_and_invalidates() {
        let (cache, key) = setup();
        cache.set_query_data(&key, vec![1]).await;

        let result =
            OptimisticMutation::run(cache.clone(), key.clone(), push, async { Ok("saved") }).await;

        assert_eq!(result.unwrap(), "saved");
        assert_eq!(cache.get_query_data(&key).await, Some(vec![1, 99]));
        assert!(cache.is_invalidated(&key).await);
    }

    #[tokio::test]
    async fn test_failure_restores_snapshot_and_invalidates() {
        let (cache, key) = setup();
        cache.set_query_data(&key, vec![1]).await;
        let mut events = cache.subscribe();

        let mut mutation = OptimisticMutation::new(cache.clone(), key.clone());
        let optimistic = mutation.apply(push).await.unwrap();
        assert_eq!(optimistic, Some(vec![1, 99]));
        assert_eq!(mutation.phase(), MutationPhase::OptimisticallyApplied);
        assert_eq!(cache.get_query_data(&key).await, Some(vec![1, 99]));

        let result = mutation.settle::<()>(Err(anyhow::anyhow!("500"))).await;
        assert!(matches!(result, Err(MutationError::Request(_))));
        assert_eq!(mutation.phase(), MutationPhase::SettledFailureRolledBack);
        assert_eq!(cache.get_query_data(&key).await, Some(vec![1]));
        assert!(cache.is_invalidated(&key).await);

        let mut kinds = Vec::new();
        while let Ok(event) = events.try_recv() {
            kinds.push(match event {
                CacheEvent::Updated { .. } => "updated",
                CacheEvent::Invalidated { .. } => "invalidated",
                CacheEvent::Cancelled { .. } => "cancelled",
                CacheEvent::RolledBack { .. } => "rolled_back",
            });
        }
        assert_eq!(kinds, ["updated", "rolled_back", "invalidated"]);
    }

    #[tokio::test]
    async fn test_apply_discards_fetch_already_in_flight() {
        let (cache, key) = setup();
        cache.set_query_data(&key, vec![1]).await;
        let (release, wait) = oneshot::channel::<()>();

        let fetching = {
            let cache = cache.clone();
            let key = key.clone();
            tokio::spawn(async move {
                cache
                    .fetch_query(&key, async move {
                        let _ = wait.await;
                        Ok(vec![7])
                    })
                    .await
            })
        };
        while !cache.is_fetching(&key).await {
            tokio::task::yield_now().await;
        }

        let mut mutation = OptimisticMutation::new(cache.clone(), key.clone());
        mutation.apply(push).await.unwrap();
        let _ = release.send(());

        let fetched = fetching.await.unwrap();
        assert!(matches!(fetched, Err(QueryError::Cancelled(_))));
        assert_eq!(cache.get_query_data(&key).await, Some(vec![1, 99]));
        assert_eq!(mutation.snapshot(), Some(&vec![1]));
    }

    #[tokio::test]
    async fn test_empty_cache_applies_nothing() {
        let (cache, key) = setup();
        let result = OptimisticMutation::run(cache.clone(), key.clone(), push, async {
            Err::<(), _>(anyhow::anyhow!("offline"))
        })
        .await;
        assert!(result.is_err());
        assert_eq!(cache.get_query_data(&key).await, None);
        assert!(cache.is_invalidated(&key).await);
    }

    #[tokio::test]
    async fn test_settled_mutation_cannot_apply_again() {
        let (cache, key) = setup();
        let mut mutation = OptimisticMutation::new(cache, key);
        mutation.apply(push).await.unwrap();
        mutation.settle(Ok(())).await.unwrap();
        assert!(matches!(
            mutation.apply(push).await,
            Err(MutationError::Transition(_))
        ));
    }
}
