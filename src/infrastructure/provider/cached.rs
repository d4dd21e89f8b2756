//! Caching decorator for experiment-data providers
//!
//! Wraps any provider in a moka TTL cache keyed by experiment id.
//! `try_get_with` coalesces concurrent lookups, so each key sees at most one
//! underlying fetch per TTL window. Failed fetches are not cached; the next
//! lookup retries.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::DomainError;
use crate::domain::experiment::{ExperimentDataProvider, ExperimentId, VariationRecord};

/// Configuration for [`CachedExperimentProvider`]
#[derive(Debug, Clone)]
pub struct ProviderCacheConfig {
    /// Maximum number of cached experiments.
    pub max_capacity: u64,
    /// How long a fetched record set stays fresh.
    pub ttl: Duration,
}

impl Default for ProviderCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 1_024,
            ttl: Duration::from_secs(3600),
        }
    }
}

/// TTL cache over an inner [`ExperimentDataProvider`]
#[derive(Debug)]
pub struct CachedExperimentProvider<P> {
    inner: Arc<P>,
    cache: MokaCache<String, Arc<Vec<VariationRecord>>>,
}

impl<P: ExperimentDataProvider + 'static> CachedExperimentProvider<P> {
    pub fn new(inner: Arc<P>, config: ProviderCacheConfig) -> Self {
        Self {
            inner,
            cache: MokaCache::builder()
                .max_capacity(config.max_capacity)
                .time_to_live(config.ttl)
                .build(),
        }
    }
}

#[async_trait]
impl<P: ExperimentDataProvider + 'static> ExperimentDataProvider for CachedExperimentProvider<P> {
    async fn fetch(
        &self,
        experiment_id: &ExperimentId,
    ) -> Result<Vec<VariationRecord>, DomainError> {
        let inner = self.inner.clone();
        let fetch_id = experiment_id.clone();

        let records = self
            .cache
            .try_get_with(experiment_id.as_str().to_string(), async move {
                debug!(experiment_id = %fetch_id, "cache miss, fetching");
                inner.fetch(&fetch_id).await.map(Arc::new)
            })
            .await
            .map_err(|error: Arc<DomainError>| (*error).clone())?;

        Ok(records.as_ref().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::experiment::provider::mock::MockExperimentProvider;

    fn id(raw: &str) -> ExperimentId {
        ExperimentId::new(raw).unwrap()
    }

    fn cached(inner: MockExperimentProvider) -> (CachedExperimentProvider<MockExperimentProvider>, Arc<MockExperimentProvider>) {
        let inner = Arc::new(inner);
        let provider = CachedExperimentProvider::new(inner.clone(), ProviderCacheConfig::default());
        (provider, inner)
    }

    #[tokio::test]
    async fn repeated_fetches_hit_the_cache() {
        let (provider, inner) = cached(
            MockExperimentProvider::new()
                .with_records("myExp", vec![VariationRecord::new(1, 1.0)]),
        );

        let first = provider.fetch(&id("myExp")).await.unwrap();
        let second = provider.fetch(&id("myExp")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(inner.fetch_count(), 1);
    }

    #[tokio::test]
    async fn distinct_experiments_are_cached_separately() {
        let (provider, inner) = cached(
            MockExperimentProvider::new()
                .with_records("a", vec![VariationRecord::new(1, 1.0)])
                .with_records("b", vec![VariationRecord::new(2, 1.0)]),
        );

        assert_eq!(
            provider.fetch(&id("a")).await.unwrap(),
            vec![VariationRecord::new(1, 1.0)]
        );
        assert_eq!(
            provider.fetch(&id("b")).await.unwrap(),
            vec![VariationRecord::new(2, 1.0)]
        );
        assert_eq!(inner.fetch_count(), 2);
    }

    #[tokio::test]
    async fn errors_are_not_cached() {
        let (provider, inner) = cached(MockExperimentProvider::new().with_error("myExp", "down"));

        assert!(provider.fetch(&id("myExp")).await.is_err());
        assert!(provider.fetch(&id("myExp")).await.is_err());

        // both lookups reached the inner provider
        assert_eq!(inner.fetch_count(), 2);
    }

    #[tokio::test]
    async fn error_variant_survives_the_cache_boundary() {
        let (provider, _) = cached(MockExperimentProvider::new().with_error("myExp", "down"));

        let error = provider.fetch(&id("myExp")).await.unwrap_err();
        assert!(matches!(error, DomainError::Provider { .. }));
    }
}
