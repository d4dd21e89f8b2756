//! Content-experiment gateway
//!
//! Decides, on behalf of a visitor, which variation of an A/B content
//! experiment to show, server-side, with cookie state that stays
//! bit-compatible with the tracking system's own client:
//! - Weighted variation selection over externally supplied weights
//! - The two-cookie assignment/timestamp protocol (`__utmx` / `__utmxx`)
//! - HTTP experiment-data fetch with TTL caching
//! - A thin decision API and CLI around the core

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;
use std::time::Duration;

use api::AppState;
use domain::experiment::ExperimentSession;
use infrastructure::provider::{
    CachedExperimentProvider, HttpExperimentProvider, HttpProviderConfig, ProviderCacheConfig,
};

/// Create the application state with the HTTP provider wired behind the
/// response cache
pub fn create_app_state(config: &AppConfig) -> AppState {
    let http_provider = HttpExperimentProvider::new(HttpProviderConfig {
        endpoint: config.experiments.endpoint.clone(),
        request_timeout: Duration::from_secs(config.experiments.request_timeout_secs),
    });

    let provider = CachedExperimentProvider::new(
        Arc::new(http_provider),
        ProviderCacheConfig {
            max_capacity: config.experiments.cache_capacity,
            ttl: Duration::from_secs(config.experiments.cache_ttl_secs),
        },
    );

    let session = ExperimentSession::new(Arc::new(provider), config.experiments.domain.clone());

    AppState::new(Arc::new(session), Arc::new(config.clone()))
}
