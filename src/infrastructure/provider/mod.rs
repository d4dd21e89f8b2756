//! Experiment-data provider implementations

pub mod cached;
pub mod http;

pub use cached::{CachedExperimentProvider, ProviderCacheConfig};
pub use http::{HttpExperimentProvider, HttpProviderConfig};
