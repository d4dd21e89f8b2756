//! Experiment-data provider seam
//!
//! The session never knows where weight data comes from; it fetches through
//! this trait. Production wires an HTTP provider behind a caching decorator
//! (see `infrastructure::provider`); tests inject the mock below.

use async_trait::async_trait;

use super::entity::{ExperimentId, VariationRecord};
use crate::domain::DomainError;

/// Source of ordered variation records for an experiment.
///
/// A fetch failure is fatal to the decision being made; implementations
/// must surface it as a provider error rather than defaulting to an empty
/// record list, which would silently select the original variation.
#[async_trait]
pub trait ExperimentDataProvider: Send + Sync + std::fmt::Debug {
    async fn fetch(&self, experiment_id: &ExperimentId)
    -> Result<Vec<VariationRecord>, DomainError>;
}
