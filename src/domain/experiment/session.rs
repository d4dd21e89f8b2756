//! Experiment session orchestration
//!
//! One decision = decode the prior assignment, and only when none stands:
//! fetch records, select with the caller's draw, and re-encode both cookies.
//! The session holds no mutable state; every decision is a pure function of
//! its inputs plus one provider fetch.

use std::sync::Arc;

use tracing::debug;

use super::entity::{ChosenVariation, ExperimentId};
use super::provider::ExperimentDataProvider;
use super::selector;
use crate::domain::DomainError;
use crate::domain::cookie::{assignment, timestamp};

/// Freshly encoded cookie values to hand back to the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieUpdate {
    /// New value for the assignment cookie.
    pub assignment: String,
    /// New value for the timestamp cookie.
    pub timestamp: String,
}

/// Outcome of one variation decision.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub variation: ChosenVariation,
    /// `None` means the prior assignment stood and nothing needs writing:
    /// the idempotent-read path.
    pub cookies: Option<CookieUpdate>,
}

impl Decision {
    /// Whether this decision came from a fresh draw rather than a prior
    /// cookie assignment.
    pub fn is_fresh(&self) -> bool {
        self.cookies.is_some()
    }
}

/// Decides variations on behalf of visitors.
///
/// Configuration is injected at construction; concurrent sessions with
/// different domains or providers are fully isolated.
#[derive(Debug)]
pub struct ExperimentSession {
    provider: Arc<dyn ExperimentDataProvider>,
    domain_name: Option<String>,
}

impl ExperimentSession {
    pub fn new(provider: Arc<dyn ExperimentDataProvider>, domain_name: Option<String>) -> Self {
        Self {
            provider,
            domain_name,
        }
    }

    /// Decide which variation of `experiment_id` this visitor should see.
    ///
    /// A decoded prior assignment with a nonzero value is returned unchanged
    /// with no cookie writes, no draw and no fetch; re-invoking with the
    /// same prior cookie state is a no-op. A decoded zero counts as "no
    /// prior assignment" and re-draws, which is the reference client's
    /// truthiness rule, preserved deliberately.
    ///
    /// `draw` is a uniform random value in `[0, 1)` supplied by the caller;
    /// `now` is seconds since epoch.
    pub async fn choose_variation(
        &self,
        experiment_id: &ExperimentId,
        prior_assignment: &str,
        prior_timestamp: &str,
        draw: f64,
        now: u64,
    ) -> Result<Decision, DomainError> {
        if let Some(prior) = assignment::decode(prior_assignment, experiment_id) {
            if prior.is_assigned() {
                debug!(%experiment_id, variation = %prior, "prior assignment stands");
                return Ok(Decision {
                    variation: prior,
                    cookies: None,
                });
            }
        }

        let domain_name = self.domain_name.as_deref().ok_or_else(|| {
            DomainError::configuration("experiment domain name is not configured")
        })?;

        let records = self.provider.fetch(experiment_id).await?;
        let variation = selector::select(&records, draw);

        debug!(%experiment_id, %variation, records = records.len(), "fresh variation drawn");

        Ok(Decision {
            variation,
            cookies: Some(CookieUpdate {
                assignment: assignment::update(
                    prior_assignment,
                    experiment_id,
                    variation,
                    domain_name,
                ),
                timestamp: timestamp::update(prior_timestamp, experiment_id, now, domain_name),
            }),
        })
    }
}
