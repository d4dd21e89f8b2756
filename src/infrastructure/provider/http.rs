//! HTTP experiment-data provider
//!
//! Fetches weight data from the tracking system's script endpoint. The
//! response body is JavaScript embedding a JSON object after a marker; the
//! object maps experiment ids to payloads of ordered variation rows, or to
//! an explicit error payload.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::DomainError;
use crate::domain::experiment::{ExperimentDataProvider, ExperimentId, VariationRecord};

/// Marker preceding the embedded JSON object in the endpoint response.
pub const EXPERIMENT_DATA_MARKER: &str = "experiments_ =";

/// Key signaling an explicit per-experiment error payload.
const ERROR_KEY: &str = "error";

/// Key holding the ordered variation rows in a per-experiment payload.
const ITEMS_KEY: &str = "items";

const PROVIDER_NAME: &str = "experiment-data";

/// Configuration for [`HttpExperimentProvider`]
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Endpoint returning the experiment-data script.
    pub endpoint: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.google-analytics.com/cx/api.js".to_string(),
            request_timeout: Duration::from_secs(5),
        }
    }
}

/// Real provider using reqwest
#[derive(Debug, Clone)]
pub struct HttpExperimentProvider {
    client: reqwest::Client,
    config: HttpProviderConfig,
}

impl HttpExperimentProvider {
    pub fn new(config: HttpProviderConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(config.request_timeout)
                .build()
                .expect("Failed to build HTTP client"),
            config,
        }
    }
}

#[async_trait]
impl ExperimentDataProvider for HttpExperimentProvider {
    async fn fetch(
        &self,
        experiment_id: &ExperimentId,
    ) -> Result<Vec<VariationRecord>, DomainError> {
        let url = format!(
            "{}?experiment={}",
            self.config.endpoint,
            experiment_id.as_str()
        );

        debug!(%experiment_id, url = %self.config.endpoint, "fetching experiment data");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::provider(PROVIDER_NAME, format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(
                PROVIDER_NAME,
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        let body = response.text().await.map_err(|e| {
            DomainError::provider(PROVIDER_NAME, format!("Failed to read response: {}", e))
        })?;

        parse_experiment_payload(&body, experiment_id)
    }
}

/// Extract and decode the records for `experiment_id` from a response body.
fn parse_experiment_payload(
    body: &str,
    experiment_id: &ExperimentId,
) -> Result<Vec<VariationRecord>, DomainError> {
    let json_text = extract_embedded_object(body).ok_or_else(|| {
        DomainError::provider(PROVIDER_NAME, "response does not embed experiment data")
    })?;

    let data: serde_json::Value = serde_json::from_str(json_text).map_err(|e| {
        DomainError::provider(PROVIDER_NAME, format!("embedded data is not valid JSON: {}", e))
    })?;

    let payload = data.get(experiment_id.as_str()).ok_or_else(|| {
        DomainError::provider(
            PROVIDER_NAME,
            format!("no data for experiment '{}'", experiment_id),
        )
    })?;

    if let Some(error) = payload.get(ERROR_KEY) {
        return Err(DomainError::provider(
            PROVIDER_NAME,
            format!("endpoint reported error for '{}': {}", experiment_id, error),
        ));
    }

    let items = payload.get(ITEMS_KEY).ok_or_else(|| {
        DomainError::provider(
            PROVIDER_NAME,
            format!("payload for '{}' has no variation rows", experiment_id),
        )
    })?;

    serde_json::from_value(items.clone()).map_err(|e| {
        DomainError::provider(PROVIDER_NAME, format!("malformed variation rows: {}", e))
    })
}

/// Find the brace-balanced JSON object following the marker.
///
/// Brace counting tracks string literals and escapes so braces inside error
/// messages do not unbalance the scan.
fn extract_embedded_object(body: &str) -> Option<&str> {
    let after_marker = &body[body.find(EXPERIMENT_DATA_MARKER)? + EXPERIMENT_DATA_MARKER.len()..];
    let start = after_marker.find('{')?;
    let object = &after_marker[start..];

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, byte) in object.bytes().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&object[..=index]);
                }
            }
            _ => {}
        }
    }

    None
}
