//! Variation decision endpoint
//!
//! `GET /v1/experiments/{id}/decision` reads the visitor's prior cookie
//! state, decides a variation, and sets both cookies on the response when
//! the decision is fresh.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::IntoResponse;
use chrono::Utc;
use rand::Rng;
use serde::Serialize;

use crate::api::cookies;
use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::domain::DomainError;
use crate::domain::cookie::{
    ASSIGNMENT_COOKIE_NAME, TIMESTAMP_COOKIE_NAME, TIMESTAMP_COOKIE_TTL_SECS,
};
use crate::domain::experiment::ExperimentId;

/// Decision payload returned to the caller
#[derive(Debug, Serialize)]
pub struct DecisionResponse {
    pub experiment_id: String,
    /// Raw variation integer, sentinels included.
    pub variation: i32,
    /// Whether this request drew a fresh variation (and set cookies) rather
    /// than reading a standing assignment.
    pub fresh: bool,
}

pub async fn decide(
    State(state): State<AppState>,
    Path(experiment_id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let experiment_id = ExperimentId::new(experiment_id).map_err(DomainError::from)?;

    let prior_assignment =
        cookies::request_cookie(&headers, ASSIGNMENT_COOKIE_NAME).unwrap_or_default();
    let prior_timestamp =
        cookies::request_cookie(&headers, TIMESTAMP_COOKIE_NAME).unwrap_or_default();

    let draw = rand::thread_rng().gen_range(0.0..1.0);
    let now = Utc::now().timestamp() as u64;

    let decision = state
        .session
        .choose_variation(&experiment_id, &prior_assignment, &prior_timestamp, draw, now)
        .await?;

    let mut response_headers = HeaderMap::new();

    if let (Some(update), Some(domain)) = (
        &decision.cookies,
        state.config.experiments.domain.as_deref(),
    ) {
        let path = &state.config.experiments.cookie_path;
        let expires_at = now + TIMESTAMP_COOKIE_TTL_SECS;

        for (name, value) in [
            (ASSIGNMENT_COOKIE_NAME, &update.assignment),
            (TIMESTAMP_COOKIE_NAME, &update.timestamp),
        ] {
            let cookie = cookies::set_cookie(name, value, domain, path, expires_at);
            let cookie = HeaderValue::from_str(&cookie).map_err(|e| {
                DomainError::validation(format!("cookie value is not header-safe: {}", e))
            })?;
            response_headers.append(header::SET_COOKIE, cookie);
        }
    }

    let body = DecisionResponse {
        experiment_id: experiment_id.to_string(),
        variation: decision.variation.value(),
        fresh: decision.is_fresh(),
    };

    Ok((response_headers, Json(body)))
}
