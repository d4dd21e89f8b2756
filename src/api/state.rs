//! Shared application state for the API layer

use std::sync::Arc;

use crate::config::AppConfig;
use crate::domain::experiment::ExperimentSession;

/// State threaded through every handler
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<ExperimentSession>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(session: Arc<ExperimentSession>, config: Arc<AppConfig>) -> Self {
        Self { session, config }
    }
}
