use thiserror::Error;

use crate::domain::experiment::ExperimentIdError;

/// Core domain errors
///
/// Only configuration and provider failures are fatal to a decision.
/// Malformed cookie input degrades to "no prior assignment" field by field,
/// and an exhausted weight scan falls back to the original variation; neither
/// is modeled as an error.
#[derive(Debug, Error, Clone)]
pub enum DomainError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Provider error: {provider} - {message}")]
    Provider { provider: String, message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl DomainError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl From<ExperimentIdError> for DomainError {
    fn from(error: ExperimentIdError) -> Self {
        Self::validation(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error() {
        let error = DomainError::configuration("domain name is not configured");
        assert_eq!(
            error.to_string(),
            "Configuration error: domain name is not configured"
        );
    }

    #[test]
    fn test_provider_error() {
        let error = DomainError::provider("experiment-data", "connection refused");
        assert_eq!(
            error.to_string(),
            "Provider error: experiment-data - connection refused"
        );
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("bad id");
        assert_eq!(error.to_string(), "Validation error: bad id");
    }
}
