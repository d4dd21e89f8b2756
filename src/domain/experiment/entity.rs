//! Experiment domain entities

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::cookie::{EXPERIMENT_SEPARATOR, FIELD_SEPARATOR, VALUE_SEPARATOR};

// ============================================================================
// ExperimentId
// ============================================================================

/// Errors raised when constructing an [`ExperimentId`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExperimentIdError {
    #[error("Experiment ID cannot be empty")]
    Empty,

    #[error("Experiment ID contains reserved cookie separator '{0}'")]
    ReservedCharacter(char),
}

/// Opaque identifier for one experiment
///
/// Ids are externally assigned and never mutated. Construction only rejects
/// strings that would corrupt the cookie wire format; decode paths treat any
/// field id as opaque text and never construct one of these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExperimentId(String);

impl ExperimentId {
    /// Create a new experiment ID, rejecting the cookie separator characters
    pub fn new(id: impl Into<String>) -> Result<Self, ExperimentIdError> {
        let id = id.into();

        if id.is_empty() {
            return Err(ExperimentIdError::Empty);
        }

        for separator in [FIELD_SEPARATOR, EXPERIMENT_SEPARATOR, VALUE_SEPARATOR] {
            if id.contains(separator) {
                return Err(ExperimentIdError::ReservedCharacter(separator));
            }
        }

        Ok(Self(id))
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ExperimentId {
    type Error = ExperimentIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ExperimentId> for String {
    fn from(id: ExperimentId) -> Self {
        id.0
    }
}

impl fmt::Display for ExperimentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for ExperimentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// VariationRecord
// ============================================================================

/// One row of experiment configuration, as received from the data provider
///
/// The ordered sequence of records is the full experiment definition. Order
/// is significant (the first match under the cumulative-weight scan wins) and
/// is preserved exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationRecord {
    /// Variation to serve when this bucket is hit; `None` excludes the
    /// visitor from the experiment entirely.
    #[serde(rename = "id")]
    pub variation_id: Option<i32>,

    /// Probability mass in `[0, 1]` assigned to this bucket.
    pub weight: f64,

    /// Disabled records are never selectable, whatever their weight says.
    #[serde(default)]
    pub disabled: bool,
}

impl VariationRecord {
    /// Create an enabled record
    pub fn new(variation_id: impl Into<Option<i32>>, weight: f64) -> Self {
        Self {
            variation_id: variation_id.into(),
            weight,
            disabled: false,
        }
    }

    /// Mark the record as disabled
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

// ============================================================================
// ChosenVariation
// ============================================================================

/// The outcome of a variation decision, as it appears on the wire
///
/// An integer with three reserved sentinels. The value is computed once per
/// visitor per experiment, persisted into the assignment cookie, and stays
/// immutable until the visitor's cookie is cleared or expires in the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChosenVariation(i32);

impl ChosenVariation {
    /// The original (control) content; also the fallback when the weight
    /// scan exhausts without a match.
    pub const ORIGINAL: Self = Self(0);

    /// Initial/unset indicator for callers. Never produced by selection.
    pub const NO_CHOSEN: Self = Self(-1);

    /// The visitor is excluded from the experiment.
    pub const NOT_PARTICIPATING: Self = Self(-2);

    /// Wrap a concrete variation id
    pub fn variation(id: i32) -> Self {
        Self(id)
    }

    /// The raw integer persisted into the assignment cookie
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Whether a decoded prior value counts as a standing assignment.
    ///
    /// Mirrors the reference client's truthiness check: zero (the original
    /// variation) reads as "no prior assignment" and triggers a fresh draw,
    /// while the negative sentinels are sticky.
    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }

    pub fn is_original(&self) -> bool {
        *self == Self::ORIGINAL
    }

    pub fn is_not_participating(&self) -> bool {
        *self == Self::NOT_PARTICIPATING
    }
}

impl fmt::Display for ChosenVariation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
