//! Error taxonomy for configuration and scoring.
//!
//! Every failure is deterministic: it reflects bad configuration or bad
//! input data, never a transient condition, so nothing here is retried.

use thiserror::Error;

/// Errors raised while configuring a model or scoring a student.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecommendError {
    /// Invalid model, aggregator, or weight configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A weight map or query referenced a comparator that is not registered.
    #[error("unknown attribute `{name}` (available: {})", available.join(", "))]
    UnknownAttribute {
        name: String,
        available: Vec<String>,
    },

    /// Student and profile data do not have the shape a comparator expects.
    #[error("type conflict in {what}: expected {expected}, found {found}")]
    TypeConflict {
        what: String,
        expected: usize,
        found: usize,
    },

    /// Normalization over a column with zero spread.
    #[error("degenerate distribution for `{attribute}`: {normalization} is undefined on a column with zero spread")]
    DegenerateDistribution {
        attribute: String,
        normalization: &'static str,
    },
}

impl RecommendError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration(reason.into())
    }

    pub(crate) fn type_conflict(what: impl Into<String>, expected: usize, found: usize) -> Self {
        Self::TypeConflict {
            what: what.into(),
            expected,
            found,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, RecommendError>;
