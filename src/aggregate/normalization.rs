//! Normalization-based aggregation.

use super::{accumulate, normalize, AttributeWeights, Normalization, NormalizationConfig};
use crate::compare::ComparatorRegistry;
use crate::domain::{Profile, Student};
use crate::error::Result;
use std::borrow::Borrow;

/// Scores each profile by its weighted normalized distances.
///
/// Unlike ranking, the size of a gap between profiles survives into the
/// score.
#[derive(Debug, Clone)]
pub struct NormalizationAggregator {
    method: Normalization,
    weights: AttributeWeights,
    config: NormalizationConfig,
}

impl NormalizationAggregator {
    pub fn new(method: Normalization, weights: AttributeWeights) -> Self {
        Self {
            method,
            weights,
            config: NormalizationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: NormalizationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn method(&self) -> Normalization {
        self.method
    }

    pub fn weights(&self) -> &AttributeWeights {
        &self.weights
    }

    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    pub fn score(
        &self,
        registry: &ComparatorRegistry,
        student: &Student,
        profiles: &[Profile],
    ) -> Result<Vec<f64>> {
        self.score_with(registry, student, profiles, false)
    }

    pub(crate) fn score_with<P: Borrow<Profile> + Sync>(
        &self,
        registry: &ComparatorRegistry,
        student: &Student,
        profiles: &[P],
        parallel: bool,
    ) -> Result<Vec<f64>> {
        self.config.validate()?;
        accumulate(
            self.method.name(),
            &self.weights,
            registry,
            student,
            profiles,
            parallel,
            |attribute, column| normalize(&column, attribute, self.method, &self.config),
        )
    }
}
