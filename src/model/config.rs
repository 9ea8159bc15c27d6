//! Model configuration.
//!
//! [`ModelConfig`] selects the aggregators and their weights, the
//! comparator policy, and how ties in the final ordering are broken.

use crate::aggregate::{AttributeWeights, NormalizationConfig, Strategy};
use crate::compare::ComparatorPolicy;
use crate::error::{RecommendError, Result};

/// Ordering of profiles whose final scores are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TieBreak {
    /// Keep table order (stable sort).
    #[default]
    PreserveOrder,

    /// Shuffle the table with a seeded RNG before the stable sort. The same
    /// seed gives the same permutation on every call.
    Shuffle { seed: u64 },
}

/// One aggregator entry: a strategy and, optionally, its own weights.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AggregatorConfig {
    pub strategy: Strategy,

    /// Overrides [`ModelConfig::weights`] for this aggregator.
    #[cfg_attr(feature = "serde", serde(default))]
    pub weights: Option<AttributeWeights>,
}

impl AggregatorConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            weights: None,
        }
    }

    pub fn with_weights(mut self, weights: AttributeWeights) -> Self {
        self.weights = Some(weights);
        self
    }
}

impl From<Strategy> for AggregatorConfig {
    fn from(strategy: Strategy) -> Self {
        Self::new(strategy)
    }
}

/// Configuration of a [`RecommendationModel`](super::RecommendationModel).
///
/// # Defaults
///
/// ```
/// use u_recommend::aggregate::Strategy;
/// use u_recommend::model::{ModelConfig, TieBreak};
///
/// let config = ModelConfig::default();
/// assert_eq!(config.aggregators.len(), 1);
/// assert_eq!(config.aggregators[0].strategy, Strategy::Ranking);
/// assert_eq!(config.tie_break, TieBreak::PreserveOrder);
/// assert!(config.weights.is_none());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_recommend::aggregate::{AttributeWeights, Strategy};
/// use u_recommend::model::{ModelConfig, TieBreak};
///
/// let config = ModelConfig::new()
///     .with_aggregator(Strategy::Ranking)
///     .with_aggregator(Strategy::ZScore)
///     .with_weights(AttributeWeights::uniform(["school_type", "admission_points"]))
///     .with_tie_break(TieBreak::Shuffle { seed: 7 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ModelConfig {
    /// Aggregators whose scores are averaged. Must not be empty.
    pub aggregators: Vec<AggregatorConfig>,

    /// Weights shared by aggregators without their own. `None` means
    /// weight 1 for every registered comparator.
    pub weights: Option<AttributeWeights>,

    /// Edge-case handling of the normalization aggregators.
    pub normalization: NormalizationConfig,

    pub policy: ComparatorPolicy,

    pub tie_break: TieBreak,

    /// Compute attribute columns on the rayon pool. Has no effect unless
    /// the crate is built with the `parallel` feature.
    pub parallel: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            aggregators: vec![AggregatorConfig::new(Strategy::Ranking)],
            weights: None,
            normalization: NormalizationConfig::default(),
            policy: ComparatorPolicy::default(),
            tie_break: TieBreak::PreserveOrder,
            parallel: false,
        }
    }
}

impl ModelConfig {
    /// A configuration with no aggregators yet.
    pub fn new() -> Self {
        Self {
            aggregators: Vec::new(),
            ..Self::default()
        }
    }

    /// Builds a configuration from aggregator selector names.
    pub fn from_selectors<I, S>(selectors: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let aggregators = selectors
            .into_iter()
            .map(|s| s.as_ref().parse::<Strategy>().map(AggregatorConfig::new))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            aggregators,
            ..Self::default()
        })
    }

    /// Appends an aggregator.
    pub fn with_aggregator(mut self, aggregator: impl Into<AggregatorConfig>) -> Self {
        self.aggregators.push(aggregator.into());
        self
    }

    pub fn with_weights(mut self, weights: AttributeWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    pub fn with_normalization(mut self, config: NormalizationConfig) -> Self {
        self.normalization = config;
        self
    }

    pub fn with_policy(mut self, policy: ComparatorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// Attribute names are checked later, against the comparator registry
    /// the model is built with.
    pub fn validate(&self) -> Result<()> {
        if self.aggregators.is_empty() {
            return Err(RecommendError::configuration(
                "at least one aggregator must be configured",
            ));
        }
        if let Some(weights) = &self.weights {
            weights.validate()?;
        }
        for aggregator in &self.aggregators {
            if let Some(weights) = &aggregator.weights {
                weights.validate()?;
            }
        }
        self.normalization.validate()?;
        self.policy.validate()?;
        Ok(())
    }

    /// Parses a JSON configuration document.
    ///
    /// Aggregators are given by selector name. Unknown selectors and
    /// malformed documents are configuration errors.
    ///
    /// ```
    /// use u_recommend::model::ModelConfig;
    ///
    /// let config = ModelConfig::from_json_str(
    ///     r#"{"aggregators": [{"strategy": "ranking"}, {"strategy": "minmax"}],
    ///         "weights": {"school_type": 2.0, "exam_scores": 1.0}}"#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.aggregators.len(), 2);
    ///
    /// assert!(ModelConfig::from_json_str(r#"{"aggregators": [{"strategy": "borda"}]}"#).is_err());
    /// ```
    #[cfg(feature = "io")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| RecommendError::configuration(format!("invalid model config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}
