//! Recommendation model.

use super::config::{ModelConfig, TieBreak};
use crate::aggregate::{nan_last, Aggregator, AttributeWeights};
use crate::compare::ComparatorRegistry;
use crate::domain::{Profile, Student};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::borrow::Borrow;
use tracing::{debug, info_span};

/// Ranks a fixed profile table for any number of students.
///
/// Configuration happens once in [`new`](Self::new) or
/// [`with_registry`](Self::with_registry): weights are resolved against
/// the registry and every configuration error surfaces there. Queries take
/// `&self`, build fresh score vectors and are idempotent.
///
/// Under [`TieBreak::Shuffle`] the aggregators see the rows in a seeded
/// permutation fixed at construction, so ties inside every attribute are
/// broken by that permutation. Scores and indices are still reported in
/// table order.
///
/// # Examples
///
/// ```
/// use u_recommend::domain::{Profile, Student};
/// use u_recommend::model::{ModelConfig, RecommendationModel};
/// use u_recommend::points::PolishPointsCalculator;
/// use u_recommend::subjects::SubjectVocabulary;
///
/// let vocab = SubjectVocabulary::polish();
/// let profiles: Vec<Profile> = (0..3u8)
///     .map(|t| {
///         Profile::builder(format!("p{t}"), t)
///             .with_exam_benchmarks(vec![60.0, 60.0, 60.0])
///             .build(&vocab)
///             .unwrap()
///     })
///     .collect();
/// let student = Student::builder()
///     .with_exam_scores(vec![70.0, 70.0, 70.0])
///     .with_desired_school_type(0)
///     .build(&vocab, &PolishPointsCalculator::default())
///     .unwrap();
///
/// let model = RecommendationModel::new(profiles, ModelConfig::default()).unwrap();
/// let top = model.recommend(&student, Some(1)).unwrap();
/// assert_eq!(top[0].name(), "p0");
/// ```
#[derive(Debug)]
pub struct RecommendationModel {
    profiles: Vec<Profile>,
    /// Scoring order as table indices; `None` scores in table order.
    rows: Option<Vec<usize>>,
    registry: ComparatorRegistry,
    aggregators: Vec<Aggregator>,
    config: ModelConfig,
}

impl RecommendationModel {
    /// Builds a model over the standard comparators, configured by
    /// `config.policy`.
    pub fn new(profiles: Vec<Profile>, config: ModelConfig) -> Result<Self> {
        let registry = ComparatorRegistry::standard_with_policy(config.policy)?;
        Self::with_registry(profiles, config, registry)
    }

    /// Builds a model over a caller-supplied registry.
    ///
    /// `config.policy` is not applied here; it only parameterizes the
    /// standard registry.
    pub fn with_registry(
        profiles: Vec<Profile>,
        config: ModelConfig,
        registry: ComparatorRegistry,
    ) -> Result<Self> {
        config.validate()?;

        let aggregators = config
            .aggregators
            .iter()
            .map(|entry| {
                let weights = entry
                    .weights
                    .clone()
                    .or_else(|| config.weights.clone())
                    .unwrap_or_else(|| AttributeWeights::for_registry(&registry));
                weights.validate()?;
                weights.check_registered(&registry)?;
                Ok(Aggregator::new(entry.strategy, weights, config.normalization))
            })
            .collect::<Result<Vec<_>>>()?;

        let rows = match config.tie_break {
            TieBreak::PreserveOrder => None,
            TieBreak::Shuffle { seed } => {
                let mut rows: Vec<usize> = (0..profiles.len()).collect();
                rows.shuffle(&mut StdRng::seed_from_u64(seed));
                Some(rows)
            }
        };

        debug!(
            profiles = profiles.len(),
            aggregators = aggregators.len(),
            attributes = ?registry.names(),
            "recommendation model configured"
        );

        Ok(Self {
            profiles,
            rows,
            registry,
            aggregators,
            config,
        })
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn registry(&self) -> &ComparatorRegistry {
        &self.registry
    }

    pub fn aggregators(&self) -> &[Aggregator] {
        &self.aggregators
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Final score of every profile, in table order: the elementwise mean
    /// of the aggregator scores. Lower is better.
    pub fn scores(&self, student: &Student) -> Result<Vec<f64>> {
        let Some(rows) = &self.rows else {
            return self.mean_scores(student, &self.profiles);
        };

        let view: Vec<&Profile> = rows.iter().map(|&i| &self.profiles[i]).collect();
        let shuffled = self.mean_scores(student, &view)?;
        let mut scores = vec![0.0; rows.len()];
        for (&i, s) in rows.iter().zip(shuffled) {
            scores[i] = s;
        }
        Ok(scores)
    }

    fn mean_scores<P: Borrow<Profile> + Sync>(
        &self,
        student: &Student,
        rows: &[P],
    ) -> Result<Vec<f64>> {
        let mut total = vec![0.0; rows.len()];
        for aggregator in &self.aggregators {
            let scores = aggregator.score_with(&self.registry, student, rows, self.config.parallel)?;
            debug!(strategy = %aggregator.strategy(), "aggregator finished");
            for (t, s) in total.iter_mut().zip(scores) {
                *t += s;
            }
        }

        let n = self.aggregators.len() as f64;
        for t in &mut total {
            *t /= n;
        }
        Ok(total)
    }

    /// Table indices ordered best first.
    pub fn ranked_indices(&self, student: &Student) -> Result<Vec<usize>> {
        let scores = self.scores(student)?;

        let mut order = match &self.rows {
            Some(rows) => rows.clone(),
            None => (0..self.profiles.len()).collect(),
        };
        order.sort_by(|&a, &b| nan_last(scores[a], scores[b]));
        Ok(order)
    }

    /// The best `top_n` profiles (all of them for `None`), best first.
    pub fn recommend(&self, student: &Student, top_n: Option<usize>) -> Result<Vec<&Profile>> {
        let span = info_span!("recommend", profiles = self.profiles.len(), top_n = ?top_n);
        let _guard = span.enter();

        let order = self.ranked_indices(student)?;
        let take = top_n.unwrap_or(order.len());
        Ok(order
            .into_iter()
            .take(take)
            .map(|i| &self.profiles[i])
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::Strategy;
    use crate::compare::SCHOOL_TYPE;
    use crate::error::RecommendError;
    use crate::model::AggregatorConfig;
    use crate::testing::{build_student, student, typed_profiles};
    use std::collections::BTreeSet;

    fn names<'a>(profiles: &[&'a Profile]) -> Vec<&'a str> {
        profiles.iter().map(|p| p.name()).collect()
    }

    fn school_type_only() -> AttributeWeights {
        AttributeWeights::uniform([SCHOOL_TYPE])
    }

    #[test]
    fn test_recommend_orders_by_school_type() {
        let model = RecommendationModel::new(
            typed_profiles(&[2, 0, 1]),
            ModelConfig::default().with_weights(school_type_only()),
        )
        .unwrap();
        let s = build_student(student().with_desired_school_type(0));
        assert_eq!(names(&model.recommend(&s, None).unwrap()), vec!["p1", "p2", "p0"]);
    }

    #[test]
    fn test_top_n_truncates() {
        let model = RecommendationModel::new(typed_profiles(&[0, 1, 2]), ModelConfig::default())
            .unwrap();
        let s = build_student(student());
        assert_eq!(model.recommend(&s, Some(2)).unwrap().len(), 2);
        assert_eq!(model.recommend(&s, Some(10)).unwrap().len(), 3);
        assert!(model.recommend(&s, Some(0)).unwrap().is_empty());
    }

    #[test]
    fn test_empty_table() {
        let model = RecommendationModel::new(Vec::new(), ModelConfig::default()).unwrap();
        let s = build_student(student());
        assert!(model.recommend(&s, None).unwrap().is_empty());
        assert!(model.scores(&s).unwrap().is_empty());
    }

    #[test]
    fn test_empty_aggregators_rejected() {
        let err = RecommendationModel::new(typed_profiles(&[0]), ModelConfig::new()).unwrap_err();
        assert!(matches!(err, RecommendError::Configuration(_)));
    }

    #[test]
    fn test_unknown_weight_attribute_rejected() {
        let config = ModelConfig::default().with_weights(AttributeWeights::uniform(["distance"]));
        let err = RecommendationModel::new(typed_profiles(&[0]), config).unwrap_err();
        assert!(matches!(err, RecommendError::UnknownAttribute { .. }));
    }

    #[test]
    fn test_scores_are_mean_of_aggregators() {
        let profiles = typed_profiles(&[0, 1, 2]);
        let s = build_student(student().with_desired_school_type(0));
        let config = ModelConfig::new()
            .with_aggregator(Strategy::Ranking)
            .with_aggregator(Strategy::MinMax)
            .with_weights(school_type_only());
        let model = RecommendationModel::new(profiles, config).unwrap();
        // ranking [0, 1, 2], min-max [0, 0.5, 1]
        assert_eq!(model.scores(&s).unwrap(), vec![0.0, 0.75, 1.5]);
    }

    #[test]
    fn test_per_aggregator_weights() {
        let config = ModelConfig::new().with_aggregator(
            AggregatorConfig::new(Strategy::Ranking).with_weights(school_type_only()),
        );
        let model = RecommendationModel::new(typed_profiles(&[1, 0]), config).unwrap();
        assert_eq!(model.aggregators()[0].weights().len(), 1);
        let s = build_student(student().with_desired_school_type(0));
        assert_eq!(names(&model.recommend(&s, None).unwrap()), vec!["p1", "p0"]);
    }

    #[test]
    fn test_shuffle_tie_break_is_seeded() {
        let s = build_student(student());
        let order = |seed: u64| {
            let config = ModelConfig::default().with_tie_break(TieBreak::Shuffle { seed });
            let model = RecommendationModel::new(typed_profiles(&[0; 6]), config).unwrap();
            let first: Vec<String> = names(&model.recommend(&s, None).unwrap())
                .into_iter()
                .map(String::from)
                .collect();
            let again: Vec<String> = names(&model.recommend(&s, None).unwrap())
                .into_iter()
                .map(String::from)
                .collect();
            assert_eq!(first, again);
            first
        };

        let orders: BTreeSet<Vec<String>> = (0..20).map(order).collect();
        assert!(orders.len() > 1);
        for o in &orders {
            let mut sorted = o.clone();
            sorted.sort();
            assert_eq!(sorted, vec!["p0", "p1", "p2", "p3", "p4", "p5"]);
        }
    }

    #[test]
    fn test_shuffle_scores_stay_in_table_order() {
        // identical rows: under ranking each gets its position in the permutation
        let config = ModelConfig::default().with_tie_break(TieBreak::Shuffle { seed: 3 });
        let model = RecommendationModel::new(typed_profiles(&[0; 5]), config).unwrap();
        let s = build_student(student());

        let scores = model.scores(&s).unwrap();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(sorted, vec![0.0, 1.0, 2.0, 3.0, 4.0]);

        let order = model.ranked_indices(&s).unwrap();
        for pair in order.windows(2) {
            assert!(scores[pair[0]] < scores[pair[1]]);
        }
    }

    #[test]
    fn test_shuffle_keeps_strict_order() {
        let config = ModelConfig::default()
            .with_weights(school_type_only())
            .with_tie_break(TieBreak::Shuffle { seed: 9 });
        let model = RecommendationModel::new(typed_profiles(&[2, 0, 1]), config).unwrap();
        let s = build_student(student().with_desired_school_type(0));
        assert_eq!(names(&model.recommend(&s, None).unwrap()), vec!["p1", "p2", "p0"]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_scores_match_sequential() {
        use crate::testing::{build_profile, profile};

        let profiles = vec![
            build_profile(profile("a", 2).with_points(10.0, 40.0, 100.0)),
            build_profile(profile("b", 0).with_exam_benchmarks(vec![20.0, 90.0, 40.0])),
            build_profile(profile("c", 1).with_offered_subjects(vec!["math", "physics"])),
            build_profile(
                profile("d", 0)
                    .with_scored_subjects(vec!["math", "physics"])
                    .with_points(95.0, 120.0, 180.0),
            ),
        ];
        let s = build_student(student());

        for strategy in [Strategy::Ranking, Strategy::ZScore, Strategy::MinMax] {
            let sequential =
                RecommendationModel::new(profiles.clone(), ModelConfig::new().with_aggregator(strategy))
                    .unwrap();
            let parallel = RecommendationModel::new(
                profiles.clone(),
                ModelConfig::new().with_aggregator(strategy).with_parallel(true),
            )
            .unwrap();
            assert_eq!(
                sequential.scores(&s).unwrap(),
                parallel.scores(&s).unwrap(),
                "strategy {strategy}"
            );
        }
    }

    #[test]
    fn test_idempotent() {
        let model = RecommendationModel::new(
            typed_profiles(&[1, 2, 0, 1]),
            ModelConfig::from_selectors(["ranking", "zscore"]).unwrap(),
        )
        .unwrap();
        let s = build_student(student());
        assert_eq!(model.scores(&s).unwrap(), model.scores(&s).unwrap());
    }
}
