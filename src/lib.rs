//! Deterministic weighted multi-criteria recommendation of school profiles.
//!
//! Each candidate profile is compared with a student on a set of named
//! attributes. A comparator turns one (student, profile) pair into a
//! distance, lower being a better match; aggregators combine the distances
//! of the whole table into one score per profile; the model averages the
//! aggregators and returns the best profiles.
//!
//! - **Subjects**: a fixed subject vocabulary and the encoding of sparse
//!   subject lists and mappings into dense vectors.
//! - **Points**: admission points behind a replaceable calculator, with the
//!   Polish formulas as the default.
//! - **Comparators**: school type, exam results, subject affinity and
//!   admission points, looked up in an explicit registry.
//! - **Aggregators**: rank-based and normalization-based (z-score or
//!   min-max), weighted per attribute and per student preference.
//! - **Model**: profile table + aggregators, queried with `recommend`.
//! - **Ingest** (feature `io`): JSON and CSV profile tables.
//!
//! # Example
//!
//! ```
//! use u_recommend::aggregate::{AttributeWeights, Strategy};
//! use u_recommend::domain::{Profile, Student};
//! use u_recommend::model::{ModelConfig, RecommendationModel};
//! use u_recommend::points::PolishPointsCalculator;
//! use u_recommend::subjects::SubjectVocabulary;
//!
//! let vocab = SubjectVocabulary::polish();
//! let profiles = vec![
//!     Profile::builder("mat-fiz", 0)
//!         .with_exam_benchmarks(vec![70.0, 80.0, 75.0])
//!         .with_offered_subjects(vec!["matematyka", "fizyka"])
//!         .with_scored_subjects(vec!["matematyka", "fizyka"])
//!         .with_points(150.0, 165.0, 190.0)
//!         .build(&vocab)
//!         .unwrap(),
//!     Profile::builder("Technik programista", 1)
//!         .with_exam_benchmarks(vec![55.0, 60.0, 58.0])
//!         .with_offered_subjects(vec!["matematyka", "informatyka"])
//!         .with_scored_subjects(vec!["matematyka", "informatyka"])
//!         .with_points(90.0, 110.0, 140.0)
//!         .build(&vocab)
//!         .unwrap(),
//! ];
//!
//! let student = Student::builder()
//!     .with_named_exam_scores(vec![("polish", 60.0), ("math", 62.0), ("english", 55.0)])
//!     .with_grades(vec![("matematyka", 4.0), ("informatyka", 5.0)])
//!     .with_liked_subjects(vec!["informatyka"])
//!     .with_desired_school_type(1)
//!     .build(&vocab, &PolishPointsCalculator::default())
//!     .unwrap();
//!
//! let config = ModelConfig::new()
//!     .with_aggregator(Strategy::Ranking)
//!     .with_aggregator(Strategy::ZScore);
//! let model = RecommendationModel::new(profiles, config).unwrap();
//!
//! let best = model.recommend(&student, Some(1)).unwrap();
//! assert_eq!(best[0].name(), "Technik programista");
//! ```

pub mod aggregate;
pub mod compare;
pub mod domain;
pub mod error;
#[cfg(feature = "io")]
pub mod ingest;
pub mod model;
pub mod points;
pub mod subjects;

#[cfg(test)]
mod testing;

pub use error::{RecommendError, Result};
pub use model::{ModelConfig, RecommendationModel};
