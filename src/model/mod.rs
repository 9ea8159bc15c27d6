//! Recommendation model: configuration and query.
//!
//! [`RecommendationModel`] holds the profile table, the comparator registry
//! and one or more aggregators. A query scores the table with every
//! aggregator, averages the scores and returns the best profiles.

mod config;
mod runner;

pub use config::{AggregatorConfig, ModelConfig, TieBreak};
pub use runner::RecommendationModel;
