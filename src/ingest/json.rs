//! School → profiles JSON documents.
//!
//! ```json
//! {"schools": [{
//!     "name": "...", "type": "liceum / publiczna", "address": "...",
//!     "matura_exam_results": {"polish": 61.0, "math": 48.5, "english": 77.0},
//!     "profiles": [{
//!         "name": "...", "extended_subjects": ["..."], "scored_subjects": ["..."],
//!         "min_points": 120.0, "avg_points": 140.5, "max_points": 170.0
//!     }]
//! }]}
//! ```

use super::{core_exam_scores, require, school_type_code, IngestResult};
use crate::domain::Profile;
use crate::subjects::SubjectVocabulary;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct Document {
    schools: Option<Vec<RawSchool>>,
}

#[derive(Debug, Deserialize)]
struct RawSchool {
    name: Option<String>,
    #[serde(rename = "type")]
    school_type: Option<String>,
    #[serde(default)]
    address: String,
    matura_exam_results: Option<BTreeMap<String, f64>>,
    profiles: Option<Vec<RawProfile>>,
}

#[derive(Debug, Deserialize)]
struct RawProfile {
    name: Option<String>,
    extended_subjects: Option<Vec<String>>,
    scored_subjects: Option<Vec<String>>,
    min_points: Option<f64>,
    avg_points: Option<f64>,
    max_points: Option<f64>,
}

/// Reads a JSON document from `path`.
pub fn load_json(path: impl AsRef<Path>, vocabulary: &SubjectVocabulary) -> IngestResult<Vec<Profile>> {
    let file = File::open(path.as_ref())?;
    debug!(path = %path.as_ref().display(), "loading profiles from JSON");
    profiles_from_json_reader(BufReader::new(file), vocabulary)
}

pub fn profiles_from_json_reader<R: Read>(
    reader: R,
    vocabulary: &SubjectVocabulary,
) -> IngestResult<Vec<Profile>> {
    let document: Document = serde_json::from_reader(reader)?;
    build(document, vocabulary)
}

/// Parses a JSON document; every school contributes all of its profiles,
/// in document order.
pub fn profiles_from_json_str(json: &str, vocabulary: &SubjectVocabulary) -> IngestResult<Vec<Profile>> {
    let document: Document = serde_json::from_str(json)?;
    build(document, vocabulary)
}

fn build(document: Document, vocabulary: &SubjectVocabulary) -> IngestResult<Vec<Profile>> {
    require("document", &[("schools", document.schools.is_some())])?;

    let mut profiles = Vec::new();
    for (i, school) in document.schools.unwrap_or_default().into_iter().enumerate() {
        let context = match &school.name {
            Some(name) => format!("school `{name}`"),
            None => format!("schools[{i}]"),
        };
        require(
            &context,
            &[
                ("name", school.name.is_some()),
                ("type", school.school_type.is_some()),
                ("matura_exam_results", school.matura_exam_results.is_some()),
                ("profiles", school.profiles.is_some()),
            ],
        )?;

        let (Some(name), Some(label), Some(exams), Some(raw_profiles)) = (
            school.name,
            school.school_type,
            school.matura_exam_results,
            school.profiles,
        ) else {
            continue;
        };

        let school_type = school_type_code(&label, &context)?;
        let benchmarks = core_exam_scores(exams.iter().map(|(k, v)| (k.as_str(), *v)), &context)?;

        for (j, raw) in raw_profiles.into_iter().enumerate() {
            let profile_context = match &raw.name {
                Some(p) => format!("profile `{p}` of {context}"),
                None => format!("profiles[{j}] of {context}"),
            };
            profiles.push(build_profile(
                raw,
                &profile_context,
                &name,
                &school.address,
                school_type,
                &benchmarks,
                vocabulary,
            )?);
        }
    }

    debug!(profiles = profiles.len(), "profiles loaded");
    Ok(profiles)
}

fn build_profile(
    raw: RawProfile,
    context: &str,
    school: &str,
    address: &str,
    school_type: u8,
    benchmarks: &[f64],
    vocabulary: &SubjectVocabulary,
) -> IngestResult<Profile> {
    require(
        context,
        &[
            ("name", raw.name.is_some()),
            ("extended_subjects", raw.extended_subjects.is_some()),
            ("scored_subjects", raw.scored_subjects.is_some()),
            ("min_points", raw.min_points.is_some()),
            ("avg_points", raw.avg_points.is_some()),
            ("max_points", raw.max_points.is_some()),
        ],
    )?;

    let profile = Profile::builder(raw.name.unwrap_or_default(), school_type)
        .with_school(school)
        .with_address(address)
        .with_exam_benchmarks(benchmarks.to_vec())
        .with_offered_subjects(raw.extended_subjects.unwrap_or_default())
        .with_scored_subjects(raw.scored_subjects.unwrap_or_default())
        .with_points(
            raw.min_points.unwrap_or_default(),
            raw.avg_points.unwrap_or_default(),
            raw.max_points.unwrap_or_default(),
        )
        .build(vocabulary)?;
    Ok(profile)
}
