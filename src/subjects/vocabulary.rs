//! Fixed subject vocabulary.

use crate::error::{RecommendError, Result};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Subjects known to the default (Polish secondary-school) vocabulary.
const POLISH_SUBJECTS: &[&str] = &[
    "historia",
    "język angielski",
    "język polski",
    "matematyka",
    "biologia",
    "geografia",
    "informatyka",
    "chemia",
    "fizyka",
    "wos",
    "język łaciński",
    "język obcy",
    "historia sztuki",
    "język niemiecki",
    "język hiszpański",
    "język włoski",
    "język francuski",
    "język rosyjski",
    "wf",
    "technika",
    "plastyka",
    "muzyka",
    "przyroda",
    "edukacja dla bezpieczeństwa",
];

static GLOBAL: OnceLock<SubjectVocabulary> = OnceLock::new();

/// Best-effort normalization of a subject name before lookup.
///
/// Tabs and runs of whitespace collapse to one space, the result is
/// trimmed and lowercased.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Ordered list of subject names shared by every subject vector.
///
/// Vector positions follow the order given at construction.
///
/// # Examples
///
/// ```
/// use u_recommend::subjects::SubjectVocabulary;
///
/// let vocab = SubjectVocabulary::new(["math", "physics"]).unwrap();
/// assert_eq!(vocab.index_of("\tphysics"), Some(1));
/// assert_eq!(vocab.index_of("art"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectVocabulary {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl SubjectVocabulary {
    /// Builds a vocabulary from names in order.
    ///
    /// Names that collide after normalization are rejected.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            let key = normalize_name(name);
            if key.is_empty() {
                return Err(RecommendError::configuration(format!(
                    "subject vocabulary entry {i} is blank"
                )));
            }
            if index.insert(key, i).is_some() {
                return Err(RecommendError::configuration(format!(
                    "duplicate subject in vocabulary: {name}"
                )));
            }
        }
        Ok(Self { names, index })
    }

    /// The default vocabulary of Polish school subjects.
    pub fn polish() -> Self {
        let names: Vec<String> = POLISH_SUBJECTS.iter().map(|s| s.to_string()).collect();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (normalize_name(name), i))
            .collect();
        Self { names, index }
    }

    /// Returns the process-wide vocabulary.
    ///
    /// Initialized on first use with [`SubjectVocabulary::polish`] unless
    /// [`SubjectVocabulary::install_global`] ran first.
    pub fn global() -> &'static SubjectVocabulary {
        GLOBAL.get_or_init(Self::polish)
    }

    /// Installs `vocabulary` as the process-wide vocabulary.
    ///
    /// Fails if a global vocabulary is already in place; it is immutable
    /// once loaded.
    pub fn install_global(vocabulary: SubjectVocabulary) -> Result<&'static SubjectVocabulary> {
        GLOBAL
            .set(vocabulary)
            .map_err(|_| RecommendError::configuration("global subject vocabulary already loaded"))?;
        Ok(Self::global())
    }

    /// Number of subjects (the length of every subject vector).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Subject names in vector order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Position of `name`, after whitespace and case normalization.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(&normalize_name(name)).copied()
    }
}

impl Default for SubjectVocabulary {
    fn default() -> Self {
        Self::polish()
    }
}
