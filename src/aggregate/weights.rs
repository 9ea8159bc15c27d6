//! Per-attribute weights.

use crate::compare::ComparatorRegistry;
use crate::error::{RecommendError, Result};

/// Attribute name → non-negative weight.
///
/// Insertion order is the order in which aggregators visit attributes.
/// Setting the weight of an attribute that is already present replaces it
/// in place.
///
/// # Examples
///
/// ```
/// use u_recommend::aggregate::AttributeWeights;
///
/// let weights = AttributeWeights::new()
///     .with_weight("school_type", 1.0)
///     .with_weight("admission_points", 0.5);
/// assert_eq!(weights.sum(), 1.5);
/// assert_eq!(weights.get("exam_scores"), None);
/// ```
///
/// With the `serde` feature the weights (de)serialize as a map, keeping
/// the order of its entries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeWeights {
    entries: Vec<(String, f64)>,
}

impl AttributeWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weight 1 for every name, in the given order.
    pub fn uniform<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_pairs(names.into_iter().map(|n| (n, 1.0)))
    }

    /// Uniform weights over every comparator in `registry`.
    pub fn for_registry(registry: &ComparatorRegistry) -> Self {
        Self::uniform(registry.names())
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        pairs
            .into_iter()
            .fold(Self::new(), |acc, (name, w)| acc.with_weight(name, w))
    }

    pub fn with_weight(mut self, attribute: impl Into<String>, weight: f64) -> Self {
        let attribute = attribute.into();
        match self.entries.iter_mut().find(|(name, _)| *name == attribute) {
            Some(entry) => entry.1 = weight,
            None => self.entries.push((attribute, weight)),
        }
        self
    }

    pub fn get(&self, attribute: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|&(_, w)| w)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, w)| (name.as_str(), *w))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|&(_, w)| w).sum()
    }

    /// Checks that every weight is finite and non-negative and that the
    /// weights do not sum to zero.
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(RecommendError::configuration("weights must name at least one attribute"));
        }
        for (name, w) in &self.entries {
            if !w.is_finite() || *w < 0.0 {
                return Err(RecommendError::configuration(format!(
                    "weight of `{name}` must be finite and non-negative, got {w}"
                )));
            }
        }
        if self.sum() <= 0.0 {
            return Err(RecommendError::configuration("attribute weights sum to zero"));
        }
        Ok(())
    }

    /// Fails with `UnknownAttribute` on the first name `registry` lacks.
    pub fn check_registered(&self, registry: &ComparatorRegistry) -> Result<()> {
        match self.entries.iter().find(|(name, _)| !registry.contains(name)) {
            Some((name, _)) => Err(registry.unknown(name)),
            None => Ok(()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for AttributeWeights {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, weight) in &self.entries {
            map.serialize_entry(name, weight)?;
        }
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for AttributeWeights {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct WeightsVisitor;

        impl<'de> serde::de::Visitor<'de> for WeightsVisitor {
            type Value = AttributeWeights;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of attribute names to weights")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut weights = AttributeWeights::new();
                while let Some((name, weight)) = access.next_entry::<String, f64>()? {
                    weights = weights.with_weight(name, weight);
                }
                Ok(weights)
            }
        }

        deserializer.deserialize_map(WeightsVisitor)
    }
}
