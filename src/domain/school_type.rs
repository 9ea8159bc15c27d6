//! School type vocabulary.

use crate::subjects::normalize_name;

/// Kind of secondary school. The numeric code is what comparators see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SchoolType {
    /// General education (liceum).
    Liceum,
    /// Technical school (technikum).
    Technikum,
    /// Vocational school (branżowa szkoła I stopnia).
    Branzowa,
}

impl SchoolType {
    pub const ALL: [SchoolType; 3] = [Self::Liceum, Self::Technikum, Self::Branzowa];

    /// Category code: 0 liceum, 1 technikum, 2 vocational.
    pub fn code(self) -> u8 {
        match self {
            Self::Liceum => 0,
            Self::Technikum => 1,
            Self::Branzowa => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Parses a source label such as `"technikum / publiczna"`.
    ///
    /// Ownership suffixes (`/ publiczna`, `/ niepubliczna`) are ignored.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = normalize_name(label);
        let kind = normalized.split('/').next().unwrap_or_default().trim();
        match kind {
            "liceum" => Some(Self::Liceum),
            "technikum" => Some(Self::Technikum),
            "branżowa szkoła i stopnia" | "branzowa szkola i stopnia" | "branżowa" => {
                Some(Self::Branzowa)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(SchoolType::Liceum.code(), 0);
        assert_eq!(SchoolType::Technikum.code(), 1);
        assert_eq!(SchoolType::Branzowa.code(), 2);
        assert_eq!(SchoolType::from_code(1), Some(SchoolType::Technikum));
        assert_eq!(SchoolType::from_code(9), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            SchoolType::from_label("liceum / niepubliczna"),
            Some(SchoolType::Liceum)
        );
        assert_eq!(
            SchoolType::from_label("Technikum / publiczna"),
            Some(SchoolType::Technikum)
        );
        assert_eq!(
            SchoolType::from_label("branżowa szkoła I stopnia / publiczna"),
            Some(SchoolType::Branzowa)
        );
        assert_eq!(SchoolType::from_label("uniwersytet"), None);
    }
}
