use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Numeric identifier for a provider question category
/// (e.g. 9 = General Knowledge, 18 = Computers).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(u32);

impl CategoryId {
    /// Creates a new `CategoryId`
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryId({})", self.0)
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for parsing a `CategoryId` from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse category id from string")]
pub struct ParseCategoryIdError;

impl FromStr for CategoryId {
    type Err = ParseCategoryIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map(CategoryId::new)
            .map_err(|_| ParseCategoryIdError)
    }
}

/// Question difficulty as understood by the trivia provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// The lowercase wire form used in fetch requests.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for parsing a `Difficulty` from a string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty: {0}")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(ParseDifficultyError(other.to_owned())),
        }
    }
}

/// Optional category/difficulty filters for one quiz session.
///
/// `None` means "any". Filters are captured when a session starts loading
/// and stay fixed for the life of that session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionFilters {
    category: Option<CategoryId>,
    difficulty: Option<Difficulty>,
}

impl SessionFilters {
    /// Any category, any difficulty.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    #[must_use]
    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    /// Returns true when neither filter is set.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.category.is_none() && self.difficulty.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_id_display_and_parse() {
        let id = CategoryId::new(9);
        assert_eq!(id.to_string(), "9");
        assert_eq!("9".parse::<CategoryId>().unwrap(), id);
        assert!("general".parse::<CategoryId>().is_err());
    }

    #[test]
    fn difficulty_round_trips_through_str() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            let parsed: Difficulty = difficulty.as_str().parse().unwrap();
            assert_eq!(parsed, difficulty);
        }
    }

    #[test]
    fn difficulty_rejects_unknown_values() {
        let err = "impossible".parse::<Difficulty>().unwrap_err();
        assert_eq!(err, ParseDifficultyError("impossible".into()));
    }

    #[test]
    fn filters_builders_set_fields() {
        let filters = SessionFilters::any()
            .with_category(CategoryId::new(18))
            .with_difficulty(Difficulty::Hard);

        assert_eq!(filters.category(), Some(CategoryId::new(18)));
        assert_eq!(filters.difficulty(), Some(Difficulty::Hard));
        assert!(!filters.is_unfiltered());
        assert!(SessionFilters::any().is_unfiltered());
    }
}
