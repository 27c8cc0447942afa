use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default = "Utc::now")]
    pub published_at: DateTime<Utc>,
}

impl Article {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            author: author.into(),
            summary: None,
            published_at: Utc::now(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl User {
    pub const MAX_INTERESTS: usize = 10;

    pub fn new(id: impl Into<String>, username: impl Into<String>, interests: Vec<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            interests,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    View,
    Like,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Like => "like",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "like" => Ok(Self::Like),
            other => Err(Error::InvalidArgument(format!(
                "Unknown interaction kind: {} (expected view or like)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub user_id: String,
    pub article_id: String,
    pub kind: InteractionKind,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// The only supported query filter for interaction listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionFilter {
    #[serde(default)]
    pub kind: Option<InteractionKind>,
}

impl InteractionFilter {
    pub fn kind(kind: InteractionKind) -> Self {
        Self { kind: Some(kind) }
    }

    pub fn matches(&self, interaction: &Interaction) -> bool {
        self.kind.map_or(true, |kind| interaction.kind == kind)
    }
}

/// Requested result size, always within `[Limit::MIN, Limit::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Limit(usize);

impl Limit {
    pub const MIN: usize = 1;
    pub const MAX: usize = 50;
    pub const DEFAULT: usize = 10;

    pub fn new(value: usize) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidArgument(format!(
                "limit must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl<'de> Deserialize<'de> for Limit {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = usize::deserialize(deserializer)?;
        Limit::new(value).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    InterestBased,
    PopularityBased,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub article: Article,
    pub score: f64,
    pub reason: String,
    pub strategy: Strategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_interests: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
    pub interests: Vec<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            interests: user.interests.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationMetadata {
    pub total: usize,
    pub interest_based: usize,
    pub popularity_based: usize,
    pub algorithm: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub user: UserSummary,
    pub recommendations: Vec<Recommendation>,
    pub metadata: RecommendationMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    pub article: Article,
    pub score: f64,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_bounds() {
        assert!(Limit::new(0).is_err());
        assert!(Limit::new(51).is_err());
        assert_eq!(Limit::new(1).unwrap().get(), 1);
        assert_eq!(Limit::new(50).unwrap().get(), 50);
        assert_eq!(Limit::default().get(), 10);
    }

    #[test]
    fn test_limit_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Limit>("0").is_err());
        assert_eq!(serde_json::from_str::<Limit>("25").unwrap().get(), 25);
    }

    #[test]
    fn test_interaction_kind_parsing() {
        assert_eq!("view".parse::<InteractionKind>().unwrap(), InteractionKind::View);
        assert_eq!(" LIKE ".parse::<InteractionKind>().unwrap(), InteractionKind::Like);
        assert!("share".parse::<InteractionKind>().is_err());
        assert_eq!(serde_json::to_string(&InteractionKind::Like).unwrap(), "\"like\"");
    }

    #[test]
    fn test_filter_matches() {
        let interaction = Interaction {
            id: "i1".to_string(),
            user_id: "u1".to_string(),
            article_id: "a1".to_string(),
            kind: InteractionKind::View,
            created_at: Utc::now(),
        };
        assert!(InteractionFilter::default().matches(&interaction));
        assert!(InteractionFilter::kind(InteractionKind::View).matches(&interaction));
        assert!(!InteractionFilter::kind(InteractionKind::Like).matches(&interaction));
    }
}
