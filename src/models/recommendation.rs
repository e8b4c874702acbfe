use serde::{Deserialize, Serialize, Serializer};
use std::fmt::Display;

use super::ClothingItem;

/// Human-readable tier for a match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchQuality {
    #[serde(rename = "Perfect Match")]
    Perfect,
    #[serde(rename = "Great Match")]
    Great,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Basic Match")]
    Basic,
    /// Placeholder tier for popular items offered when nothing is selected yet.
    /// Never produced from a score.
    #[serde(rename = "Suggested Item")]
    Suggested,
}

impl MatchQuality {
    /// Classifies a score; lower bounds are inclusive
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            MatchQuality::Perfect
        } else if score >= 60.0 {
            MatchQuality::Great
        } else if score >= 40.0 {
            MatchQuality::Good
        } else {
            MatchQuality::Basic
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchQuality::Perfect => "Perfect Match",
            MatchQuality::Great => "Great Match",
            MatchQuality::Good => "Good Match",
            MatchQuality::Basic => "Basic Match",
            MatchQuality::Suggested => "Suggested Item",
        }
    }
}

impl Display for MatchQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A ranked candidate returned by the recommendation endpoints
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub item: ClothingItem,
    #[serde(serialize_with = "serialize_score")]
    pub score: f64,
    pub quality: MatchQuality,
}

/// Whole scores go out as JSON integers, averages keep their fraction
fn serialize_score<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if score.is_finite() && score.fract() == 0.0 && *score >= 0.0 {
        serializer.serialize_u64(*score as u64)
    } else {
        serializer.serialize_f64(*score)
    }
}
