//! Mood profile records and the closed vocabularies they are built from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// Closed vocabularies
// ============================================================================

/// Music energy level. Ranked 1 (very low) to 5 (very high) for averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Energy {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl Energy {
    pub const ALL: [Energy; 5] = [
        Energy::VeryLow,
        Energy::Low,
        Energy::Medium,
        Energy::High,
        Energy::VeryHigh,
    ];

    pub fn rank(self) -> u8 {
        match self {
            Energy::VeryLow => 1,
            Energy::Low => 2,
            Energy::Medium => 3,
            Energy::High => 4,
            Energy::VeryHigh => 5,
        }
    }

    /// Inverse of [`Energy::rank`]; out-of-range ranks are clamped to `[1, 5]`.
    pub fn from_rank(rank: u8) -> Self {
        match rank {
            0 | 1 => Energy::VeryLow,
            2 => Energy::Low,
            3 => Energy::Medium,
            4 => Energy::High,
            _ => Energy::VeryHigh,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Energy::VeryLow => "very_low",
            Energy::Low => "low",
            Energy::Medium => "medium",
            Energy::High => "high",
            Energy::VeryHigh => "very_high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieTone {
    Light,
    Serious,
    Balanced,
    Dark,
    Uplifting,
    Intense,
}

impl MovieTone {
    pub fn as_str(self) -> &'static str {
        match self {
            MovieTone::Light => "light",
            MovieTone::Serious => "serious",
            MovieTone::Balanced => "balanced",
            MovieTone::Dark => "dark",
            MovieTone::Uplifting => "uplifting",
            MovieTone::Intense => "intense",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookPacing {
    #[serde(alias = "very slow")]
    VerySlow,
    Slow,
    Moderate,
    Fast,
    Contemplative,
}

impl BookPacing {
    pub fn as_str(self) -> &'static str {
        match self {
            BookPacing::VerySlow => "very_slow",
            BookPacing::Slow => "slow",
            BookPacing::Moderate => "moderate",
            BookPacing::Fast => "fast",
            BookPacing::Contemplative => "contemplative",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookDepth {
    Light,
    Medium,
    Deep,
    Profound,
}

impl BookDepth {
    pub fn as_str(self) -> &'static str {
        match self {
            BookDepth::Light => "light",
            BookDepth::Medium => "medium",
            BookDepth::Deep => "deep",
            BookDepth::Profound => "profound",
        }
    }
}

/// What recommendations should do relative to the detected mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Validate the current state.
    Match,
    /// Gradually lift the mood.
    Uplift,
    /// Help work through the feeling.
    Process,
    /// Offer distraction.
    Escape,
    /// Redirect intense energy.
    Channel,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Match => "match",
            Strategy::Uplift => "uplift",
            Strategy::Process => "process",
            Strategy::Escape => "escape",
            Strategy::Channel => "channel",
        }
    }
}

/// Coarse mood grouping. Assigned by the catalog bucket a mood is registered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Positive,
    Negative,
    Energy,
    Social,
    Existential,
    #[serde(alias = "complex")]
    Transitional,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Positive,
        Category::Negative,
        Category::Energy,
        Category::Social,
        Category::Existential,
        Category::Transitional,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Positive => "positive",
            Category::Negative => "negative",
            Category::Energy => "energy",
            Category::Social => "social",
            Category::Existential => "existential",
            Category::Transitional => "transitional",
        }
    }

    /// Parse a category name, accepting `complex` as the legacy name of
    /// `transitional`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "positive" => Some(Category::Positive),
            "negative" => Some(Category::Negative),
            "energy" => Some(Category::Energy),
            "social" => Some(Category::Social),
            "existential" => Some(Category::Existential),
            "transitional" | "complex" => Some(Category::Transitional),
            _ => None,
        }
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_via_as_str!(Energy, MovieTone, BookPacing, BookDepth, Strategy, Category);

// ============================================================================
// Profiles
// ============================================================================

/// The genre/theme/keyword/tone fields used to parameterize catalog search.
///
/// List fields are in preference order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecommendationProfile {
    pub music_genres: Vec<String>,
    pub music_vibe: Vec<String>,
    pub music_keywords: Vec<String>,
    pub music_energy: Energy,

    pub movie_genres: Vec<String>,
    pub movie_themes: Vec<String>,
    pub movie_keywords: Vec<String>,
    pub movie_tone: MovieTone,

    pub book_genres: Vec<String>,
    pub book_themes: Vec<String>,
    pub book_keywords: Vec<String>,
    pub book_pacing: BookPacing,
    pub book_depth: BookDepth,

    pub avoid_themes: BTreeSet<String>,
    #[serde(alias = "recommendation_strategy")]
    pub strategy: Strategy,
}

impl RecommendationProfile {
    /// All ordered list fields with their names, in declaration order.
    pub fn list_fields(&self) -> [(&'static str, &Vec<String>); 9] {
        [
            ("music_genres", &self.music_genres),
            ("music_vibe", &self.music_vibe),
            ("music_keywords", &self.music_keywords),
            ("movie_genres", &self.movie_genres),
            ("movie_themes", &self.movie_themes),
            ("movie_keywords", &self.movie_keywords),
            ("book_genres", &self.book_genres),
            ("book_themes", &self.book_themes),
            ("book_keywords", &self.book_keywords),
        ]
    }
}

/// One canonical catalog mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodProfile {
    pub key: String,
    pub category: Category,
    #[serde(flatten)]
    pub recommendation: RecommendationProfile,
}

/// A well-formedness problem found on a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileIssue {
    EmptyField(&'static str),
    KeyNotNormalized { key: String, normalized: String },
    /// A catalog table restates a category other than the bucket it sits in.
    CategoryMismatch { bucket: Category, declared: String },
}

impl fmt::Display for ProfileIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileIssue::EmptyField(field) => write!(f, "{} is empty", field),
            ProfileIssue::KeyNotNormalized { key, normalized } => {
                write!(f, "key '{}' should be written '{}'", key, normalized)
            }
            ProfileIssue::CategoryMismatch { bucket, declared } => write!(
                f,
                "category '{}' disagrees with its '{}' bucket",
                declared, bucket
            ),
        }
    }
}

impl MoodProfile {
    /// Everything wrong with this entry. Empty means well-formed.
    pub fn issues(&self) -> Vec<ProfileIssue> {
        let mut issues = Vec::new();

        let normalized = crate::resolver::normalize_mood(&self.key);
        if normalized != self.key {
            issues.push(ProfileIssue::KeyNotNormalized {
                key: self.key.clone(),
                normalized,
            });
        }

        for (name, values) in self.recommendation.list_fields() {
            if values.is_empty() || values.iter().all(|v| v.trim().is_empty()) {
                issues.push(ProfileIssue::EmptyField(name));
            }
        }
        if self.recommendation.avoid_themes.is_empty() {
            issues.push(ProfileIssue::EmptyField("avoid_themes"));
        }

        issues
    }

    pub fn is_well_formed(&self) -> bool {
        self.issues().is_empty()
    }

    pub fn strategy(&self) -> Strategy {
        self.recommendation.strategy
    }

    pub fn energy(&self) -> Energy {
        self.recommendation.music_energy
    }
}
