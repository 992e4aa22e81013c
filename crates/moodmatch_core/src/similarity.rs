//! Pluggable string-similarity strategies for fuzzy mood lookup.

use serde::Deserialize;
use std::sync::Arc;

/// Scores how alike two (already normalized) strings are.
///
/// Implementations must return a value in `[0.0, 1.0]`, with `1.0` for
/// identical inputs, and must be pure.
pub trait StringSimilarity: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;

    fn name(&self) -> &'static str;
}

/// `1 - levenshtein(a, b) / max(len)`.
///
/// On a five-letter word a single insertion, deletion or substitution scores
/// at least 0.8.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedLevenshtein;

impl StringSimilarity for NormalizedLevenshtein {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b).clamp(0.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "levenshtein"
    }
}

/// Jaro-Winkler, which favours shared prefixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct JaroWinkler;

impl StringSimilarity for JaroWinkler {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        strsim::jaro_winkler(a, b).clamp(0.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "jaro_winkler"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityAlgorithm {
    #[default]
    Levenshtein,
    JaroWinkler,
}

impl SimilarityAlgorithm {
    pub fn build(self) -> Arc<dyn StringSimilarity> {
        match self {
            SimilarityAlgorithm::Levenshtein => Arc::new(NormalizedLevenshtein),
            SimilarityAlgorithm::JaroWinkler => Arc::new(JaroWinkler),
        }
    }

    /// Minimum score (exclusive) at which a fuzzy match is accepted.
    ///
    /// Jaro-Winkler scores unrelated short words much higher than
    /// Levenshtein does, so it needs a stricter cut-off.
    pub fn default_threshold(self) -> f64 {
        match self {
            SimilarityAlgorithm::Levenshtein => 0.7,
            SimilarityAlgorithm::JaroWinkler => 0.88,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "levenshtein" => Some(SimilarityAlgorithm::Levenshtein),
            "jaro_winkler" | "jaro-winkler" => Some(SimilarityAlgorithm::JaroWinkler),
            _ => None,
        }
    }
}
