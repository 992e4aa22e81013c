//! Exact-then-fuzzy lookup of free-text mood tokens.

use crate::catalog::MoodCatalog;
use crate::error::{MoodError, Result};
use crate::profile::MoodProfile;
use crate::similarity::StringSimilarity;
use std::sync::Arc;

/// Canonical form of a mood token: lowercase, punctuation dropped, runs of
/// whitespace, `_` and `-` collapsed into a single `_`.
///
/// `"  Burnt-Out! "` becomes `"burnt_out"`.
pub fn normalize_mood(token: &str) -> String {
    let mut out = String::with_capacity(token.len());
    let mut pending_separator = false;
    for ch in token.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(ch);
        } else if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_separator = true;
        }
    }
    out
}

/// A successful lookup.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub profile: &'a MoodProfile,
    /// 1.0 for exact and stem matches, otherwise the similarity score.
    pub score: f64,
    pub exact: bool,
}

pub struct MoodResolver {
    catalog: Arc<MoodCatalog>,
    similarity: Arc<dyn StringSimilarity>,
    threshold: f64,
}

impl MoodResolver {
    /// `threshold` is exclusive: a fuzzy candidate must score strictly above it.
    pub fn new(
        catalog: Arc<MoodCatalog>,
        similarity: Arc<dyn StringSimilarity>,
        threshold: f64,
    ) -> Self {
        Self {
            catalog,
            similarity,
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn resolve(&self, token: &str) -> Result<&MoodProfile> {
        self.resolve_detailed(token).map(|r| r.profile)
    }

    pub fn resolve_detailed(&self, token: &str) -> Result<Resolution<'_>> {
        let normalized = normalize_mood(token);
        if normalized.is_empty() {
            return Err(MoodError::NotFound(token.to_string()));
        }

        if let Some(profile) = self.catalog.get(&normalized) {
            return Ok(Resolution {
                profile,
                score: 1.0,
                exact: true,
            });
        }

        if let Some((key, score)) = self.best_match(std::slice::from_ref(&normalized)) {
            if score > self.threshold {
                return self.fuzzy_hit(token, &normalized, key, score);
            }
            tracing::debug!(
                "No close mood for '{}': best candidate '{}' scored {:.3} (threshold {:.3})",
                normalized,
                key,
                score,
                self.threshold
            );
        }

        // Derived forms ("sadness", "excitement") fall back to their stems.
        let stems = suffix_stems(&normalized);
        if let Some(profile) = stems.iter().find_map(|stem| self.catalog.get(stem)) {
            tracing::debug!("Matched '{}' to '{}' by its stem", normalized, profile.key);
            return Ok(Resolution {
                profile,
                score: 1.0,
                exact: false,
            });
        }
        match self.best_match(&stems) {
            Some((key, score)) if score > self.threshold => {
                self.fuzzy_hit(token, &normalized, key, score)
            }
            _ => Err(MoodError::NotFound(token.to_string())),
        }
    }

    /// Highest-scoring key against any of `candidates`.
    ///
    /// Keys are sorted and only a strictly better score replaces the
    /// candidate, so ties go to the lexicographically smallest key.
    fn best_match(&self, candidates: &[String]) -> Option<(&str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for key in self.catalog.keys() {
            for candidate in candidates {
                let score = self.similarity.similarity(candidate, key);
                if best.map_or(true, |(_, top)| score > top) {
                    best = Some((key.as_str(), score));
                }
            }
        }
        best
    }

    fn fuzzy_hit(
        &self,
        token: &str,
        normalized: &str,
        key: &str,
        score: f64,
    ) -> Result<Resolution<'_>> {
        tracing::debug!(
            "Fuzzy-matched '{}' to '{}' ({} score {:.3})",
            normalized,
            key,
            self.similarity.name(),
            score
        );
        let profile = self
            .catalog
            .get(key)
            .ok_or_else(|| MoodError::NotFound(token.to_string()))?;
        Ok(Resolution {
            profile,
            score,
            exact: false,
        })
    }
}

/// Noun and adverb endings with the adjective ending they replace.
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("iness", "y"),
    ("ness", ""),
    ("ment", "ed"),
    ("ment", ""),
    ("ion", "ed"),
    ("ity", ""),
    ("ing", "ed"),
    ("er", "ry"),
    ("ly", ""),
    ("s", ""),
];

const MIN_STEM_LEN: usize = 3;

/// Candidate base forms of `normalized`, in rule order, without repeats.
fn suffix_stems(normalized: &str) -> Vec<String> {
    let mut stems: Vec<String> = Vec::new();
    for (ending, replacement) in SUFFIX_RULES {
        let Some(stem) = normalized.strip_suffix(ending) else {
            continue;
        };
        if stem.chars().count() < MIN_STEM_LEN {
            continue;
        }
        let candidate = format!("{}{}", stem, replacement);
        if candidate != normalized && !stems.contains(&candidate) {
            stems.push(candidate);
        }
    }
    stems
}
