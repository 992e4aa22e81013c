//! Weighted merging of several moods into one composite profile.
//!
//! The first mood is primary: it carries 60% of the weight and owns every
//! scalar field except energy. The remaining 40% is split evenly across the
//! secondary moods and only affects the energy average. List fields are a
//! deduplicated union in priority order, capped at `list_cap`.

use crate::error::{MoodError, Result};
use crate::profile::{Category, Energy, MoodProfile, RecommendationProfile};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

pub const DEFAULT_LIST_CAP: usize = 8;

/// Per-position weights for a merge of `count` moods.
///
/// Weights are held as integer parts of a common whole so averages can be
/// computed exactly: for `n >= 2` the whole is `5(n-1)`, the primary holds
/// `3(n-1)` parts (0.6) and every secondary holds 2 (0.4 split evenly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeWeights {
    pub count: usize,
    primary_parts: u64,
    secondary_parts: u64,
    total_parts: u64,
}

impl MergeWeights {
    pub fn for_count(count: usize) -> Self {
        match count {
            0 | 1 => Self {
                count,
                primary_parts: 1,
                secondary_parts: 0,
                total_parts: 1,
            },
            n => {
                let others = (n - 1) as u64;
                Self {
                    count: n,
                    primary_parts: 3 * others,
                    secondary_parts: 2,
                    total_parts: 5 * others,
                }
            }
        }
    }

    /// Integer share of `position` out of [`MergeWeights::total_parts`].
    pub fn parts_of(&self, position: usize) -> u64 {
        if position == 0 {
            self.primary_parts
        } else if position < self.count {
            self.secondary_parts
        } else {
            0
        }
    }

    pub fn total_parts(&self) -> u64 {
        self.total_parts
    }

    pub fn weight_of(&self, position: usize) -> f64 {
        self.parts_of(position) as f64 / self.total_parts as f64
    }

    pub fn primary(&self) -> f64 {
        self.weight_of(0)
    }

    /// Weight of each secondary mood; zero when there are none.
    pub fn secondary(&self) -> f64 {
        self.weight_of(1)
    }

    pub fn to_vec(&self) -> Vec<f64> {
        (0..self.count).map(|i| self.weight_of(i)).collect()
    }
}

/// Request-scoped result of merging one or more moods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedProfile {
    pub primary: String,
    /// Input mood keys in the order they were merged.
    pub sources: Vec<String>,
    pub category: Category,
    #[serde(flatten)]
    pub recommendation: RecommendationProfile,
}

impl From<&MoodProfile> for MergedProfile {
    fn from(profile: &MoodProfile) -> Self {
        Self {
            primary: profile.key.clone(),
            sources: vec![profile.key.clone()],
            category: profile.category,
            recommendation: profile.recommendation.clone(),
        }
    }
}

impl MergedProfile {
    pub fn is_composite(&self) -> bool {
        self.sources.len() > 1
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MoodMerger {
    list_cap: usize,
}

impl Default for MoodMerger {
    fn default() -> Self {
        Self::new(DEFAULT_LIST_CAP)
    }
}

impl MoodMerger {
    pub fn new(list_cap: usize) -> Self {
        Self {
            list_cap: list_cap.max(1),
        }
    }

    pub fn list_cap(&self) -> usize {
        self.list_cap
    }

    /// Merge `profiles`, the first being primary. Duplicates are merged as given.
    ///
    /// An empty slice is a caller bug and yields `Precondition`.
    pub fn merge(&self, profiles: &[&MoodProfile]) -> Result<MergedProfile> {
        let (primary, secondaries) = profiles.split_first().ok_or_else(|| {
            MoodError::Precondition("merge requires at least one resolved mood".into())
        })?;

        if secondaries.is_empty() {
            return Ok(MergedProfile::from(*primary));
        }

        let union = |field: fn(&RecommendationProfile) -> &Vec<String>| {
            union_capped(
                profiles.iter().map(|p| field(&p.recommendation)),
                self.list_cap,
            )
        };

        let avoid_themes: BTreeSet<String> = profiles
            .iter()
            .flat_map(|p| p.recommendation.avoid_themes.iter().cloned())
            .collect();

        let lead = &primary.recommendation;
        let recommendation = RecommendationProfile {
            music_genres: union(|r| &r.music_genres),
            music_vibe: union(|r| &r.music_vibe),
            music_keywords: union(|r| &r.music_keywords),
            music_energy: weighted_energy(
                &MergeWeights::for_count(profiles.len()),
                profiles.iter().map(|p| p.energy()),
            ),
            movie_genres: union(|r| &r.movie_genres),
            movie_themes: union(|r| &r.movie_themes),
            movie_keywords: union(|r| &r.movie_keywords),
            movie_tone: lead.movie_tone,
            book_genres: union(|r| &r.book_genres),
            book_themes: union(|r| &r.book_themes),
            book_keywords: union(|r| &r.book_keywords),
            book_pacing: lead.book_pacing,
            book_depth: lead.book_depth,
            avoid_themes,
            strategy: lead.strategy,
        };

        tracing::debug!(
            "Merged {} moods with primary '{}' (energy {})",
            profiles.len(),
            primary.key,
            recommendation.music_energy
        );

        Ok(MergedProfile {
            primary: primary.key.clone(),
            sources: profiles.iter().map(|p| p.key.clone()).collect(),
            category: primary.category,
            recommendation,
        })
    }
}

/// Concatenate in priority order, drop case-insensitive repeats, keep the first `cap`.
fn union_capped<'a>(lists: impl Iterator<Item = &'a Vec<String>>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();
    for item in lists.flatten() {
        if merged.len() == cap {
            break;
        }
        if seen.insert(item.to_lowercase()) {
            merged.push(item.clone());
        }
    }
    merged
}

/// Weighted mean of energy ranks, rounded half up.
///
/// Works on the integer parts of `weights`, so an exact half stays exact.
fn weighted_energy(weights: &MergeWeights, energies: impl Iterator<Item = Energy>) -> Energy {
    let num: u64 = energies
        .enumerate()
        .map(|(i, e)| weights.parts_of(i) * e.rank() as u64)
        .sum();
    let den = weights.total_parts();
    let rounded = (2 * num + den) / (2 * den);
    Energy::from_rank(rounded.clamp(1, 5) as u8)
}
