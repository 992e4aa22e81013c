//! Catalog-search collaborators for music, movies and books.
//!
//! Each source receives the analysis and the merged profile and returns one
//! recommendation. Query builders are shared so every implementation searches
//! with the same terms.

use crate::analysis::MoodAnalysis;
use anyhow::Result;
use async_trait::async_trait;
use moodmatch_core::MergedProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub analysis: MoodAnalysis,
    pub profile: MergedProfile,
}

impl SearchRequest {
    pub fn new(analysis: MoodAnalysis, profile: MergedProfile) -> Self {
        Self { analysis, profile }
    }

    /// Primary mood as a search term (`burnt_out` -> `burnt out`).
    pub fn mood_term(&self) -> String {
        self.profile.primary.replace('_', " ")
    }
}

// ============================================================================
// Recommendation records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicRecommendation {
    pub title: String,
    pub platform: String,
    pub url: String,
    pub mood_match: String,
    pub use_case: String,
    pub duration: Option<String>,
    #[serde(default)]
    pub artists: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecommendation {
    pub title: String,
    pub year: Option<u16>,
    pub rating: Option<f32>,
    pub mood_match: String,
    pub why: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecommendation {
    pub title: String,
    pub author: Option<String>,
    pub mood_match: String,
    pub why: String,
    #[serde(default)]
    pub themes: Vec<String>,
    pub reading_time: String,
    /// Store name (`google_books`, `amazon`, `goodreads`) -> URL.
    #[serde(default)]
    pub urls: BTreeMap<String, String>,
}

// ============================================================================
// Collaborator traits
// ============================================================================

#[async_trait]
pub trait MusicSource: Send + Sync {
    async fn recommend(&self, request: &SearchRequest) -> Result<MusicRecommendation>;
}

#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn recommend(&self, request: &SearchRequest) -> Result<MovieRecommendation>;
}

#[async_trait]
pub trait BookSource: Send + Sync {
    async fn recommend(&self, request: &SearchRequest) -> Result<BookRecommendation>;
}

// ============================================================================
// Query builders
// ============================================================================

fn push_unique(parts: &mut Vec<String>, term: &str) {
    let term = term.trim();
    if !term.is_empty() && !parts.iter().any(|p| p.eq_ignore_ascii_case(term)) {
        parts.push(term.to_string());
    }
}

/// Top 2 genres, top 2 of vibe ++ keywords, the mood, and energy for track search.
pub fn music_terms(request: &SearchRequest, for_tracks: bool) -> Vec<String> {
    let r = &request.profile.recommendation;
    let mut parts = Vec::new();
    for genre in r.music_genres.iter().take(2) {
        push_unique(&mut parts, genre);
    }
    for term in r.music_vibe.iter().chain(&r.music_keywords).take(2) {
        push_unique(&mut parts, term);
    }
    push_unique(&mut parts, &request.mood_term());
    if for_tracks {
        push_unique(&mut parts, r.music_energy.as_str());
    }
    parts.truncate(4);
    parts
}

/// Top 2 keywords, top 2 themes and the mood, at most 3 terms.
pub fn movie_terms(request: &SearchRequest) -> Vec<String> {
    let r = &request.profile.recommendation;
    let mut parts = Vec::new();
    for term in r.movie_keywords.iter().take(2).chain(r.movie_themes.iter().take(2)) {
        push_unique(&mut parts, term);
    }
    push_unique(&mut parts, &request.mood_term());
    parts.truncate(3);
    parts
}

/// Top 2 genres, top 2 themes and one keyword if there is room. Falls back to the mood.
pub fn book_terms(request: &SearchRequest) -> Vec<String> {
    let r = &request.profile.recommendation;
    let mut parts = Vec::new();
    for term in r.book_genres.iter().take(2).chain(r.book_themes.iter().take(2)) {
        push_unique(&mut parts, term);
    }
    if parts.len() < 4 {
        if let Some(keyword) = r.book_keywords.first() {
            push_unique(&mut parts, keyword);
        }
    }
    parts.truncate(4);
    if parts.is_empty() {
        parts.push(request.mood_term());
    }
    parts
}

pub fn music_query(request: &SearchRequest, for_tracks: bool) -> String {
    music_terms(request, for_tracks).join(" ")
}

pub fn movie_query(request: &SearchRequest) -> String {
    movie_terms(request).join(" ")
}

pub fn book_query(request: &SearchRequest) -> String {
    book_terms(request).join(" ")
}
