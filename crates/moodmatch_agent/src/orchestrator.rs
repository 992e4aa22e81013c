//! End-to-end recommendation flow: analyze, resolve, merge, fetch, explain.

use crate::analysis::{ImmediateNeed, MoodAnalysis};
use crate::analyzer::{KeywordAnalyzer, MoodAnalyzer};
use crate::explain;
use crate::history::{ConversationHistory, Role};
use crate::offline::{SearchLinkBooks, SearchLinkMovies, SearchLinkMusic};
use crate::sources::{
    BookRecommendation, BookSource, MovieRecommendation, MovieSource, MusicRecommendation,
    MusicSource, SearchRequest,
};
use anyhow::{bail, Context, Result};
use moodmatch_core::config::AgentConfig;
use moodmatch_core::{MergedProfile, MoodEngine, MoodError, MoodProfile};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct UnifiedRecommendation {
    pub task_id: Uuid,
    pub context_id: String,
    pub analysis: MoodAnalysis,
    pub profile: MergedProfile,
    pub music: Option<MusicRecommendation>,
    pub movie: Option<MovieRecommendation>,
    pub book: Option<BookRecommendation>,
    pub summary: String,
    pub reply: String,
}

impl UnifiedRecommendation {
    pub fn available(&self) -> usize {
        [
            self.music.is_some(),
            self.movie.is_some(),
            self.book.is_some(),
        ]
        .iter()
        .filter(|found| **found)
        .count()
    }
}

pub struct MoodMatchAgent {
    engine: Arc<MoodEngine>,
    analyzer: Arc<dyn MoodAnalyzer>,
    music: Arc<dyn MusicSource>,
    movies: Arc<dyn MovieSource>,
    books: Arc<dyn BookSource>,
    history: ConversationHistory,
    config: AgentConfig,
}

impl MoodMatchAgent {
    /// Keyword analyzer and search-link sources; needs no network access.
    pub fn offline(engine: Arc<MoodEngine>, config: AgentConfig) -> Self {
        let analyzer = Arc::new(KeywordAnalyzer::new(engine.catalog(), &config.default_mood));
        Self::new(engine, analyzer, config)
    }

    pub fn new(
        engine: Arc<MoodEngine>,
        analyzer: Arc<dyn MoodAnalyzer>,
        config: AgentConfig,
    ) -> Self {
        Self {
            engine,
            analyzer,
            music: Arc::new(SearchLinkMusic),
            movies: Arc::new(SearchLinkMovies),
            books: Arc::new(SearchLinkBooks),
            history: ConversationHistory::new(config.history_limit, config.history_contexts),
            config,
        }
    }

    pub fn with_music(mut self, source: Arc<dyn MusicSource>) -> Self {
        self.music = source;
        self
    }

    pub fn with_movies(mut self, source: Arc<dyn MovieSource>) -> Self {
        self.movies = source;
        self
    }

    pub fn with_books(mut self, source: Arc<dyn BookSource>) -> Self {
        self.books = source;
        self
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn engine(&self) -> &MoodEngine {
        &self.engine
    }

    fn resolve_primary(&self, mood: &str) -> Result<&MoodProfile> {
        match self.engine.resolve(mood) {
            Ok(profile) => Ok(profile),
            Err(MoodError::NotFound(_)) => {
                tracing::warn!(
                    "Mood '{}' not recognized, falling back to '{}'",
                    mood,
                    self.config.default_mood
                );
                self.engine
                    .resolve(&self.config.default_mood)
                    .with_context(|| {
                        format!("default mood '{}' is not in the catalog", self.config.default_mood)
                    })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Primary first, then resolved secondaries, then the uplift target if wanted.
    fn moods_for(&self, analysis: &MoodAnalysis) -> Result<Vec<&MoodProfile>> {
        let primary = self.resolve_primary(&analysis.primary_mood)?;
        let mut moods = vec![primary];

        for name in &analysis.secondary_moods {
            match self.engine.resolve(name) {
                Ok(profile) if moods.iter().any(|m| m.key == profile.key) => {}
                Ok(profile) => moods.push(profile),
                Err(e) => tracing::warn!("Skipping secondary mood '{}': {}", name, e),
            }
        }

        if analysis.immediate_need == ImmediateNeed::Uplift && self.config.uplift_with_opposite {
            if let Some(opposite) = self.engine.opposite_of(&primary.key)? {
                if !moods.iter().any(|m| m.key == opposite) {
                    if let Some(profile) = self.engine.catalog().get(opposite) {
                        tracing::debug!("Blending in '{}' to uplift '{}'", opposite, primary.key);
                        moods.push(profile);
                    }
                }
            }
        }
        Ok(moods)
    }

    pub async fn recommend(&self, context_id: &str, text: &str) -> Result<UnifiedRecommendation> {
        let task_id = Uuid::new_v4();
        tracing::info!("Processing task {} in context {}", task_id, context_id);

        let analysis = self
            .analyzer
            .analyze(text)
            .await
            .with_context(|| format!("{} analyzer failed", self.analyzer.name()))?;
        tracing::info!(
            "Mood analyzed: {} (intensity: {})",
            analysis.primary_mood,
            analysis.intensity
        );

        let moods = self.moods_for(&analysis)?;
        let profile = self.engine.merge(&moods)?;
        let request = SearchRequest::new(analysis, profile);

        let (music, movie, book) = tokio::join!(
            self.music.recommend(&request),
            self.movies.recommend(&request),
            self.books.recommend(&request),
        );
        let music = music
            .map_err(|e| tracing::error!("Music recommendation failed: {:#}", e))
            .ok();
        let movie = movie
            .map_err(|e| tracing::error!("Movie recommendation failed: {:#}", e))
            .ok();
        let book = book
            .map_err(|e| tracing::error!("Book recommendation failed: {:#}", e))
            .ok();

        tracing::info!(
            "Recommendations: music={}, movie={}, book={}",
            music.is_some(),
            movie.is_some(),
            book.is_some()
        );
        if music.is_none() && movie.is_none() && book.is_none() {
            bail!("no recommendations could be produced for '{}'", request.profile.primary);
        }

        let mood = request.mood_term();
        let summary = explain::summary(
            &request.analysis,
            &mood,
            music.as_ref(),
            movie.as_ref(),
            book.as_ref(),
        );
        let reply = explain::reply(
            &request.analysis,
            &mood,
            music.as_ref(),
            movie.as_ref(),
            book.as_ref(),
        );

        self.history.append(context_id, Role::User, text).await;
        self.history.append(context_id, Role::Agent, reply.clone()).await;

        let SearchRequest { analysis, profile } = request;
        Ok(UnifiedRecommendation {
            task_id,
            context_id: context_id.to_string(),
            analysis,
            profile,
            music,
            movie,
            book,
            summary,
            reply,
        })
    }
}
