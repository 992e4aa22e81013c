//! Integration tests for MoodMatchAgent.
//!
//! Sources are swapped for mocks that fail or count calls, so the degradation
//! rules of `recommend()` can be checked without any network access.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use moodmatch_agent::{
    BookRecommendation, BookSource, ImmediateNeed, MoodAnalysis, MoodAnalyzer, MoodMatchAgent,
    MovieRecommendation, MovieSource, MusicRecommendation, MusicSource, Role, SearchRequest,
};
use moodmatch_core::config::AgentConfig;
use moodmatch_core::MoodEngine;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

// ============================================================================
// Mocks
// ============================================================================

struct FailingMusic;

#[async_trait]
impl MusicSource for FailingMusic {
    async fn recommend(&self, _request: &SearchRequest) -> Result<MusicRecommendation> {
        Err(anyhow!("spotify unavailable"))
    }
}

struct FailingMovies;

#[async_trait]
impl MovieSource for FailingMovies {
    async fn recommend(&self, _request: &SearchRequest) -> Result<MovieRecommendation> {
        Err(anyhow!("tmdb unavailable"))
    }
}

struct FailingBooks;

#[async_trait]
impl BookSource for FailingBooks {
    async fn recommend(&self, _request: &SearchRequest) -> Result<BookRecommendation> {
        Err(anyhow!("google books unavailable"))
    }
}

/// Records the merged profile sources it was asked about.
struct RecordingBooks {
    calls: AtomicUsize,
    seen: std::sync::Mutex<Vec<Vec<String>>>,
}

impl RecordingBooks {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl BookSource for RecordingBooks {
    async fn recommend(&self, request: &SearchRequest) -> Result<BookRecommendation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(request.profile.sources.clone());
        Ok(BookRecommendation {
            title: "The Midnight Library".into(),
            author: Some("Matt Haig".into()),
            mood_match: "fits".into(),
            why: "because".into(),
            themes: vec![],
            reading_time: "6h".into(),
            urls: Default::default(),
        })
    }
}

struct FixedAnalyzer(MoodAnalysis);

#[async_trait]
impl MoodAnalyzer for FixedAnalyzer {
    async fn analyze(&self, _text: &str) -> Result<MoodAnalysis> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

struct BrokenAnalyzer;

#[async_trait]
impl MoodAnalyzer for BrokenAnalyzer {
    async fn analyze(&self, _text: &str) -> Result<MoodAnalysis> {
        Err(anyhow!("model timed out"))
    }

    fn name(&self) -> &'static str {
        "broken"
    }
}

fn engine() -> Arc<MoodEngine> {
    Arc::new(MoodEngine::with_defaults().unwrap())
}

fn offline_agent() -> MoodMatchAgent {
    MoodMatchAgent::offline(engine(), AgentConfig::default())
}

// ============================================================================
// Degradation
// ============================================================================

#[tokio::test]
async fn test_one_failing_source_is_skipped() {
    let agent = offline_agent().with_music(Arc::new(FailingMusic));
    let rec = agent.recommend("ctx", "feeling anxious").await.unwrap();
    assert!(rec.music.is_none());
    assert!(rec.movie.is_some());
    assert!(rec.book.is_some());
    assert_eq!(rec.available(), 2);
    assert!(!rec.reply.contains("Music:"));
}

#[tokio::test]
async fn test_all_sources_failing_is_error() {
    let agent = offline_agent()
        .with_music(Arc::new(FailingMusic))
        .with_movies(Arc::new(FailingMovies))
        .with_books(Arc::new(FailingBooks));
    let err = agent.recommend("ctx", "feeling anxious").await.unwrap_err();
    assert!(err.to_string().contains("no recommendations"));
    // Failed requests leave no history
    assert!(agent.history().turns("ctx").await.is_empty());
}

#[tokio::test]
async fn test_analyzer_failure_propagates() {
    let agent = MoodMatchAgent::new(engine(), Arc::new(BrokenAnalyzer), AgentConfig::default());
    let err = agent.recommend("ctx", "hello").await.unwrap_err();
    assert!(format!("{:#}", err).contains("model timed out"));
}

#[tokio::test]
async fn test_empty_message_is_error() {
    assert!(offline_agent().recommend("ctx", "  ").await.is_err());
}

// ============================================================================
// Flow
// ============================================================================

#[tokio::test]
async fn test_uplift_need_merges_opposite() {
    let books = Arc::new(RecordingBooks::new());
    let analysis = MoodAnalysis::new("anxious", 7, ImmediateNeed::Uplift);
    let agent = MoodMatchAgent::new(
        engine(),
        Arc::new(FixedAnalyzer(analysis)),
        AgentConfig::default(),
    )
    .with_books(books.clone());

    let rec = agent.recommend("ctx", "whatever").await.unwrap();
    assert_eq!(rec.profile.sources, vec!["anxious", "peaceful"]);
    assert_eq!(books.calls.load(Ordering::SeqCst), 1);
    assert_eq!(books.seen.lock().unwrap()[0], vec!["anxious", "peaceful"]);
    assert!(rec.summary.contains("a book by Matt Haig"));
    assert!(rec.reply.starts_with("I can sense you're feeling quite anxious right now."));
}

#[tokio::test]
async fn test_unrecognized_mood_uses_default() {
    let analysis = MoodAnalysis::new("flibbertigibbet", 5, ImmediateNeed::Match);
    let agent = MoodMatchAgent::new(
        engine(),
        Arc::new(FixedAnalyzer(analysis)),
        AgentConfig::default(),
    );
    let rec = agent.recommend("ctx", "whatever").await.unwrap();
    assert_eq!(rec.profile.primary, "content");
}

#[tokio::test]
async fn test_history_records_both_turns_per_request() {
    let agent = offline_agent();
    agent.recommend("a", "I'm bored").await.unwrap();
    agent.recommend("a", "now I'm excited!").await.unwrap();
    agent.recommend("b", "tired").await.unwrap();

    let turns = agent.history().turns("a").await;
    assert_eq!(turns.len(), 4);
    assert_eq!(turns[0].role, Role::User);
    assert_eq!(turns[0].text, "I'm bored");
    assert_eq!(turns[1].role, Role::Agent);
    assert_eq!(agent.history().contexts().await, vec!["a", "b"]);
}

#[tokio::test]
async fn test_history_limit_from_config() {
    let config = AgentConfig {
        history_limit: 2,
        ..AgentConfig::default()
    };
    let agent = MoodMatchAgent::offline(engine(), config);
    agent.recommend("a", "sad").await.unwrap();
    agent.recommend("a", "happy").await.unwrap();
    let turns = agent.history().turns("a").await;
    assert_eq!(turns.len(), 2);
    assert_eq!(turns[0].text, "happy");
}

#[tokio::test]
async fn test_history_context_cap_from_config() {
    let config = AgentConfig {
        history_contexts: 2,
        ..AgentConfig::default()
    };
    let agent = MoodMatchAgent::offline(engine(), config);
    agent.recommend("a", "sad").await.unwrap();
    agent.recommend("b", "happy").await.unwrap();
    agent.recommend("c", "tired").await.unwrap();
    assert_eq!(agent.history().max_contexts(), 2);
    assert_eq!(agent.history().contexts().await, vec!["b", "c"]);
}

#[tokio::test]
async fn test_recommendation_serializes() {
    let rec = offline_agent().recommend("ctx", "lonely").await.unwrap();
    let json = serde_json::to_value(&rec).unwrap();
    assert_eq!(json["context_id"], "ctx");
    assert_eq!(json["analysis"]["primary_mood"], "lonely");
    assert_eq!(json["profile"]["primary"], "lonely");
    assert!(json["music"]["url"]
        .as_str()
        .unwrap()
        .starts_with("https://open.spotify.com/search/"));
}
