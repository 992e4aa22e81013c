//! MoodMatch agent: analyzes a message, merges the detected moods and asks
//! music, movie and book sources for one recommendation each.

pub mod analysis;
pub mod analyzer;
pub mod explain;
pub mod history;
pub mod offline;
pub mod orchestrator;
pub mod sources;

pub use analysis::{ImmediateNeed, MoodAnalysis};
pub use analyzer::{KeywordAnalyzer, MoodAnalyzer};
pub use history::{ConversationHistory, Role, Turn};
pub use offline::{SearchLinkBooks, SearchLinkMovies, SearchLinkMusic};
pub use orchestrator::{MoodMatchAgent, UnifiedRecommendation};
pub use sources::{
    BookRecommendation, BookSource, MovieRecommendation, MovieSource, MusicRecommendation,
    MusicSource, SearchRequest,
};
