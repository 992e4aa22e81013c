//! Mood resolution, classification and multi-mood merging.
//!
//! A fixed catalog of moods maps each one to a [`RecommendationProfile`]
//! used to parameterize music, movie and book search. [`MoodEngine`] turns
//! free-text mood tokens into catalog moods and merges several of them into
//! one [`MergedProfile`].

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod merge;
pub mod profile;
pub mod resolver;
pub mod similarity;

pub use catalog::MoodCatalog;
pub use config::MoodmatchConfig;
pub use engine::MoodEngine;
pub use error::{MoodError, Result};
pub use merge::{MergeWeights, MergedProfile, MoodMerger};
pub use profile::{
    BookDepth, BookPacing, Category, Energy, MoodProfile, MovieTone, ProfileIssue,
    RecommendationProfile, Strategy,
};
pub use resolver::{normalize_mood, MoodResolver, Resolution};
pub use similarity::{JaroWinkler, NormalizedLevenshtein, SimilarityAlgorithm, StringSimilarity};
