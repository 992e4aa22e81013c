use thiserror::Error;

/// Errors raised by the mood engine.
///
/// Only `NotFound` is part of normal operation. The other two variants mark
/// defects: a caller breaking a contract, or a mood table that should never
/// have been loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoodError {
    /// A token or key could not be matched to any catalog mood.
    #[error("mood not found: {0}")]
    NotFound(String),

    /// A caller broke a documented precondition (e.g. merging zero moods).
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// The catalog, similarity or opposite tables are malformed.
    #[error("invalid mood configuration: {0}")]
    Configuration(String),
}

impl MoodError {
    /// Whether a caller may fall back instead of failing the request.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, MoodError>;
