//! Structured mood analysis of a user message.

use moodmatch_core::Strategy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the user needs right now, which shapes the wording of recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImmediateNeed {
    Escape,
    Process,
    Uplift,
    Calm,
    Match,
    Channel,
}

impl ImmediateNeed {
    pub fn as_str(self) -> &'static str {
        match self {
            ImmediateNeed::Escape => "escape",
            ImmediateNeed::Process => "process",
            ImmediateNeed::Uplift => "uplift",
            ImmediateNeed::Calm => "calm",
            ImmediateNeed::Match => "match",
            ImmediateNeed::Channel => "channel",
        }
    }
}

impl From<Strategy> for ImmediateNeed {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Match => ImmediateNeed::Match,
            Strategy::Uplift => ImmediateNeed::Uplift,
            Strategy::Process => ImmediateNeed::Process,
            Strategy::Escape => ImmediateNeed::Escape,
            Strategy::Channel => ImmediateNeed::Channel,
        }
    }
}

impl fmt::Display for ImmediateNeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodAnalysis {
    pub primary_mood: String,
    /// 1 (barely there) to 10 (overwhelming).
    pub intensity: u8,
    pub secondary_moods: Vec<String>,
    pub immediate_need: ImmediateNeed,
    pub context: Option<String>,
    /// 0.0 to 1.0.
    pub confidence: f64,
}

impl MoodAnalysis {
    pub fn new(primary_mood: &str, intensity: u8, immediate_need: ImmediateNeed) -> Self {
        Self {
            primary_mood: primary_mood.trim().to_lowercase(),
            intensity: intensity.clamp(1, 10),
            secondary_moods: Vec::new(),
            immediate_need,
            context: None,
            confidence: 1.0,
        }
    }

    pub fn with_secondary<I, S>(mut self, moods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.secondary_moods = moods
            .into_iter()
            .map(|m| m.as_ref().trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        self
    }

    pub fn multi_mood(&self) -> bool {
        !self.secondary_moods.is_empty()
    }

    /// Single-line, human-readable digest.
    pub fn summary(&self) -> String {
        let mut parts = vec![format!(
            "Primary mood: {} (intensity: {}/10)",
            title_case(&self.primary_mood),
            self.intensity
        )];
        if self.multi_mood() {
            let also: Vec<String> = self.secondary_moods.iter().map(|m| title_case(m)).collect();
            parts.push(format!("Also feeling: {}", also.join(", ")));
        }
        if let Some(context) = &self.context {
            parts.push(format!("Context: {}", context));
        }
        parts.push(format!(
            "Recommendation strategy: {}",
            title_case(self.immediate_need.as_str())
        ));
        if self.confidence < 0.8 {
            parts.push(format!("(Confidence: {:.0}%)", self.confidence * 100.0));
        }
        parts.join(" | ")
    }
}

/// `"burnt_out"` -> `"Burnt Out"`.
pub(crate) fn title_case(word: &str) -> String {
    word.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
