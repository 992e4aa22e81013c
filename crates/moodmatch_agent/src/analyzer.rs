//! Mood analyzers: turn free text into a [`MoodAnalysis`].

use crate::analysis::{ImmediateNeed, MoodAnalysis};
use anyhow::{bail, Result};
use async_trait::async_trait;
use moodmatch_core::{MoodCatalog, Strategy};
use std::collections::HashMap;

/// Text classification collaborator. Implementations may call out to a model;
/// the orchestrator only relies on this contract.
#[async_trait]
pub trait MoodAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<MoodAnalysis>;

    fn name(&self) -> &'static str;
}

/// Everyday words mapped to catalog moods.
const SYNONYMS: &[(&str, &str)] = &[
    ("sadness", "sad"),
    ("unhappy", "sad"),
    ("down", "sad"),
    ("blue", "sad"),
    ("depressed", "sad"),
    ("miserable", "sad"),
    ("crying", "sad"),
    ("joyful", "happy"),
    ("glad", "happy"),
    ("cheerful", "happy"),
    ("good", "happy"),
    ("great", "happy"),
    ("thrilled", "excited"),
    ("pumped", "excited"),
    ("thankful", "grateful"),
    ("calm", "peaceful"),
    ("serene", "peaceful"),
    ("relaxed", "mellow"),
    ("chill", "mellow"),
    ("motivated", "inspired"),
    ("anxiety", "anxious"),
    ("nervous", "anxious"),
    ("worried", "anxious"),
    ("panicking", "anxious"),
    ("stress", "stressed"),
    ("stressful", "stressed"),
    ("mad", "angry"),
    ("furious", "angry"),
    ("annoyed", "angry"),
    ("frustrated", "angry"),
    ("alone", "lonely"),
    ("isolated", "lonely"),
    ("heartbreak", "heartbroken"),
    ("breakup", "heartbroken"),
    ("scared", "afraid"),
    ("terrified", "afraid"),
    ("frightened", "afraid"),
    ("ashamed", "embarrassed"),
    ("exhausted", "tired"),
    ("drained", "tired"),
    ("sleepy", "drowsy"),
    ("burnout", "burnt_out"),
    ("burned_out", "burnt_out"),
    ("lazy", "sluggish"),
    ("wired", "hyper"),
    ("lost", "confused"),
    ("meh", "bored"),
    ("boring", "bored"),
    ("overwhelming", "overwhelmed"),
    ("reflective", "contemplative"),
    ("pensive", "contemplative"),
    ("hollow", "empty"),
    ("love", "loving"),
];

const INTENSIFIERS: &[&str] = &[
    "very",
    "really",
    "so",
    "extremely",
    "incredibly",
    "super",
    "totally",
    "completely",
    "deeply",
    "utterly",
    "quite",
];

const SOFTENERS: &[&str] = &["slightly", "somewhat", "kinda", "bit", "little", "mildly"];

const CRISIS_PHRASES: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "end my life",
    "self harm",
    "hurt myself",
    "want to die",
];

/// Words that introduce the situation behind a mood.
const CONTEXT_MARKERS: &[&str] = &["because", "after", "since", "about"];

const BASE_INTENSITY: i32 = 5;
const MAX_SECONDARY: usize = 2;
const MATCHED_CONFIDENCE: f64 = 0.85;
const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Deterministic lexicon analyzer over catalog keys and common synonyms.
pub struct KeywordAnalyzer {
    /// word (or `first_second` pair) -> catalog key
    lexicon: HashMap<String, String>,
    strategies: HashMap<String, Strategy>,
    default_mood: String,
}

impl KeywordAnalyzer {
    pub fn new(catalog: &MoodCatalog, default_mood: &str) -> Self {
        let mut lexicon: HashMap<String, String> = catalog
            .keys()
            .iter()
            .map(|k| (k.clone(), k.clone()))
            .collect();
        for (word, mood) in SYNONYMS {
            if catalog.contains(mood) {
                lexicon.entry(word.to_string()).or_insert_with(|| mood.to_string());
            } else {
                tracing::debug!("Skipping synonym {} -> {}: not in catalog", word, mood);
            }
        }

        let strategies = catalog
            .profiles()
            .map(|p| (p.key.clone(), p.strategy()))
            .collect();

        Self {
            lexicon,
            strategies,
            default_mood: default_mood.trim().to_lowercase(),
        }
    }

    fn words(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !(c.is_alphanumeric() || c == '\''))
            .map(|w| w.trim_matches('\'').to_string())
            .filter(|w| !w.is_empty())
            .collect()
    }

    /// Catalog moods in order of first mention.
    fn detect_moods(&self, words: &[String]) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let pair = words.get(i + 1).map(|next| format!("{}_{}", words[i], next));
            let (hit, width) = match pair.as_deref().and_then(|p| self.lexicon.get(p)) {
                Some(mood) => (Some(mood), 2),
                None => (self.lexicon.get(&words[i]), 1),
            };
            if let Some(mood) = hit {
                if !found.contains(mood) {
                    found.push(mood.clone());
                }
            }
            i += width;
        }
        found
    }

    fn intensity(words: &[String], text: &str) -> u8 {
        let mut level = BASE_INTENSITY;
        for word in words {
            if INTENSIFIERS.contains(&word.as_str()) {
                level += 1;
            } else if SOFTENERS.contains(&word.as_str()) {
                level -= 1;
            }
        }
        if text.contains('!') {
            level += 1;
        }
        level.clamp(1, 10) as u8
    }

    fn mentions_crisis(words: &[String]) -> bool {
        let padded = format!(" {} ", words.join(" "));
        CRISIS_PHRASES
            .iter()
            .any(|phrase| padded.contains(&format!(" {} ", phrase)))
    }

    fn context(words: &[String]) -> Option<String> {
        let at = words
            .iter()
            .position(|w| CONTEXT_MARKERS.contains(&w.as_str()))?;
        let rest: Vec<&str> = words[at + 1..].iter().take(8).map(String::as_str).collect();
        if rest.is_empty() {
            None
        } else {
            Some(rest.join(" "))
        }
    }

    fn need_for(&self, mood: &str) -> ImmediateNeed {
        self.strategies
            .get(mood)
            .copied()
            .map(ImmediateNeed::from)
            .unwrap_or(ImmediateNeed::Match)
    }
}

#[async_trait]
impl MoodAnalyzer for KeywordAnalyzer {
    async fn analyze(&self, text: &str) -> Result<MoodAnalysis> {
        if text.trim().is_empty() {
            bail!("cannot analyze an empty message");
        }
        let words = Self::words(text);

        if Self::mentions_crisis(&words) {
            tracing::warn!("Crisis language detected in message");
            return Ok(MoodAnalysis::new("afraid", 10, ImmediateNeed::Calm)
                .with_context("crisis language detected")
                .with_confidence(0.0));
        }

        let moods = self.detect_moods(&words);
        let intensity = Self::intensity(&words, text);

        let analysis = match moods.split_first() {
            Some((primary, rest)) => {
                let mut analysis =
                    MoodAnalysis::new(primary, intensity, self.need_for(primary))
                        .with_secondary(rest.iter().take(MAX_SECONDARY))
                        .with_confidence(MATCHED_CONFIDENCE);
                analysis.context = Self::context(&words);
                analysis
            }
            None => {
                tracing::info!(
                    "No mood words found, assuming '{}'",
                    self.default_mood
                );
                let mut analysis = MoodAnalysis::new(
                    &self.default_mood,
                    intensity,
                    self.need_for(&self.default_mood),
                )
                .with_confidence(FALLBACK_CONFIDENCE);
                analysis.context = Self::context(&words);
                analysis
            }
        };

        tracing::info!(
            "Mood analysis complete: primary_mood={}, intensity={}, confidence={}",
            analysis.primary_mood,
            analysis.intensity,
            analysis.confidence
        );
        Ok(analysis)
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}
