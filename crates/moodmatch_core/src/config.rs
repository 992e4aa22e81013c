use crate::merge::DEFAULT_LIST_CAP;
use crate::similarity::SimilarityAlgorithm;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MoodmatchConfig {
    pub resolver: ResolverConfig,
    pub merge: MergeConfig,
    pub catalog: CatalogConfig,
    pub agent: AgentConfig,
}

impl MoodmatchConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: MoodmatchConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Try to load from path; if file doesn't exist, return defaults with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("Config file not found or invalid ({:#}), using defaults", e);
                Self::from_env()
            }
        }
    }

    /// Defaults with env var overrides applied. Invalid overrides are discarded.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env_overrides();
        if let Err(e) = cfg.validate() {
            tracing::warn!("Ignoring invalid env overrides ({:#})", e);
            return Self::default();
        }
        cfg
    }

    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.resolver.effective_threshold();
        if !(0.0..=1.0).contains(&threshold) {
            bail!("resolver.threshold must be within [0, 1], got {}", threshold);
        }
        if self.merge.list_cap == 0 {
            bail!("merge.list_cap must be at least 1");
        }
        if self.agent.default_mood.trim().is_empty() {
            bail!("agent.default_mood must not be empty");
        }
        Ok(())
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("MOODMATCH_CATALOG") {
            self.catalog.path = Some(PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("MOODMATCH_ALGORITHM") {
            match SimilarityAlgorithm::parse(&v) {
                Some(algorithm) => self.resolver.algorithm = algorithm,
                None => tracing::warn!(
                    "Unknown MOODMATCH_ALGORITHM '{}', keeping {:?}",
                    v,
                    self.resolver.algorithm
                ),
            }
        }
        if let Ok(v) = std::env::var("MOODMATCH_THRESHOLD") {
            if let Ok(n) = v.parse() {
                self.resolver.threshold = Some(n);
            }
        }
        if let Ok(v) = std::env::var("MOODMATCH_LIST_CAP") {
            if let Ok(n) = v.parse() {
                self.merge.list_cap = n;
            }
        }
        if let Ok(v) = std::env::var("MOODMATCH_DEFAULT_MOOD") {
            self.agent.default_mood = v;
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub algorithm: SimilarityAlgorithm,
    /// Exclusive lower bound for fuzzy matches. Unset means the algorithm's default.
    pub threshold: Option<f64>,
}

impl ResolverConfig {
    pub fn effective_threshold(&self) -> f64 {
        self.threshold
            .unwrap_or_else(|| self.algorithm.default_threshold())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub list_cap: usize,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            list_cap: DEFAULT_LIST_CAP,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Replaces the embedded catalog when set.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Used when no mood can be detected or resolved.
    pub default_mood: String,
    /// Turns kept per conversation context.
    pub history_limit: usize,
    /// Conversation contexts kept before the least recently used is dropped.
    pub history_contexts: usize,
    /// Blend in the opposite mood when the need is to uplift.
    pub uplift_with_opposite: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            default_mood: "content".to_string(),
            history_limit: 20,
            history_contexts: 256,
            uplift_with_opposite: true,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
