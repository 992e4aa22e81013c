//! Read-only facade over the catalog and the components built on it.

use crate::catalog::MoodCatalog;
use crate::classifier::CategoryClassifier;
use crate::config::MoodmatchConfig;
use crate::error::{MoodError, Result};
use crate::index::MoodIndex;
use crate::merge::{MergedProfile, MoodMerger};
use crate::profile::{Category, MoodProfile};
use crate::resolver::{MoodResolver, Resolution};
use crate::similarity::SimilarityAlgorithm;
use anyhow::Context;
use std::sync::Arc;

/// Built once at startup, then shared (e.g. behind an `Arc`) across requests.
pub struct MoodEngine {
    catalog: Arc<MoodCatalog>,
    resolver: MoodResolver,
    classifier: CategoryClassifier,
    index: MoodIndex,
    merger: MoodMerger,
}

impl MoodEngine {
    pub fn new(
        catalog: MoodCatalog,
        algorithm: SimilarityAlgorithm,
        threshold: f64,
        list_cap: usize,
    ) -> Self {
        let catalog = Arc::new(catalog);
        Self {
            resolver: MoodResolver::new(catalog.clone(), algorithm.build(), threshold),
            classifier: CategoryClassifier::new(catalog.clone()),
            index: MoodIndex::new(catalog.clone()),
            merger: MoodMerger::new(list_cap),
            catalog,
        }
    }

    /// Embedded catalog with default settings.
    pub fn with_defaults() -> Result<Self> {
        let algorithm = SimilarityAlgorithm::default();
        Ok(Self::new(
            MoodCatalog::embedded()?,
            algorithm,
            algorithm.default_threshold(),
            crate::merge::DEFAULT_LIST_CAP,
        ))
    }

    /// Load the configured catalog (or the embedded one) and wire the components.
    pub fn from_config(config: &MoodmatchConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let catalog = match &config.catalog.path {
            Some(path) => MoodCatalog::from_path(path)
                .with_context(|| format!("Failed to load mood catalog from {}", path.display()))?,
            None => MoodCatalog::embedded().context("Embedded mood catalog is invalid")?,
        };
        Ok(Self::new(
            catalog,
            config.resolver.algorithm,
            config.resolver.effective_threshold(),
            config.merge.list_cap,
        ))
    }

    pub fn catalog(&self) -> &MoodCatalog {
        &self.catalog
    }

    pub fn resolve(&self, token: &str) -> Result<&MoodProfile> {
        self.resolver.resolve(token)
    }

    pub fn resolve_detailed(&self, token: &str) -> Result<Resolution<'_>> {
        self.resolver.resolve_detailed(token)
    }

    pub fn category_of(&self, key: &str) -> Result<Category> {
        self.classifier.category_of(key)
    }

    pub fn moods_in(&self, category: Category) -> Vec<&str> {
        self.classifier.moods_in(category)
    }

    pub fn similar_to(&self, key: &str) -> Result<&[String]> {
        self.index.similar_to(key)
    }

    pub fn opposite_of(&self, key: &str) -> Result<Option<&str>> {
        self.index.opposite_of(key)
    }

    pub fn validate(&self, key: &str) -> bool {
        self.catalog.validate(key)
    }

    pub fn merge(&self, profiles: &[&MoodProfile]) -> Result<MergedProfile> {
        self.merger.merge(profiles)
    }

    /// Resolve every token and merge the hits; the first hit is primary.
    ///
    /// Unresolvable tokens are skipped. `NotFound` only if none resolve.
    pub fn resolve_and_merge<S: AsRef<str>>(&self, tokens: &[S]) -> Result<MergedProfile> {
        let mut profiles = Vec::with_capacity(tokens.len());
        for token in tokens {
            match self.resolver.resolve(token.as_ref()) {
                Ok(profile) => profiles.push(profile),
                Err(MoodError::NotFound(t)) => {
                    tracing::warn!("Skipping unrecognized mood '{}'", t);
                }
                Err(e) => return Err(e),
            }
        }

        if profiles.is_empty() {
            let joined: Vec<&str> = tokens.iter().map(|t| t.as_ref()).collect();
            return Err(MoodError::NotFound(joined.join(", ")));
        }
        self.merger.merge(&profiles)
    }
}
