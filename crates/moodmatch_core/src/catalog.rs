//! The mood catalog: profiles plus the curated similarity and opposite tables.
//!
//! Built once at startup and never mutated. Construction rejects malformed
//! tables with [`MoodError::Configuration`], so a catalog that exists is valid.

use crate::error::{MoodError, Result};
use crate::profile::{Category, MoodProfile, ProfileIssue, RecommendationProfile};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Catalog shipped with the crate.
pub const EMBEDDED_CATALOG: &str = include_str!("../data/moods.toml");

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTables {
    #[serde(default)]
    opposites: BTreeMap<String, String>,
    #[serde(default)]
    similar: BTreeMap<String, Vec<String>>,
    /// category name -> mood key -> profile table
    moods: BTreeMap<String, BTreeMap<String, toml::Table>>,
}

#[derive(Debug, Clone)]
pub struct MoodCatalog {
    moods: HashMap<String, MoodProfile>,
    /// Sorted; drives deterministic fuzzy tie-breaking.
    keys: Vec<String>,
    pub(crate) similar: HashMap<String, Vec<String>>,
    pub(crate) opposites: HashMap<String, String>,
}

impl MoodCatalog {
    /// Build a catalog from profiles alone, with no similarity or opposite edges.
    pub fn new(profiles: Vec<MoodProfile>) -> Result<Self> {
        let mut moods: HashMap<String, MoodProfile> = HashMap::with_capacity(profiles.len());
        for profile in profiles {
            let issues = profile.issues();
            if !issues.is_empty() {
                let detail: Vec<String> = issues.iter().map(|i| i.to_string()).collect();
                return Err(MoodError::Configuration(format!(
                    "mood '{}' is malformed: {}",
                    profile.key,
                    detail.join(", ")
                )));
            }
            if let Some(existing) = moods.get(&profile.key) {
                return Err(MoodError::Configuration(format!(
                    "mood '{}' is registered under both {} and {}",
                    profile.key, existing.category, profile.category
                )));
            }
            moods.insert(profile.key.clone(), profile);
        }

        if moods.is_empty() {
            return Err(MoodError::Configuration("catalog has no moods".into()));
        }

        let mut keys: Vec<String> = moods.keys().cloned().collect();
        keys.sort();

        Ok(Self {
            moods,
            keys,
            similar: HashMap::new(),
            opposites: HashMap::new(),
        })
    }

    /// Attach the advisory similarity table.
    ///
    /// Rows must be keyed by catalog moods. Entries naming unknown moods, the
    /// mood itself, or repeats are dropped.
    pub fn with_similar(mut self, similar: BTreeMap<String, Vec<String>>) -> Result<Self> {
        for (mood, related) in similar {
            if !self.moods.contains_key(&mood) {
                return Err(MoodError::Configuration(format!(
                    "similarity row for unknown mood '{}'",
                    mood
                )));
            }
            let mut kept: Vec<String> = Vec::with_capacity(related.len());
            for candidate in related {
                if candidate == mood || !self.moods.contains_key(&candidate) {
                    tracing::debug!("Dropping similarity entry {} -> {}", mood, candidate);
                    continue;
                }
                if !kept.contains(&candidate) {
                    kept.push(candidate);
                }
            }
            self.similar.insert(mood, kept);
        }
        Ok(self)
    }

    /// Attach the opposite table.
    ///
    /// Rows must be keyed by catalog moods. Targets outside the catalog are
    /// dropped; a mood cannot be its own opposite.
    pub fn with_opposites(mut self, opposites: BTreeMap<String, String>) -> Result<Self> {
        for (mood, opposite) in opposites {
            if !self.moods.contains_key(&mood) {
                return Err(MoodError::Configuration(format!(
                    "opposite defined for unknown mood '{}'",
                    mood
                )));
            }
            if mood == opposite {
                return Err(MoodError::Configuration(format!(
                    "mood '{}' is its own opposite",
                    mood
                )));
            }
            if !self.moods.contains_key(&opposite) {
                tracing::debug!("Dropping opposite {} -> {}: not in catalog", mood, opposite);
                continue;
            }
            self.opposites.insert(mood, opposite);
        }
        Ok(self)
    }

    /// Parse a catalog from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: RawTables = toml::from_str(text)
            .map_err(|e| MoodError::Configuration(format!("failed to parse catalog: {}", e)))?;

        let mut profiles = Vec::new();
        for (category_name, moods) in raw.moods {
            let category = Category::parse(&category_name).ok_or_else(|| {
                MoodError::Configuration(format!("unknown category '{}'", category_name))
            })?;
            for (key, mut table) in moods {
                // A restated category must agree with the bucket.
                if let Some(declared) = table.remove("category") {
                    if declared.as_str().and_then(Category::parse) != Some(category) {
                        let issue = ProfileIssue::CategoryMismatch {
                            bucket: category,
                            declared: declared
                                .as_str()
                                .map(str::to_string)
                                .unwrap_or_else(|| declared.to_string()),
                        };
                        return Err(MoodError::Configuration(format!(
                            "mood '{}' is malformed: {}",
                            key, issue
                        )));
                    }
                }
                let recommendation: RecommendationProfile = toml::Value::Table(table)
                    .try_into()
                    .map_err(|e| MoodError::Configuration(format!("mood '{}': {}", key, e)))?;
                profiles.push(MoodProfile {
                    key,
                    category,
                    recommendation,
                });
            }
        }

        let catalog = Self::new(profiles)?
            .with_similar(raw.similar)?
            .with_opposites(raw.opposites)?;

        tracing::info!(
            "Loaded mood catalog: {} moods, {} similarity rows, {} opposites",
            catalog.len(),
            catalog.similar.len(),
            catalog.opposites.len()
        );
        Ok(catalog)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            MoodError::Configuration(format!("failed to read catalog {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// The 52-mood catalog compiled into the crate.
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_CATALOG)
    }

    pub fn get(&self, key: &str) -> Option<&MoodProfile> {
        self.moods.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.moods.contains_key(key)
    }

    /// All mood keys, sorted.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.moods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moods.is_empty()
    }

    pub fn profiles(&self) -> impl Iterator<Item = &MoodProfile> {
        self.keys.iter().filter_map(|k| self.moods.get(k))
    }

    /// Keys registered under `category`, sorted.
    pub fn moods_in(&self, category: Category) -> Vec<&str> {
        self.profiles()
            .filter(|p| p.category == category)
            .map(|p| p.key.as_str())
            .collect()
    }

    /// Confirms `key` names a well-formed entry.
    pub fn validate(&self, key: &str) -> bool {
        self.moods
            .get(key)
            .map(|profile| profile.is_well_formed())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::tests::sample_recommendation;
    use crate::profile::{Energy, Strategy};

    fn profile(key: &str, category: Category) -> MoodProfile {
        MoodProfile {
            key: key.into(),
            category,
            recommendation: sample_recommendation(),
        }
    }

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = MoodCatalog::embedded().unwrap();
        assert_eq!(catalog.len(), 52);
        assert!(catalog.keys().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_embedded_catalog_entries_are_valid() {
        let catalog = MoodCatalog::embedded().unwrap();
        for key in catalog.keys() {
            assert!(catalog.validate(key), "{} should be valid", key);
        }
        assert!(!catalog.validate("banana"));
    }

    #[test]
    fn test_embedded_category_counts() {
        let catalog = MoodCatalog::embedded().unwrap();
        let count = |c: Category| catalog.profiles().filter(|p| p.category == c).count();
        assert_eq!(count(Category::Positive), 10);
        assert_eq!(count(Category::Negative), 12);
        assert_eq!(count(Category::Energy), 8);
        assert_eq!(count(Category::Social), 8);
        assert_eq!(count(Category::Existential), 8);
        assert_eq!(count(Category::Transitional), 6);
    }

    #[test]
    fn test_embedded_known_entries() {
        let catalog = MoodCatalog::embedded().unwrap();
        let sad = catalog.get("sad").unwrap();
        assert_eq!(sad.category, Category::Negative);
        assert_eq!(sad.strategy(), Strategy::Process);
        assert_eq!(sad.energy(), Energy::Low);
        assert_eq!(sad.recommendation.music_genres[0], "sad");
        assert!(catalog.get("burnt_out").is_some());
    }

    #[test]
    fn test_similarity_drops_unknown_and_self_entries() {
        let catalog = MoodCatalog::embedded().unwrap();
        for (mood, related) in &catalog.similar {
            assert!(!related.contains(mood));
            assert!(related.iter().all(|r| catalog.contains(r)));
        }
        // "calm" is not a catalog mood
        assert!(!catalog.similar["peaceful"].contains(&"calm".to_string()));
        assert!(catalog.similar["peaceful"].contains(&"mellow".to_string()));
    }

    #[test]
    fn test_duplicate_key_across_categories_is_rejected() {
        let err = MoodCatalog::new(vec![
            profile("calm", Category::Positive),
            profile("calm", Category::Energy),
        ])
        .unwrap_err();
        assert!(matches!(err, MoodError::Configuration(_)));
    }

    #[test]
    fn test_empty_list_field_is_rejected() {
        let mut p = profile("calm", Category::Positive);
        p.recommendation.book_keywords.clear();
        let err = MoodCatalog::new(vec![p]).unwrap_err();
        assert!(err.to_string().contains("book_keywords"));
    }

    #[test]
    fn test_empty_catalog_is_rejected() {
        assert!(matches!(
            MoodCatalog::new(vec![]),
            Err(MoodError::Configuration(_))
        ));
    }

    #[test]
    fn test_opposite_to_unknown_mood_is_dropped() {
        let catalog = MoodCatalog::new(vec![profile("calm", Category::Positive)]).unwrap();
        let opposites = [("calm".to_string(), "frantic".to_string())].into_iter().collect();
        let catalog = catalog.with_opposites(opposites).unwrap();
        assert!(catalog.opposites.is_empty());
    }

    #[test]
    fn test_opposite_for_unknown_mood_is_rejected() {
        let catalog = MoodCatalog::new(vec![profile("calm", Category::Positive)]).unwrap();
        let opposites = [("frantic".to_string(), "calm".to_string())].into_iter().collect();
        assert!(matches!(
            catalog.with_opposites(opposites),
            Err(MoodError::Configuration(_))
        ));
    }

    #[test]
    fn test_embedded_opposites_keep_only_catalog_targets() {
        let catalog = MoodCatalog::embedded().unwrap();
        assert_eq!(catalog.opposites.len(), 7);
        assert_eq!(catalog.opposites["anxious"], "peaceful");
        assert_eq!(catalog.opposites["afraid"], "confident");
        // "calm" and "relaxed" are not catalog moods
        assert!(!catalog.opposites.contains_key("angry"));
        assert!(!catalog.opposites.contains_key("stressed"));
    }

    #[test]
    fn test_self_opposite_is_rejected() {
        let catalog = MoodCatalog::new(vec![profile("calm", Category::Positive)]).unwrap();
        let opposites = [("calm".to_string(), "calm".to_string())].into_iter().collect();
        assert!(catalog.with_opposites(opposites).is_err());
    }

    #[test]
    fn test_invalid_enum_in_toml_is_configuration_error() {
        let text = EMBEDDED_CATALOG.replacen(
            "music_energy = \"high\"",
            "music_energy = \"loud\"",
            1,
        );
        let err = MoodCatalog::from_toml_str(&text).unwrap_err();
        assert!(matches!(err, MoodError::Configuration(_)));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let text = EMBEDDED_CATALOG.replace("[moods.social.", "[moods.sociable.");
        let err = MoodCatalog::from_toml_str(&text).unwrap_err();
        assert!(err.to_string().contains("sociable"));
    }

    #[test]
    fn test_restated_category_must_match_bucket() {
        let agreeing = EMBEDDED_CATALOG.replacen(
            "[moods.negative.sad]\n",
            "[moods.negative.sad]\ncategory = \"negative\"\n",
            1,
        );
        assert_ne!(agreeing, EMBEDDED_CATALOG);
        let catalog = MoodCatalog::from_toml_str(&agreeing).unwrap();
        assert_eq!(catalog.get("sad").unwrap().category, Category::Negative);

        let clashing = EMBEDDED_CATALOG.replacen(
            "[moods.negative.sad]\n",
            "[moods.negative.sad]\ncategory = \"positive\"\n",
            1,
        );
        let err = MoodCatalog::from_toml_str(&clashing).unwrap_err();
        assert!(matches!(err, MoodError::Configuration(_)));
        assert!(err.to_string().contains("disagrees with its 'negative' bucket"));
    }

    #[test]
    fn test_legacy_complex_category_name_is_accepted() {
        let text = EMBEDDED_CATALOG.replace("[moods.transitional.", "[moods.complex.");
        let catalog = MoodCatalog::from_toml_str(&text).unwrap();
        assert_eq!(catalog.get("numb").unwrap().category, Category::Transitional);
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = MoodCatalog::from_path("/nonexistent/moods.toml").unwrap_err();
        assert!(matches!(err, MoodError::Configuration(_)));
    }
}
