//! Category lookup for resolved moods.

use crate::catalog::MoodCatalog;
use crate::error::{MoodError, Result};
use crate::profile::Category;
use std::sync::Arc;

pub struct CategoryClassifier {
    catalog: Arc<MoodCatalog>,
}

impl CategoryClassifier {
    pub fn new(catalog: Arc<MoodCatalog>) -> Self {
        Self { catalog }
    }

    /// Pure lookup of the stored category. Keys are matched exactly; unknown
    /// keys are `NotFound`, never guessed.
    pub fn category_of(&self, key: &str) -> Result<Category> {
        self.catalog
            .get(key)
            .map(|profile| profile.category)
            .ok_or_else(|| MoodError::NotFound(key.to_string()))
    }

    /// Moods registered under `category`, sorted.
    pub fn moods_in(&self, category: Category) -> Vec<&str> {
        self.catalog.moods_in(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> CategoryClassifier {
        CategoryClassifier::new(Arc::new(MoodCatalog::embedded().unwrap()))
    }

    #[test]
    fn test_category_of_known_moods() {
        let c = classifier();
        assert_eq!(c.category_of("anxious").unwrap(), Category::Negative);
        assert_eq!(c.category_of("happy").unwrap(), Category::Positive);
        assert_eq!(c.category_of("burnt_out").unwrap(), Category::Energy);
        assert_eq!(c.category_of("bored").unwrap(), Category::Transitional);
    }

    #[test]
    fn test_category_of_does_not_fuzzy_match() {
        let c = classifier();
        assert_eq!(
            c.category_of("anxiouss").unwrap_err(),
            MoodError::NotFound("anxiouss".into())
        );
    }

    #[test]
    fn test_moods_in_category() {
        let c = classifier();
        let transitional = c.moods_in(Category::Transitional);
        assert_eq!(
            transitional,
            vec!["bittersweet", "bored", "numb", "rebellious", "vengeful", "vulnerable"]
        );
        let total: usize = Category::ALL.iter().map(|cat| c.moods_in(*cat).len()).sum();
        assert_eq!(total, 52);
    }
}
