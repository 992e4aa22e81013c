//! Related-mood and uplift-target lookups over the curated edge tables.

use crate::catalog::MoodCatalog;
use crate::error::{MoodError, Result};
use std::sync::Arc;

pub struct MoodIndex {
    catalog: Arc<MoodCatalog>,
}

impl MoodIndex {
    pub fn new(catalog: Arc<MoodCatalog>) -> Self {
        Self { catalog }
    }

    fn ensure_known(&self, key: &str) -> Result<()> {
        if self.catalog.contains(key) {
            Ok(())
        } else {
            Err(MoodError::NotFound(key.to_string()))
        }
    }

    /// Curated related moods, in authoring order. Empty when none are recorded.
    pub fn similar_to(&self, key: &str) -> Result<&[String]> {
        self.ensure_known(key)?;
        Ok(self
            .catalog
            .similar
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or(&[]))
    }

    /// `Ok(None)` means the mood exists but has no recorded opposite.
    pub fn opposite_of(&self, key: &str) -> Result<Option<&str>> {
        self.ensure_known(key)?;
        Ok(self.catalog.opposites.get(key).map(String::as_str))
    }
}
