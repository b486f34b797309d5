//! Loading feature declarations from JSON documents.

use crate::catalog::FeatureCatalog;
use crate::error::{FeatureError, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Section names under which a document may nest its feature map. When none
/// is present the whole document is taken as the feature map.
const SECTION_ALIASES: [&str; 4] = [
    "FeatureManagement",
    "feature-management",
    "feature_management",
    "features",
];

/// Loads feature declaration documents into a [`FeatureCatalog`].
pub struct FeatureSource;

impl FeatureSource {
    /// Load declarations from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<FeatureCatalog> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| FeatureError::LoadError(format!("failed to read file: {}", e)))?;
        Self::from_json_str(&content)
    }

    /// Load declarations from a JSON string.
    ///
    /// Individual malformed feature entries are logged and skipped by
    /// ingestion; only an unusable document (invalid JSON, non-object root or
    /// section) is an error here.
    pub fn from_json_str(content: &str) -> Result<FeatureCatalog> {
        let root: Value = serde_json::from_str(content)
            .map_err(|e| FeatureError::ParseError(format!("JSON parse error: {}", e)))?;

        let Value::Object(document) = root else {
            return Err(FeatureError::ParseError(
                "feature declarations must be a JSON object".to_string(),
            ));
        };

        let section = SECTION_ALIASES
            .iter()
            .find_map(|alias| document.get(*alias));

        let mut catalog = FeatureCatalog::new();
        match section {
            Some(Value::Object(features)) => catalog.ingest(features),
            Some(other) => {
                return Err(FeatureError::ParseError(format!(
                    "feature management section must be a JSON object, got {}",
                    other
                )));
            }
            None => catalog.ingest(&document),
        }

        Ok(catalog)
    }
}
