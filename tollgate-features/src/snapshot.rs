//! Per-unit-of-work memoization of evaluation results.

use crate::error::Result;
use crate::manager::FeatureManager;
use std::collections::HashMap;
use std::sync::Arc;

/// A caching view over a [`FeatureManager`] scoped to one unit of work
/// (typically one inbound request).
///
/// The first query for a key delegates to the manager; repeated queries for
/// the same key within this snapshot return the memoized answer without
/// re-running filters, so a feature reads consistently for the whole unit of
/// work even when its filters are probabilistic. Create one snapshot at the
/// start of the unit of work and drop it at the end; snapshots are never
/// shared across units of work.
pub struct FeatureSnapshot {
    manager: Arc<FeatureManager>,
    cache: HashMap<String, bool>,
}

impl FeatureSnapshot {
    pub fn new(manager: Arc<FeatureManager>) -> Self {
        Self {
            manager,
            cache: HashMap::new(),
        }
    }

    /// Is the feature enabled, as of the first time this snapshot was asked?
    ///
    /// Both answers are memoized, `false` included. Errors (fail-fast filter
    /// misses) are not cached and will surface again on retry.
    pub fn is_enabled(&mut self, feature: &str) -> Result<bool> {
        if let Some(&on) = self.cache.get(feature) {
            return Ok(on);
        }

        let on = self.manager.is_enabled(feature)?;
        self.cache.insert(feature.to_string(), on);
        Ok(on)
    }
}
