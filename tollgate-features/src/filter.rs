//! Filter plugin interface and the name-based lookup seam.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A named, pluggable predicate that decides feature enablement from a
/// parameter map.
///
/// Filters are expected to be fast, side-effect-free, CPU-only decisions;
/// evaluation runs on the calling thread and may be short-circuited, so a
/// filter must not rely on being invoked.
pub trait FeatureFilter: Send + Sync {
    fn evaluate(&self, parameters: &HashMap<String, Value>) -> bool;
}

/// Resolves filter implementations by the name stored in a declaration.
///
/// A miss is an ordinary `None`; whether that disables the invocation or
/// surfaces an error is the manager's policy, not the registry's.
pub trait FilterRegistry: Send + Sync {
    fn get(&self, name: &str) -> Option<Arc<dyn FeatureFilter>>;
}

/// Default registry: a plain name-to-filter map populated at startup.
#[derive(Default)]
pub struct InMemoryFilterRegistry {
    filters: HashMap<String, Arc<dyn FeatureFilter>>,
}

impl InMemoryFilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry pre-populated with the built-in filters under their
    /// well-known names.
    pub fn with_builtins() -> Self {
        use crate::builtin::{PercentageFilter, TimeWindowFilter};

        let mut registry = Self::new();
        registry.register(PercentageFilter::NAME, Arc::new(PercentageFilter));
        registry.register(TimeWindowFilter::NAME, Arc::new(TimeWindowFilter));
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, filter: Arc<dyn FeatureFilter>) {
        self.filters.insert(name.into(), filter);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.filters.contains_key(name)
    }
}

impl FilterRegistry for InMemoryFilterRegistry {
    fn get(&self, name: &str) -> Option<Arc<dyn FeatureFilter>> {
        self.filters.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysOn;

    impl FeatureFilter for AlwaysOn {
        fn evaluate(&self, _parameters: &HashMap<String, Value>) -> bool {
            true
        }
    }

    #[test]
    fn registered_filters_resolve_by_name() {
        let mut registry = InMemoryFilterRegistry::new();
        registry.register("AlwaysOn", Arc::new(AlwaysOn));

        assert!(registry.contains("AlwaysOn"));
        let filter = registry.get("AlwaysOn").unwrap();
        assert!(filter.evaluate(&HashMap::new()));
    }

    #[test]
    fn unknown_name_is_a_plain_miss() {
        let registry = InMemoryFilterRegistry::new();
        assert!(registry.get("Nope").is_none());
    }

    #[test]
    fn builtins_are_registered_under_well_known_names() {
        let registry = InMemoryFilterRegistry::with_builtins();
        assert!(registry.contains("PercentageFilter"));
        assert!(registry.contains("TimeWindowFilter"));
    }
}
