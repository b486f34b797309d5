//! Feature evaluation against the catalog.

use crate::catalog::FeatureCatalog;
use crate::error::{FeatureError, Result};
use crate::filter::FilterRegistry;
use log::error;
use std::sync::Arc;

/// Evaluation policy knobs.
#[derive(Debug, Clone, Default)]
pub struct FeatureManagerConfig {
    /// When true, an unresolvable filter name surfaces as
    /// [`FeatureError::FilterNotFound`] instead of contributing `false`.
    pub fail_fast: bool,
}

/// Checks whether a feature is enabled.
///
/// A simple toggle answers directly. A filter-based feature is the OR of its
/// filter invocations, tried in declaration order and short-circuiting on the
/// first `true`; an empty filter list therefore evaluates to disabled. Unknown
/// features and an absent catalog evaluate to disabled.
///
/// Evaluation is stateless and safe to run concurrently against the
/// (immutable) catalog.
pub struct FeatureManager {
    catalog: Option<FeatureCatalog>,
    registry: Arc<dyn FilterRegistry>,
    config: FeatureManagerConfig,
}

impl FeatureManager {
    pub fn new(catalog: FeatureCatalog, registry: Arc<dyn FilterRegistry>) -> Self {
        Self::with_config(catalog, registry, FeatureManagerConfig::default())
    }

    pub fn with_config(
        catalog: FeatureCatalog,
        registry: Arc<dyn FilterRegistry>,
        config: FeatureManagerConfig,
    ) -> Self {
        Self {
            catalog: Some(catalog),
            registry,
            config,
        }
    }

    /// A manager with no catalog configured; every feature evaluates to
    /// disabled.
    pub fn unconfigured(registry: Arc<dyn FilterRegistry>) -> Self {
        Self {
            catalog: None,
            registry,
            config: FeatureManagerConfig::default(),
        }
    }

    pub fn catalog(&self) -> Option<&FeatureCatalog> {
        self.catalog.as_ref()
    }

    /// Is the feature enabled?
    ///
    /// Under the default fail-soft policy this never returns `Err`: a
    /// misconfigured feature evaluates to disabled and the cause is logged.
    /// With `fail_fast` set, an unresolvable filter name aborts evaluation of
    /// that one feature with [`FeatureError::FilterNotFound`].
    pub fn is_enabled(&self, feature: &str) -> Result<bool> {
        let Some(catalog) = &self.catalog else {
            return Ok(false);
        };

        // A plain toggle answers without touching the filter registry.
        if let Some(on) = catalog.toggle(feature) {
            return Ok(on);
        }

        let Some(definition) = catalog.definition(feature) else {
            return Ok(false);
        };

        if !definition.enabled {
            return Ok(false);
        }

        for invocation in &definition.filters {
            let Some(name) = invocation.name.as_deref().filter(|n| !n.is_empty()) else {
                continue;
            };

            match self.registry.get(name) {
                Some(filter) => {
                    if filter.evaluate(&invocation.parameters) {
                        return Ok(true);
                    }
                }
                None => {
                    if self.config.fail_fast {
                        return Err(FeatureError::FilterNotFound {
                            filter: name.to_string(),
                            feature: feature.to_string(),
                        });
                    }
                    error!(
                        "Feature filter '{}' (feature '{}') is not registered; unresolved filters evaluate to false",
                        name, feature
                    );
                }
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{FeatureDefinition, FilterInvocation};
    use crate::filter::{FeatureFilter, InMemoryFilterRegistry};
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed(bool);

    impl FeatureFilter for Fixed {
        fn evaluate(&self, _parameters: &HashMap<String, Value>) -> bool {
            self.0
        }
    }

    struct Panicking;

    impl FeatureFilter for Panicking {
        fn evaluate(&self, _parameters: &HashMap<String, Value>) -> bool {
            panic!("filter past the short-circuit must not run");
        }
    }

    /// Registry spy counting lookups.
    #[derive(Default)]
    struct CountingRegistry {
        inner: InMemoryFilterRegistry,
        lookups: AtomicUsize,
    }

    impl FilterRegistry for CountingRegistry {
        fn get(&self, name: &str) -> Option<Arc<dyn FeatureFilter>> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.get(name)
        }
    }

    fn manager_with(catalog: FeatureCatalog, registry: InMemoryFilterRegistry) -> FeatureManager {
        FeatureManager::new(catalog, Arc::new(registry))
    }

    #[test]
    fn unknown_feature_is_disabled() {
        let manager = manager_with(FeatureCatalog::new(), InMemoryFilterRegistry::new());
        assert!(!manager.is_enabled("NotConfigured").unwrap());
    }

    #[test]
    fn absent_catalog_disables_everything() {
        let manager = FeatureManager::unconfigured(Arc::new(InMemoryFilterRegistry::new()));
        assert!(!manager.is_enabled("Anything").unwrap());
        assert!(!manager.is_enabled("").unwrap());
    }

    #[test]
    fn simple_toggle_answers_directly() {
        let mut catalog = FeatureCatalog::new();
        catalog.set_toggle("On", true);
        catalog.set_toggle("Off", false);

        let manager = manager_with(catalog, InMemoryFilterRegistry::new());
        assert!(manager.is_enabled("On").unwrap());
        assert!(!manager.is_enabled("Off").unwrap());
    }

    #[test]
    fn toggle_hit_never_touches_the_registry() {
        let mut catalog = FeatureCatalog::new();
        catalog.set_toggle("Off", false);

        let registry = Arc::new(CountingRegistry::default());
        let manager = FeatureManager::new(catalog, registry.clone());

        assert!(!manager.is_enabled("Off").unwrap());
        assert_eq!(registry.lookups.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn or_semantics_short_circuit_on_first_true() {
        let mut registry = InMemoryFilterRegistry::new();
        registry.register("F1", Arc::new(Fixed(false)));
        registry.register("F2", Arc::new(Fixed(true)));
        registry.register("F3", Arc::new(Panicking));

        let mut catalog = FeatureCatalog::new();
        catalog.add_definition(
            FeatureDefinition::new("Chained")
                .with_filter(FilterInvocation::new("F1"))
                .with_filter(FilterInvocation::new("F2"))
                .with_filter(FilterInvocation::new("F3")),
        );

        let manager = manager_with(catalog, registry);
        assert!(manager.is_enabled("Chained").unwrap());
    }

    #[test]
    fn empty_filter_list_is_disabled() {
        let mut catalog = FeatureCatalog::new();
        catalog.add_definition(FeatureDefinition::new("NoFilters"));

        let manager = manager_with(catalog, InMemoryFilterRegistry::new());
        assert!(!manager.is_enabled("NoFilters").unwrap());
    }

    #[test]
    fn disabled_gate_skips_filters() {
        let mut registry = InMemoryFilterRegistry::new();
        registry.register("Boom", Arc::new(Panicking));

        let mut catalog = FeatureCatalog::new();
        catalog.add_definition(
            FeatureDefinition::new("Gated")
                .with_enabled(false)
                .with_filter(FilterInvocation::new("Boom")),
        );

        let manager = manager_with(catalog, registry);
        assert!(!manager.is_enabled("Gated").unwrap());
    }

    #[test]
    fn nameless_invocation_contributes_false() {
        let mut registry = InMemoryFilterRegistry::new();
        registry.register("On", Arc::new(Fixed(true)));

        let mut catalog = FeatureCatalog::new();
        catalog.add_definition(
            FeatureDefinition::new("Mixed")
                .with_filter(FilterInvocation::unnamed())
                .with_filter(FilterInvocation::new("On")),
        );

        let manager = manager_with(catalog, registry);
        assert!(manager.is_enabled("Mixed").unwrap());
    }

    #[test]
    fn unresolved_filter_is_false_under_fail_soft() {
        let mut catalog = FeatureCatalog::new();
        catalog.add_definition(
            FeatureDefinition::new("Missing").with_filter(FilterInvocation::new("NoSuchFilter")),
        );

        let manager = manager_with(catalog, InMemoryFilterRegistry::new());
        assert!(!manager.is_enabled("Missing").unwrap());
    }

    #[test]
    fn unresolved_filter_surfaces_under_fail_fast() {
        let mut catalog = FeatureCatalog::new();
        catalog.add_definition(
            FeatureDefinition::new("Missing").with_filter(FilterInvocation::new("NoSuchFilter")),
        );

        let manager = FeatureManager::with_config(
            catalog,
            Arc::new(InMemoryFilterRegistry::new()),
            FeatureManagerConfig { fail_fast: true },
        );

        match manager.is_enabled("Missing") {
            Err(FeatureError::FilterNotFound { filter, feature }) => {
                assert_eq!(filter, "NoSuchFilter");
                assert_eq!(feature, "Missing");
            }
            other => panic!("expected FilterNotFound, got {:?}", other),
        }

        // the failure is feature-scoped: other features still evaluate
        assert!(!manager.is_enabled("Unrelated").unwrap());
    }
}
