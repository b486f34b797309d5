// Tollgate - feature-flag evaluation for Rust services
//
// This library is a thin facade over the engine crate: catalog ingestion,
// filter-based enablement, and request-scoped snapshots.

// Re-export the feature-management engine
pub use tollgate_features::*;

pub mod prelude {
    pub use crate::{
        FeatureCatalog, FeatureDefinition, FeatureFilter, FeatureManager, FeatureManagerConfig,
        FeatureSnapshot, FeatureSource, FilterInvocation, FilterRegistry, InMemoryFilterRegistry,
        PercentageFilter, TimeWindowFilter,
    };
}
