//! Feature Management for Tollgate
//!
//! A feature-flag evaluation engine: nested feature declarations are
//! normalized into a catalog, enablement is decided by named, pluggable
//! filters with OR/short-circuit semantics, and a snapshot gives one inbound
//! request a consistent view of every flag it asks about.
//!
//! # Features
//!
//! - 🧭 **Catalog ingestion** - Flattens nested declarations into dotted keys
//! - 🔀 **Simple toggles** - Plain booleans answer without filter machinery
//! - 🔌 **Pluggable filters** - Register predicates by name, OR-composed
//! - 🎲 **Percentage rollout** - Built-in probabilistic filter
//! - ⏰ **Time windows** - Built-in scheduled-activation filter
//! - 📸 **Snapshots** - Per-request memoization of results
//!
//! # Quick Start
//!
//! ```
//! use tollgate_features::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let declarations = json!({
//!     "Beta": { "A": true },
//!     "Rollout": {
//!         "EnabledFor": [
//!             { "Name": "PercentageFilter",
//!               "Parameters": { "PercentageFilterSetting": 100 } }
//!         ]
//!     }
//! });
//!
//! let catalog = FeatureCatalog::from_map(declarations.as_object().unwrap());
//! let registry = Arc::new(InMemoryFilterRegistry::with_builtins());
//! let manager = FeatureManager::new(catalog, registry);
//!
//! assert!(manager.is_enabled("Beta.A").unwrap());
//! assert!(manager.is_enabled("Rollout").unwrap());
//! assert!(!manager.is_enabled("NotConfigured").unwrap());
//! ```
//!
//! # Custom Filters
//!
//! ```
//! use tollgate_features::*;
//! use serde_json::Value;
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! struct WeekendsOnly;
//!
//! impl FeatureFilter for WeekendsOnly {
//!     fn evaluate(&self, _parameters: &HashMap<String, Value>) -> bool {
//!         use chrono::{Datelike, Utc, Weekday};
//!         matches!(Utc::now().weekday(), Weekday::Sat | Weekday::Sun)
//!     }
//! }
//!
//! let mut registry = InMemoryFilterRegistry::with_builtins();
//! registry.register("WeekendsOnly", Arc::new(WeekendsOnly));
//! ```
//!
//! # Request Snapshots
//!
//! ```
//! use tollgate_features::*;
//! use std::sync::Arc;
//!
//! let manager = Arc::new(FeatureManager::new(
//!     FeatureCatalog::new(),
//!     Arc::new(InMemoryFilterRegistry::with_builtins()),
//! ));
//!
//! // one snapshot per unit of work; drop it when the work ends
//! let mut snapshot = FeatureSnapshot::new(manager);
//! let first = snapshot.is_enabled("experimental-ui").unwrap();
//! assert_eq!(snapshot.is_enabled("experimental-ui").unwrap(), first);
//! ```

pub mod builtin;
pub mod catalog;
pub mod config;
pub mod definition;
pub mod error;
pub mod filter;
pub mod manager;
pub mod snapshot;

pub use builtin::{PercentageFilter, TimeWindowFilter};
pub use catalog::FeatureCatalog;
pub use config::FeatureSource;
pub use definition::{FeatureDefinition, FilterInvocation};
pub use error::{FeatureError, Result};
pub use filter::{FeatureFilter, FilterRegistry, InMemoryFilterRegistry};
pub use manager::{FeatureManager, FeatureManagerConfig};
pub use snapshot::FeatureSnapshot;
