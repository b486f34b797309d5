//! Normalized feature declarations.
//!
//! These are the data holders the catalog produces from raw configuration and
//! the manager consumes at evaluation time.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// One filter attachment on a feature: the name of a registered filter plus
/// the parameters handed to it when the feature is evaluated.
///
/// A missing or empty name is legal in raw declarations; such an invocation is
/// kept structurally but never resolved, and contributes `false` to the OR.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterInvocation {
    #[serde(default, alias = "Name")]
    pub name: Option<String>,

    #[serde(default, alias = "Parameters")]
    pub parameters: HashMap<String, Value>,
}

impl FilterInvocation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            parameters: HashMap::new(),
        }
    }

    /// An invocation with no filter name attached.
    pub fn unnamed() -> Self {
        Self::default()
    }

    /// Add a parameter.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// Normalized form of one declared feature: its (possibly dotted) key, an
/// `enabled` gate, and the ordered list of filter invocations that decide
/// enablement when the gate is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDefinition {
    #[serde(default)]
    pub key: String,

    /// When false the feature is off outright; filters are never consulted.
    #[serde(default = "default_enabled", alias = "Enabled")]
    pub enabled: bool,

    #[serde(default, alias = "EnabledFor")]
    pub filters: Vec<FilterInvocation>,
}

fn default_enabled() -> bool {
    true
}

impl FeatureDefinition {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            enabled: true,
            filters: Vec::new(),
        }
    }

    /// Append a filter invocation. Declaration order is evaluation order.
    pub fn with_filter(mut self, filter: FilterInvocation) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}
