//! Feature catalog and declaration ingestion.
//!
//! Raw feature declarations arrive as a nested key/value structure whose shape
//! this crate does not control: a feature may be a bare boolean, a descriptor
//! object carrying an `EnabledFor` filter list, or a grouping level whose
//! children are themselves features (`{"Beta": {"A": true}}` declares
//! `Beta.A`). Ingestion classifies every node explicitly, flattens grouped
//! names into dotted keys, and drops anything unrecognizable with an error
//! log. Malformed entries never abort ingestion.

use crate::definition::{FeatureDefinition, FilterInvocation};
use log::error;
use serde_json::{Map, Value};
use std::collections::HashMap;

const ENABLED_FOR_ALIASES: [&str; 3] = ["EnabledFor", "enabledFor", "enabled_for"];
const ENABLED_ALIASES: [&str; 2] = ["Enabled", "enabled"];
const NAME_ALIASES: [&str; 2] = ["Name", "name"];
const PARAMETERS_ALIASES: [&str; 2] = ["Parameters", "parameters"];

/// The normalized collection of all declared features.
///
/// Filter-based features and plain on/off toggles live in separate maps; a
/// given key is present in at most one of them. The catalog is built at
/// configuration-load time and read-only afterward; hot reload means building
/// a fresh catalog and swapping it in.
#[derive(Debug, Clone, Default)]
pub struct FeatureCatalog {
    filter_based: HashMap<String, FeatureDefinition>,
    simple_toggles: HashMap<String, bool>,
}

/// Classification of one raw object node during ingestion.
enum Node {
    Descriptor(FeatureDefinition),
    Grouping,
    Malformed,
}

impl FeatureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a single raw declaration map.
    pub fn from_map(raw: &Map<String, Value>) -> Self {
        let mut catalog = Self::new();
        catalog.ingest(raw);
        catalog
    }

    /// Ingest a raw declaration map, merging into the existing catalog.
    ///
    /// Additive across calls: each call classifies its entries independently,
    /// and on a key collision the later classification wins (the key is
    /// evicted from the other map so the exclusivity invariant holds).
    pub fn ingest(&mut self, raw: &Map<String, Value>) {
        self.ingest_level("", raw);
    }

    fn ingest_level(&mut self, prefix: &str, raw: &Map<String, Value>) {
        for (name, value) in raw {
            let key = join_key(prefix, name);
            match value {
                Value::Bool(on) => self.insert_toggle(key, *on),
                Value::Object(map) => match classify_object(&key, map) {
                    Node::Descriptor(definition) => self.insert_definition(definition),
                    Node::Grouping => self.ingest_level(&key, map),
                    Node::Malformed => {}
                },
                other => {
                    error!(
                        "Invalid feature declaration for '{}': {}; entry dropped",
                        key, other
                    );
                }
            }
        }
    }

    /// Register a pre-built definition directly, bypassing ingestion.
    pub fn add_definition(&mut self, definition: FeatureDefinition) {
        self.insert_definition(definition);
    }

    /// Register a plain on/off toggle directly.
    pub fn set_toggle(&mut self, key: impl Into<String>, on: bool) {
        self.insert_toggle(key.into(), on);
    }

    pub fn definition(&self, key: &str) -> Option<&FeatureDefinition> {
        self.filter_based.get(key)
    }

    pub fn toggle(&self, key: &str) -> Option<bool> {
        self.simple_toggles.get(key).copied()
    }

    pub fn filter_based(&self) -> &HashMap<String, FeatureDefinition> {
        &self.filter_based
    }

    pub fn simple_toggles(&self) -> &HashMap<String, bool> {
        &self.simple_toggles
    }

    pub fn is_empty(&self) -> bool {
        self.filter_based.is_empty() && self.simple_toggles.is_empty()
    }

    fn insert_toggle(&mut self, key: String, on: bool) {
        self.filter_based.remove(&key);
        self.simple_toggles.insert(key, on);
    }

    fn insert_definition(&mut self, definition: FeatureDefinition) {
        self.simple_toggles.remove(&definition.key);
        self.filter_based.insert(definition.key.clone(), definition);
    }
}

fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

/// Decide what an object node is. An object carrying an `EnabledFor` key (in
/// any accepted casing) is a feature descriptor; any other object is a
/// grouping level to recurse into.
fn classify_object(key: &str, map: &Map<String, Value>) -> Node {
    let enabled_for = ENABLED_FOR_ALIASES.iter().find_map(|alias| map.get(*alias));

    let Some(enabled_for) = enabled_for else {
        return Node::Grouping;
    };

    match parse_filters(enabled_for) {
        Some(filters) => {
            let enabled = ENABLED_ALIASES
                .iter()
                .find_map(|alias| map.get(*alias))
                .and_then(Value::as_bool)
                .unwrap_or(true);

            Node::Descriptor(FeatureDefinition {
                key: key.to_string(),
                enabled,
                filters,
            })
        }
        None => {
            error!(
                "Invalid feature declaration for '{}': unrecognized EnabledFor shape {}; entry dropped",
                key, enabled_for
            );
            Node::Malformed
        }
    }
}

/// Parse an `EnabledFor` value into an ordered invocation list.
///
/// Two shapes are accepted: a JSON array, and an object keyed by integer
/// indices (the shape flat property binding produces), ordered by index.
fn parse_filters(value: &Value) -> Option<Vec<FilterInvocation>> {
    match value {
        Value::Array(entries) => Some(entries.iter().map(parse_invocation).collect()),
        Value::Object(map) => {
            let mut indexed = Vec::with_capacity(map.len());
            for (index, entry) in map {
                indexed.push((index.parse::<usize>().ok()?, entry));
            }
            indexed.sort_by_key(|(index, _)| *index);
            Some(indexed.into_iter().map(|(_, e)| parse_invocation(e)).collect())
        }
        Value::Null => Some(Vec::new()),
        _ => None,
    }
}

/// Parse one filter entry. Entries without a usable name are kept; they
/// contribute `false` at evaluation time instead of being looked up.
fn parse_invocation(value: &Value) -> FilterInvocation {
    let Value::Object(map) = value else {
        return FilterInvocation::unnamed();
    };

    let name = NAME_ALIASES
        .iter()
        .find_map(|alias| map.get(*alias))
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    let parameters = PARAMETERS_ALIASES
        .iter()
        .find_map(|alias| map.get(*alias))
        .and_then(Value::as_object)
        .map(|params| {
            params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect::<HashMap<_, _>>()
        })
        .unwrap_or_default();

    FilterInvocation { name, parameters }
}
