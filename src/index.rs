//! Variable index construction
//!
//! Discovers every variable in a document and indexes it under each of its
//! identifier spellings, alongside a table of primitive mode values.
//!
//! Discovery runs three strategies in order, each only adding entries:
//! 1. a root `variables` field (array, or mapping of variables / groups),
//! 2. each `variableCollections` entry's own `variables` field,
//! 3. a bounded deep scan of the whole document, which also checks the
//!    grouped entries of top-level `colors`, `spacing` and `typography`.
//!
//! Discovery functions return the variables they find rather than writing
//! into shared state, so each strategy can be exercised on its own.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::classify::{Classifier, ModeValue};
use crate::color::ColorFormat;
use crate::ident::{lookup_keys, registration_keys, strip_prefix};
use crate::variable::{looks_like_variable, Variable};

/// Default nesting bound for the deep scan.
pub const DEFAULT_MAX_SCAN_DEPTH: usize = 10;

/// Top-level grouping keys treated as token category containers.
pub const TOKEN_CATEGORIES: &[&str] = &["colors", "spacing", "typography"];

/// Options controlling index construction.
#[derive(Debug, Clone, Copy)]
pub struct IndexOptions {
    /// Deep-scan nesting bound
    pub max_scan_depth: usize,
    /// Classifier used to find primitive mode values
    pub classifier: Classifier,
    /// Notation for colors stored in the primitive table
    pub color_format: ColorFormat,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            max_scan_depth: DEFAULT_MAX_SCAN_DEPTH,
            classifier: Classifier::default(),
            color_format: ColorFormat::default(),
        }
    }
}

/// Lookup tables built from one document. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct VariableIndex {
    variables: Vec<Variable>,
    /// Identifier spelling -> position in `variables`
    keys: HashMap<String, usize>,
    /// `"{id}/{modeId}"` -> extracted primitive
    primitives: IndexMap<String, Value>,
    /// Prefix-stripped identifier -> position in `variables`
    slots: HashMap<String, usize>,
}

impl VariableIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover and index every variable in `doc`.
    pub fn build(doc: &Value, options: &IndexOptions) -> Self {
        let mut index = Self::new();
        for variable in discover(doc, options.max_scan_depth) {
            index.register(variable, options);
        }
        log::debug!(
            "indexed {} variables under {} keys ({} primitive mode values)",
            index.len(),
            index.keys.len(),
            index.primitives.len()
        );
        index
    }

    /// Register a variable under all of its identifier spellings.
    ///
    /// Re-registering the same identifier replaces the earlier definition
    /// in place, except that a definition without any modes never replaces
    /// an existing one.
    pub fn register(&mut self, variable: Variable, options: &IndexOptions) {
        let stripped = strip_prefix(&variable.id).to_string();
        let existing = self.slots.get(&stripped).copied();
        if existing.is_some() && !variable.has_modes() {
            return;
        }

        for (mode_id, value) in &variable.modes {
            if let ModeValue::Primitive(primitive) = options.classifier.classify(value) {
                self.primitives.insert(
                    format!("{}/{}", variable.id, mode_id),
                    primitive.into_value(options.color_format),
                );
            }
        }

        let keys = registration_keys(&variable.id);
        let position = match existing {
            Some(position) => {
                self.variables[position] = variable;
                position
            }
            None => {
                self.variables.push(variable);
                self.slots.insert(stripped, self.variables.len() - 1);
                self.variables.len() - 1
            }
        };
        for key in keys {
            self.keys.insert(key, position);
        }
    }

    /// Get a variable by one exact key spelling.
    pub fn get(&self, key: &str) -> Option<&Variable> {
        self.keys.get(key).map(|&i| &self.variables[i])
    }

    /// Find a variable by any spelling of its identifier.
    pub fn lookup(&self, target: &str) -> Option<&Variable> {
        lookup_keys(target).iter().find_map(|key| self.get(key))
    }

    /// Fallback search: the first primitive whose key contains the target
    /// identifier, raw or prefix-stripped.
    pub fn find_primitive(&self, target: &str) -> Option<&Value> {
        let stripped = strip_prefix(target);
        if target.is_empty() || stripped.is_empty() {
            return None;
        }
        self.primitives
            .iter()
            .find(|(key, _)| key.contains(target) || key.contains(stripped))
            .map(|(_, value)| value)
    }

    /// Number of distinct variables discovered.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether no variable was discovered.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Number of entries in the primitive table.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Current definition of every distinct variable, in discovery order.
    pub fn variables(&self) -> Vec<&Variable> {
        self.variables.iter().collect()
    }
}

/// Run all three discovery strategies in order.
pub fn discover(doc: &Value, max_depth: usize) -> Vec<Variable> {
    let mut found = Vec::new();
    if let Some(field) = doc.get("variables") {
        found.extend(from_variables_field(field));
    }
    if let Some(collections) = doc.get("variableCollections") {
        found.extend(from_collections(collections));
    }
    found.extend(deep_scan(doc, 0, max_depth));
    found
}

/// Variables from a `variables` field.
///
/// Arrays hold variable objects directly. Mappings hold variables keyed by
/// id, or one level of groups whose entries are variables; the map key
/// stands in for a missing `id`.
pub fn from_variables_field(field: &Value) -> Vec<Variable> {
    match field {
        Value::Array(items) => {
            items.iter().filter_map(|item| Variable::from_value(item, None)).collect()
        }
        Value::Object(entries) => entries
            .iter()
            .flat_map(|(key, entry)| {
                if looks_like_variable(entry) {
                    Variable::from_value(entry, Some(key.as_str())).into_iter().collect::<Vec<_>>()
                } else {
                    entry.as_object().map(from_group).unwrap_or_default()
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn from_group(group: &Map<String, Value>) -> Vec<Variable> {
    group
        .iter()
        .filter(|(_, nested)| looks_like_variable(nested))
        .filter_map(|(key, nested)| Variable::from_value(nested, Some(key.as_str())))
        .collect()
}

/// Variables nested under each collection's `variables` field.
pub fn from_collections(collections: &Value) -> Vec<Variable> {
    let items: Vec<&Value> = match collections {
        Value::Array(items) => items.iter().collect(),
        Value::Object(map) => map.values().collect(),
        _ => return Vec::new(),
    };
    items
        .into_iter()
        .filter_map(|collection| collection.get("variables"))
        .flat_map(from_variables_field)
        .collect()
}

/// Recursive scan for variable-shaped objects, bounded by `max_depth`.
pub fn deep_scan(value: &Value, depth: usize, max_depth: usize) -> Vec<Variable> {
    if depth > max_depth {
        return Vec::new();
    }

    match value {
        Value::Object(map) => {
            let mut found = Vec::new();
            if looks_like_variable(value) {
                found.extend(Variable::from_value(value, None));
            }
            if depth == 0 {
                found.extend(token_category_entries(map));
            }
            for child in map.values() {
                found.extend(deep_scan(child, depth + 1, max_depth));
            }
            found
        }
        Value::Array(items) => {
            items.iter().flat_map(|item| deep_scan(item, depth + 1, max_depth)).collect()
        }
        _ => Vec::new(),
    }
}

/// Second-level entries of `colors` / `spacing` / `typography` containers.
fn token_category_entries(root: &Map<String, Value>) -> Vec<Variable> {
    TOKEN_CATEGORIES
        .iter()
        .filter_map(|category| root.get(*category).and_then(Value::as_object))
        .flat_map(|groups| groups.values())
        .filter_map(Value::as_object)
        .flat_map(|entries| entries.values())
        .filter(|entry| looks_like_variable(entry))
        .filter_map(|entry| Variable::from_value(entry, None))
        .collect()
}
