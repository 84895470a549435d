//! Mode name normalization
//!
//! Maps opaque internal mode identifiers (`"89:0"`, `"1:1"`) to
//! human-readable theme names (`"default"`, `"dark"`). Unknown identifiers
//! pass through unchanged rather than being guessed at.
//!
//! Lookup order: configured overrides, then names declared by the document
//! itself (`variableCollections[*].modes`), then the built-in table.

use serde_json::Value;
use std::collections::HashMap;

/// Built-in mode identifier -> name table.
const BUILTIN_MODE_NAMES: &[(&str, &str)] = &[
    ("89:0", "default"),
    ("89:1", "dark"),
    ("0:0", "default"),
    ("1:0", "light"),
    ("1:1", "dark"),
    ("1:2", "brand"),
    ("Mode 1", "default"),
    ("Default", "default"),
    ("Light", "light"),
    ("Dark", "dark"),
    ("Brand", "brand"),
];

/// Mode identifier -> human-readable name lookup.
#[derive(Debug, Clone, Default)]
pub struct ModeNames {
    overrides: HashMap<String, String>,
    document: HashMap<String, String>,
}

impl ModeNames {
    /// Lookup with only the built-in table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookup with configured overrides taking precedence over everything else.
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            overrides: overrides.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            document: HashMap::new(),
        }
    }

    /// A copy of this lookup extended with the mode names a document declares.
    ///
    /// Reads `variableCollections[*].modes` entries of the form
    /// `{"modeId": "1:0", "name": "Light"}`.
    pub fn with_document(&self, doc: &Value) -> Self {
        let mut names = self.clone();
        names.document = document_mode_names(doc);
        names
    }

    /// Human-readable name for a mode identifier, or the identifier itself.
    pub fn normalize(&self, mode_id: &str) -> String {
        self.overrides
            .get(mode_id)
            .or_else(|| self.document.get(mode_id))
            .cloned()
            .or_else(|| builtin_name(mode_id).map(str::to_string))
            .unwrap_or_else(|| mode_id.to_string())
    }

    /// Number of document-declared mode names.
    pub fn document_len(&self) -> usize {
        self.document.len()
    }
}

fn builtin_name(mode_id: &str) -> Option<&'static str> {
    BUILTIN_MODE_NAMES.iter().find(|(id, _)| *id == mode_id).map(|(_, name)| *name)
}

/// Turn a display name like `"Light Mode"` into a token name.
fn slug(name: &str) -> String {
    if let Some(known) = builtin_name(name) {
        return known.to_string();
    }
    name.split_whitespace().map(str::to_lowercase).collect::<Vec<_>>().join("-")
}

fn document_mode_names(doc: &Value) -> HashMap<String, String> {
    let mut names = HashMap::new();
    let collections: Vec<&Value> = match doc.get("variableCollections") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(Value::Object(map)) => map.values().collect(),
        _ => return names,
    };

    for collection in collections {
        let Some(Value::Array(modes)) = collection.get("modes") else {
            continue;
        };
        for mode in modes {
            let id = mode.get("modeId").and_then(Value::as_str);
            let name = mode.get("name").and_then(Value::as_str);
            if let (Some(id), Some(name)) = (id, name) {
                let name = slug(name);
                if !name.is_empty() {
                    names.insert(id.to_string(), name);
                }
            }
        }
    }
    names
}
