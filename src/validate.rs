//! Leftover alias checks for resolved documents
//!
//! Resolution never fails, so callers that need a fully dereferenced tree
//! run these scans afterwards and decide for themselves whether leftovers
//! are worth a warning or an error.

use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

use crate::classify::{alias_target, is_tagged_alias};

/// An explicitly tagged alias still present after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeftoverAlias {
    /// Dot-separated location of the alias in the document
    pub path: String,
    /// Target identifier, if the alias carried one
    pub target: Option<String>,
}

impl fmt::Display for LeftoverAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() { "<root>" } else { self.path.as_str() };
        match &self.target {
            Some(target) => write!(f, "unresolved alias to '{}' at {}", target, path),
            None => write!(f, "unresolved alias without target at {}", path),
        }
    }
}

/// Every tagged alias left in a document, in document order.
pub fn find_leftover_aliases(doc: &Value) -> Vec<LeftoverAlias> {
    let mut found = Vec::new();
    collect(doc, String::new(), &mut found);
    found
}

fn collect(value: &Value, path: String, found: &mut Vec<LeftoverAlias>) {
    if is_tagged_alias(value) {
        found.push(LeftoverAlias { path, target: alias_target(value).map(str::to_string) });
        return;
    }
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                collect(child, child_path(&path, key), found);
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                collect(item, child_path(&path, &i.to_string()), found);
            }
        }
        _ => {}
    }
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}

fn alias_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r#""type"\s*:\s*"VARIABLE_ALIAS""#).expect("alias marker pattern is valid")
    })
}

/// Whether serialized output still contains an alias type marker.
pub fn contains_alias_marker(text: &str) -> bool {
    alias_marker().is_match(text)
}
