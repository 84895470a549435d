//! The design-token variable model
//!
//! A [`Variable`] is built from whichever raw shape the source document used:
//! variable-collection entries, token-category trees, or ad hoc objects met
//! during the deep scan. It is never mutated once registered.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::classify::ALIAS_TYPE;
use crate::ident::VARIABLE_ID_MARKER;

/// Type tag recognized as a color variable.
pub const COLOR_TYPE: &str = "COLOR";

/// Mode key used when a variable carries a bare `value` instead of a mode map.
pub const DEFAULT_MODE: &str = "default";

/// A named design token with a value per mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    /// Identifier exactly as written in the source document
    pub id: String,
    /// Human-readable name, often a slash path like `Brand/Primary/Base`
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `resolvedType` or `type` tag (e.g. `COLOR`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    /// Mode identifier -> raw mode value (primitive or alias)
    pub modes: Map<String, Value>,
}

impl Variable {
    /// Build a variable from a raw document object.
    ///
    /// The identifier comes from the object's `id` field, or `fallback_id`
    /// when the field is absent. Returns `None` for non-objects, alias
    /// references and objects without any usable identifier.
    pub fn from_value(raw: &Value, fallback_id: Option<&str>) -> Option<Self> {
        let obj = raw.as_object()?;
        if is_alias_tagged(obj) {
            return None;
        }

        let id = match obj.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            _ => fallback_id.filter(|id| !id.is_empty())?.to_string(),
        };

        let name = obj.get("name").and_then(Value::as_str).unwrap_or(&id).to_string();
        let description =
            obj.get("description").and_then(Value::as_str).map(str::to_string);
        let resolved_type = obj
            .get("resolvedType")
            .or_else(|| obj.get("type"))
            .and_then(Value::as_str)
            .map(str::to_string);
        let scopes = obj
            .get("scopes")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default();

        let modes = match (mode_map(obj), obj.get("value")) {
            (Some(modes), _) => modes.clone(),
            (None, Some(value)) => {
                let mut single = Map::new();
                single.insert(DEFAULT_MODE.to_string(), value.clone());
                single
            }
            (None, None) => Map::new(),
        };

        Some(Self { id, name, description, resolved_type, scopes, modes })
    }

    /// Whether this variable has any mode values at all.
    pub fn has_modes(&self) -> bool {
        !self.modes.is_empty()
    }
}

/// Decide whether a raw value looks like a variable definition.
///
/// True for objects with a `modes`/`valuesByMode` map, a `COLOR`
/// `type`/`resolvedType`, or an `id` containing `VariableID`. Alias
/// references never qualify even when their target id matches.
pub fn looks_like_variable(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    if is_alias_tagged(obj) {
        return false;
    }

    if mode_map(obj).is_some() {
        return true;
    }

    let is_color = ["type", "resolvedType"].iter().any(|key| {
        obj.get(*key).and_then(Value::as_str).is_some_and(|t| t.eq_ignore_ascii_case(COLOR_TYPE))
    });
    if is_color {
        return true;
    }

    obj.get("id").and_then(Value::as_str).is_some_and(|id| id.contains(VARIABLE_ID_MARKER))
}

/// The mode map of a raw variable object (`modes` first, then `valuesByMode`).
pub(crate) fn mode_map(obj: &Map<String, Value>) -> Option<&Map<String, Value>> {
    obj.get("modes")
        .and_then(Value::as_object)
        .or_else(|| obj.get("valuesByMode").and_then(Value::as_object))
}

fn is_alias_tagged(obj: &Map<String, Value>) -> bool {
    obj.get("type").and_then(Value::as_str) == Some(ALIAS_TYPE)
}
