//! Mode-value classification
//!
//! Every mode value is either a ready-to-use primitive, an alias to another
//! variable, or something unrecognized that passes through untouched.
//! [`Classifier::classify`] is the single place that decides which; the
//! resolver and rewriter match on the result instead of re-deriving
//! booleans.
//!
//! Alias detection has two tiers:
//! - **Tagged**: an object whose `type` is `VARIABLE_ALIAS`.
//! - **Heuristic**: a flat object with a string `id`, no `hex`/`rgb` field
//!   and no `type` tag of its own. This catches untagged references but
//!   also any unrelated record that happens to carry an `id`, so it can be
//!   switched off.

use serde_json::{Map, Value};

use crate::color::{channels_to_hex, ColorFormat};
use crate::variable::mode_map;

/// Type tag of an explicit alias reference.
pub const ALIAS_TYPE: &str = "VARIABLE_ALIAS";

/// A concrete, renderable value extracted from a mode value.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// A `hex` field or a `#` string, as written
    Hex(Value),
    /// Hex converted from an `rgb` channel triple
    Rgb(String),
    /// Hex converted from `r`/`g`/`b` channels on the object itself
    Channels(String),
    /// A number, a `value` field, or an unconvertible primitive-looking object
    Literal(Value),
}

impl Primitive {
    /// The extracted value, with colors rendered in `format`.
    pub fn into_value(self, format: ColorFormat) -> Value {
        match self {
            Primitive::Hex(Value::String(hex)) => Value::String(format.render(&hex)),
            Primitive::Hex(other) => other,
            Primitive::Rgb(hex) | Primitive::Channels(hex) => Value::String(format.render(&hex)),
            Primitive::Literal(value) => value,
        }
    }
}

/// A reference to another variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alias<'a> {
    /// Target identifier, if the reference carries one
    pub target: Option<&'a str>,
    /// Whether the reference was explicitly tagged
    pub tagged: bool,
    /// The reference as it appeared in the document
    pub raw: &'a Value,
}

/// Classification of a single mode value.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeValue<'a> {
    Primitive(Primitive),
    Alias(Alias<'a>),
    Unknown(&'a Value),
}

/// Classifies values as primitives, aliases or unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    alias_heuristic: bool,
}

impl Default for Classifier {
    fn default() -> Self {
        Self { alias_heuristic: true }
    }
}

impl Classifier {
    /// Create a classifier, optionally disabling the untagged alias heuristic.
    pub fn new(alias_heuristic: bool) -> Self {
        Self { alias_heuristic }
    }

    /// Whether untagged `id` objects are treated as aliases.
    pub fn alias_heuristic(&self) -> bool {
        self.alias_heuristic
    }

    /// Classify a value. Alias checks take priority over primitive checks.
    pub fn classify<'a>(&self, value: &'a Value) -> ModeValue<'a> {
        if is_tagged_alias(value) {
            return ModeValue::Alias(Alias { target: alias_target(value), tagged: true, raw: value });
        }
        if self.alias_heuristic && is_heuristic_alias(value) {
            return ModeValue::Alias(Alias { target: alias_target(value), tagged: false, raw: value });
        }
        if is_primitive(value) {
            return ModeValue::Primitive(extract(value));
        }
        ModeValue::Unknown(value)
    }

    /// Whether a value is an alias under this classifier's rules.
    pub fn is_alias(&self, value: &Value) -> bool {
        is_tagged_alias(value) || (self.alias_heuristic && is_heuristic_alias(value))
    }
}

/// An object explicitly tagged `type: VARIABLE_ALIAS`.
pub fn is_tagged_alias(value: &Value) -> bool {
    value.get("type").and_then(Value::as_str) == Some(ALIAS_TYPE)
}

/// An untagged object with a string `id` and no color fields.
///
/// Objects carrying a `modes`/`valuesByMode` map or a `type`/`resolvedType`
/// tag are definitions, not references, and never match. Neither do objects
/// with nested containers: a reference is a flat record, while document
/// nodes with ids (pages, frames, collections) carry children.
pub fn is_heuristic_alias(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    obj.get("id").is_some_and(Value::is_string)
        && !obj.contains_key("hex")
        && !obj.contains_key("rgb")
        && !obj.contains_key("type")
        && !obj.contains_key("resolvedType")
        && mode_map(obj).is_none()
        && !obj.values().any(|v| v.is_object() || v.is_array())
}

/// The identifier an alias points at: its `id` field, or the value itself
/// when it is already a bare identifier string.
pub fn alias_target(value: &Value) -> Option<&str> {
    match value {
        Value::String(id) => Some(id.as_str()),
        Value::Object(obj) => obj.get("id").and_then(Value::as_str),
        _ => None,
    }
}

/// Whether a value is a concrete primitive.
///
/// Permissive: any one of `hex`, `rgb`, numeric `r`, a `#` string, a number,
/// or a non-alias object with a `value` field is enough.
pub fn is_primitive(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => s.starts_with('#'),
        Value::Object(obj) => {
            obj.contains_key("hex")
                || obj.contains_key("rgb")
                || obj.get("r").is_some_and(Value::is_number)
                || (!is_tagged_alias(value) && obj.contains_key("value"))
        }
        _ => false,
    }
}

/// Extract the canonical form of a primitive.
///
/// Priority: `hex` → `rgb` → `r/g/b` → `#` string → `value` → unchanged.
pub fn extract(value: &Value) -> Primitive {
    if let Value::Object(obj) = value {
        if let Some(hex) = obj.get("hex") {
            return Primitive::Hex(hex.clone());
        }
        if let Some(hex) = obj.get("rgb").and_then(channels_hex) {
            return Primitive::Rgb(hex);
        }
        if obj.get("r").is_some_and(Value::is_number) {
            if let Some(hex) = object_channels_hex(obj) {
                return Primitive::Channels(hex);
            }
        }
        if let Some(inner) = obj.get("value") {
            return Primitive::Literal(inner.clone());
        }
    }
    if let Value::String(s) = value {
        if s.starts_with('#') {
            return Primitive::Hex(value.clone());
        }
    }
    Primitive::Literal(value.clone())
}

/// Hex from an `rgb` field: either `{r, g, b}` or `[r, g, b]` unit floats.
fn channels_hex(rgb: &Value) -> Option<String> {
    match rgb {
        Value::Object(obj) => object_channels_hex(obj),
        Value::Array(items) if items.len() >= 3 => {
            let r = items[0].as_f64()?;
            let g = items[1].as_f64()?;
            let b = items[2].as_f64()?;
            Some(channels_to_hex(r, g, b))
        }
        _ => None,
    }
}

/// Hex from `r`/`g`/`b` fields. Missing `g`/`b` count as zero.
fn object_channels_hex(obj: &Map<String, Value>) -> Option<String> {
    let r = obj.get("r")?.as_f64()?;
    let g = obj.get("g").and_then(Value::as_f64).unwrap_or(0.0);
    let b = obj.get("b").and_then(Value::as_f64).unwrap_or(0.0);
    Some(channels_to_hex(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_channel_color_extracts_to_hex() {
        let value = json!({"r": 1.0, "g": 0.4, "b": 0.0});
        assert!(is_primitive(&value));
        assert_eq!(extract(&value), Primitive::Channels("#ff6600".to_string()));
    }

    #[test]
    fn test_extract_priority_hex_first() {
        let value = json!({"hex": "#ABCDEF", "rgb": {"r": 0, "g": 0, "b": 0}, "value": 1});
        assert_eq!(extract(&value), Primitive::Hex(json!("#ABCDEF")));
    }

    #[test]
    fn test_extract_rgb_object_and_array() {
        assert_eq!(
            extract(&json!({"rgb": {"r": 0.0, "g": 0.0, "b": 1.0}})),
            Primitive::Rgb("#0000ff".to_string())
        );
        assert_eq!(
            extract(&json!({"rgb": [0.0, 1.0, 0.0]})),
            Primitive::Rgb("#00ff00".to_string())
        );
    }

    #[test]
    fn test_extract_unconvertible_rgb_falls_through() {
        let value = json!({"rgb": "nope", "value": "#123456"});
        assert_eq!(extract(&value), Primitive::Literal(json!("#123456")));

        let value = json!({"rgb": "nope"});
        assert_eq!(extract(&value), Primitive::Literal(value.clone()));
    }

    #[test]
    fn test_extract_hex_string_and_number() {
        assert_eq!(extract(&json!("#112233")), Primitive::Hex(json!("#112233")));
        assert_eq!(extract(&json!(16)), Primitive::Literal(json!(16)));
    }

    #[test]
    fn test_extract_value_field() {
        assert_eq!(extract(&json!({"type": "FLOAT", "value": 4})), Primitive::Literal(json!(4)));
    }

    #[test]
    fn test_is_primitive_rejects() {
        assert!(!is_primitive(&Value::Null));
        assert!(!is_primitive(&json!("plain text")));
        assert!(!is_primitive(&json!(true)));
        assert!(!is_primitive(&json!({"r": "1"})));
        assert!(!is_primitive(&json!({"type": ALIAS_TYPE, "value": 1})));
    }

    #[test]
    fn test_tagged_alias() {
        let classifier = Classifier::default();
        let alias = json!({"type": "VARIABLE_ALIAS", "id": "VariableID:1:2"});
        match classifier.classify(&alias) {
            ModeValue::Alias(a) => {
                assert_eq!(a.target, Some("VariableID:1:2"));
                assert!(a.tagged);
            }
            other => panic!("expected alias, got {:?}", other),
        }
    }

    #[test]
    fn test_heuristic_alias_and_toggle() {
        let untagged = json!({"id": "1:2"});
        assert!(Classifier::new(true).is_alias(&untagged));
        assert!(!Classifier::new(false).is_alias(&untagged));
        assert!(matches!(Classifier::new(false).classify(&untagged), ModeValue::Unknown(_)));
    }

    #[test]
    fn test_heuristic_skips_colors_and_variables() {
        assert!(!is_heuristic_alias(&json!({"id": "1:2", "hex": "#fff"})));
        assert!(!is_heuristic_alias(&json!({"id": "1:2", "rgb": [1, 1, 1]})));
        assert!(!is_heuristic_alias(&json!({"id": "1:2", "modes": {"1:0": 1}})));
        assert!(!is_heuristic_alias(&json!({"id": 12})));
    }

    #[test]
    fn test_heuristic_skips_definitions_and_nodes() {
        assert!(!is_heuristic_alias(&json!({"id": "c1", "type": "COLOR", "value": "#fff"})));
        assert!(!is_heuristic_alias(&json!({"id": "0:1", "name": "Page", "children": []})));
        assert!(!is_heuristic_alias(&json!({"id": "0:1", "meta": {"a": 1}})));
        assert!(is_heuristic_alias(&json!({"id": "0:1", "name": "ref"})));
    }

    #[test]
    fn test_alias_wins_over_primitive() {
        // Has an id (alias heuristic) and a value field (primitive)
        let value = json!({"id": "1:2", "value": 5});
        assert!(is_primitive(&value));
        assert!(matches!(Classifier::default().classify(&value), ModeValue::Alias(_)));
        assert_eq!(
            Classifier::new(false).classify(&value),
            ModeValue::Primitive(Primitive::Literal(json!(5)))
        );
    }

    #[test]
    fn test_alias_target() {
        assert_eq!(alias_target(&json!("594")), Some("594"));
        assert_eq!(alias_target(&json!({"id": "V1"})), Some("V1"));
        assert_eq!(alias_target(&json!({"type": ALIAS_TYPE})), None);
        assert_eq!(alias_target(&json!(1)), None);
    }

    #[test]
    fn test_into_value_color_format() {
        let channels = extract(&json!({"r": 1.0, "g": 0.0, "b": 0.0}));
        assert_eq!(channels.into_value(ColorFormat::Hsl), json!("hsl(0 100% 50%)"));
        let literal = extract(&json!(12));
        assert_eq!(literal.into_value(ColorFormat::Hsl), json!(12));
    }

    #[test]
    fn test_unknown_passthrough() {
        let value = json!({"foo": "bar"});
        assert_eq!(Classifier::default().classify(&value), ModeValue::Unknown(&value));
    }
}
