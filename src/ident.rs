//! Variable identifier spellings
//!
//! Design documents refer to the same variable in several ways:
//! `"VariableID:40000015:594"`, `"40000015:594"` or just `"594"`.
//! These helpers produce every spelling so that registration and lookup
//! agree regardless of which form a reference uses.

/// Prefix carried by fully-qualified variable identifiers.
pub const VARIABLE_ID_PREFIX: &str = "VariableID:";

/// Marker substring that identifies a string as a variable identifier.
pub const VARIABLE_ID_MARKER: &str = "VariableID";

/// Remove the `VariableID:` prefix if present.
pub fn strip_prefix(id: &str) -> &str {
    id.strip_prefix(VARIABLE_ID_PREFIX).unwrap_or(id)
}

/// Add the `VariableID:` prefix unless it is already there.
pub fn with_prefix(id: &str) -> String {
    if id.starts_with(VARIABLE_ID_PREFIX) {
        id.to_string()
    } else {
        format!("{}{}", VARIABLE_ID_PREFIX, id)
    }
}

/// The last colon-delimited segment of an identifier.
pub fn last_segment(id: &str) -> &str {
    id.rsplit(':').next().unwrap_or(id)
}

/// Keys a variable is registered under: raw, stripped, prefixed, last segment.
///
/// Duplicates are removed while preserving order.
pub fn registration_keys(id: &str) -> Vec<String> {
    dedup(vec![
        id.to_string(),
        strip_prefix(id).to_string(),
        with_prefix(id),
        last_segment(id).to_string(),
    ])
}

/// Spellings probed when looking a reference up: raw, stripped, last segment.
pub fn lookup_keys(id: &str) -> Vec<String> {
    dedup(vec![id.to_string(), strip_prefix(id).to_string(), last_segment(id).to_string()])
}

fn dedup(keys: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(keys.len());
    for key in keys {
        if !key.is_empty() && !out.contains(&key) {
            out.push(key);
        }
    }
    out
}
