//! Loading token documents from disk
//!
//! Documents are plain JSON as exported by design tools. Hand-edited files
//! with comments or trailing commas are accepted too by falling back to
//! JSON5 when strict JSON parsing fails.

use glob::glob;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extensions recognized as token documents.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["json", "json5"];

/// Errors that can occur while loading a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Parse document text as JSON, then as JSON5.
///
/// The reported error is the JSON one, since that is the format design
/// tools export.
pub fn parse_document(content: &str) -> Result<Value, String> {
    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        Err(json_err) => json5::from_str(content).map_err(|_| json_err.to_string()),
    }
}

/// Read and parse a document file.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| DocumentError::Io { path: path.to_path_buf(), source })?;
    parse_document(&content)
        .map_err(|message| DocumentError::Parse { path: path.to_path_buf(), message })
}

/// Check if a path has a token document extension.
pub fn is_document_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext))
}

/// Find all token documents under a directory (recursively), sorted.
pub fn find_document_files(dir: &Path) -> Vec<PathBuf> {
    let dir_str = dir.display().to_string();
    let mut files: Vec<PathBuf> = DOCUMENT_EXTENSIONS
        .iter()
        .filter_map(|ext| glob(&format!("{}/**/*.{}", dir_str, ext)).ok())
        .flat_map(|paths| paths.filter_map(Result::ok))
        .collect();
    files.sort();
    files
}

/// Expand a list of file and directory arguments into document paths.
///
/// Files are kept as given whatever their extension; directories are
/// searched recursively.
pub fn expand_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(find_document_files(input));
        } else {
            files.push(input.clone());
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_json() {
        assert_eq!(parse_document(r#"{"a": 1}"#).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_parse_json5_fallback() {
        let content = "{\n  // exported by hand\n  variables: [{id: 'V1', modes: {'89:0': '#fff'},},],\n}";
        let value = parse_document(content).unwrap();
        assert_eq!(value["variables"][0]["id"], "V1");
    }

    #[test]
    fn test_parse_failure_reports_json_error() {
        let err = parse_document("{ not valid").unwrap_err();
        assert!(!err.is_empty());
    }

    #[test]
    fn test_load_document_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.json");
        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_load_document_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(matches!(load_document(&path), Err(DocumentError::Parse { .. })));
    }

    #[test]
    fn test_find_document_files() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("a.json"), "{}").unwrap();
        fs::write(temp.path().join("nested/b.json5"), "{}").unwrap();
        fs::write(temp.path().join("notes.txt"), "").unwrap();

        let files = find_document_files(temp.path());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| is_document_file(f)));
    }

    #[test]
    fn test_expand_inputs_mixes_files_and_dirs() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("tokens");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("one.json"), "{}").unwrap();
        let single = temp.path().join("single.txt");
        fs::write(&single, "{}").unwrap();

        let files = expand_inputs(&[dir, single.clone()]);
        assert_eq!(files.len(), 2);
        assert!(files.contains(&single));
    }
}
