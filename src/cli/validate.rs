//! Check command implementation

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::document::parse_document;
use crate::validate::{contains_alias_marker, find_leftover_aliases};

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the check command
///
/// Scans an already-resolved document for aliases that survived resolution.
pub fn run_check(input: &Path) -> ExitCode {
    let content = match fs::read_to_string(input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error: failed to read {}: {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let doc = match parse_document(&content) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: failed to parse {}: {}", input.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let leftovers = find_leftover_aliases(&doc);
    if leftovers.is_empty() {
        if contains_alias_marker(&content) {
            // Only textual, e.g. quoted in a JSON5 comment
            eprintln!("Warning: {} mentions an alias marker", input.display());
        }
        println!("{}: no leftover aliases", input.display());
        return ExitCode::from(EXIT_SUCCESS);
    }

    for leftover in &leftovers {
        println!("{}: {}", input.display(), leftover);
    }
    eprintln!("Error: {} leftover alias(es)", leftovers.len());
    ExitCode::from(EXIT_ERROR)
}
