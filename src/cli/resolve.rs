//! Resolve command implementation

use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::document::load_document;
use crate::validate::find_leftover_aliases;

use super::{load_effective_config, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the resolve command
pub fn run_resolve(
    input: &Path,
    output: Option<&Path>,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    show_stats: bool,
) -> ExitCode {
    let config = match load_effective_config(config_path, overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let doc = match load_document(input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let result = config.resolver().resolve(&doc);
    if show_stats {
        eprintln!("{}: {}", input.display(), result.stats);
    }

    let text = match render_json(&result.document, config.output.pretty) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: failed to serialize output: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, format!("{}\n", text)) {
                eprintln!("Error: failed to write {}: {}", path.display(), e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
        None => println!("{}", text),
    }

    let leftovers = find_leftover_aliases(&result.document);
    for leftover in &leftovers {
        eprintln!("Warning: {}", leftover);
    }
    if config.output.strict && !leftovers.is_empty() {
        eprintln!("Error: {} alias(es) left unresolved (strict mode)", leftovers.len());
        return ExitCode::from(EXIT_ERROR);
    }

    ExitCode::from(EXIT_SUCCESS)
}

fn render_json(value: &Value, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
