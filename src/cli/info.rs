//! Info command implementations (stats, variables)

use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::document::{expand_inputs, load_document};
use crate::stats::ResolutionStats;

use super::{load_effective_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Per-file line of the stats report
#[derive(Debug, Serialize)]
struct FileStats {
    path: PathBuf,
    #[serde(flatten)]
    stats: ResolutionStats,
}

#[derive(Debug, Serialize)]
struct StatsReport {
    files: Vec<FileStats>,
    total: ResolutionStats,
}

/// Execute the stats command
///
/// Documents are resolved in parallel; unreadable ones are reported and
/// make the command fail without stopping the rest.
pub fn run_stats(inputs: &[PathBuf], config_path: Option<&Path>, json: bool) -> ExitCode {
    let config = match load_effective_config(config_path, &CliOverrides::default()) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let files = expand_inputs(inputs);
    if files.is_empty() {
        eprintln!("Error: No token documents found");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let mut paths = Vec::new();
    let mut docs: Vec<Value> = Vec::new();
    let mut failed = false;
    for path in files {
        match load_document(&path) {
            Ok(doc) => {
                paths.push(path);
                docs.push(doc);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
    }

    let outputs = config.resolver().resolve_batch(&docs);
    let mut total = ResolutionStats::default();
    let files: Vec<FileStats> = paths
        .into_iter()
        .zip(outputs)
        .map(|(path, output)| {
            total += output.stats;
            FileStats { path, stats: output.stats }
        })
        .collect();

    if json {
        let report = StatsReport { files, total };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        for file in &files {
            println!("{}: {}", file.path.display(), file.stats);
        }
        if files.len() > 1 {
            println!("total: {}", total);
        }
    }

    if failed {
        ExitCode::from(EXIT_ERROR)
    } else {
        ExitCode::from(EXIT_SUCCESS)
    }
}

/// Execute the variables command
pub fn run_variables(input: &Path, config_path: Option<&Path>) -> ExitCode {
    let config = match load_effective_config(config_path, &CliOverrides::default()) {
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

    let index = config.resolver().index(&doc);
    match serde_json::to_string_pretty(&index.variables()) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
