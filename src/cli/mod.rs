//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod info;
mod resolve;
mod validate;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::color::ColorFormat;
use crate::config::{load_config, merge_cli_overrides, CliOverrides, TokensrcConfig};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// tokensrc - Resolve design-token variable aliases to concrete values
#[derive(Parser)]
#[command(name = "tsrc")]
#[command(about = "tokensrc - Resolve design-token variable aliases to concrete values")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve every alias in a token document
    Resolve {
        /// Input document (.json or .json5)
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to tokensrc.toml (default: discovered)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Strict mode: leftover aliases are an error
        #[arg(long)]
        strict: bool,

        /// Write compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,

        /// Print resolution statistics to stderr
        #[arg(long)]
        stats: bool,

        /// Notation for extracted colors
        #[arg(long, value_enum)]
        color_format: Option<ColorFormat>,

        /// Only treat explicitly tagged objects as aliases
        #[arg(long)]
        no_alias_heuristic: bool,

        /// Deep-scan nesting bound (1-64)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=64))]
        max_depth: Option<u8>,
    },

    /// Report resolution statistics for documents or directories
    Stats {
        /// Input documents or directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Path to tokensrc.toml (default: discovered)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the variables discovered in a document
    Variables {
        /// Input document
        input: PathBuf,

        /// Path to tokensrc.toml (default: discovered)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a resolved document for leftover aliases
    Check {
        /// Resolved document
        input: PathBuf,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Resolve {
            input,
            output,
            config,
            strict,
            compact,
            stats,
            color_format,
            no_alias_heuristic,
            max_depth,
        } => {
            let overrides = CliOverrides {
                alias_heuristic: no_alias_heuristic.then_some(false),
                max_scan_depth: max_depth.map(usize::from),
                color_format,
                pretty: compact.then_some(false),
                strict: strict.then_some(true),
            };
            resolve::run_resolve(&input, output.as_deref(), config.as_deref(), &overrides, stats)
        }
        Commands::Stats { inputs, config, json } => {
            info::run_stats(&inputs, config.as_deref(), json)
        }
        Commands::Variables { input, config } => info::run_variables(&input, config.as_deref()),
        Commands::Check { input } => validate::run_check(&input),
    }
}

fn init_logging(verbose: u8) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    match verbose {
        0 => {}
        1 => {
            builder.filter_module("tokensrc", log::LevelFilter::Debug);
        }
        _ => {
            builder.filter_module("tokensrc", log::LevelFilter::Trace);
        }
    }
    // A logger may already be installed when run from tests
    let _ = builder.format_timestamp(None).try_init();
}

/// Load configuration and apply CLI overrides, reporting failures on stderr.
pub(crate) fn load_effective_config(
    path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<TokensrcConfig, ExitCode> {
    let mut config = load_config(path).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })?;
    merge_cli_overrides(&mut config, overrides);
    Ok(config)
}
