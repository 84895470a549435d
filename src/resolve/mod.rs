//! Alias resolution
//!
//! [`Resolver`] holds the run-independent settings. Each call to
//! [`Resolver::resolve`] builds a fresh index from the document and threads
//! a fresh [`Session`] through the rewrite, so runs never share state and
//! batches can go wide with rayon.

mod session;

pub use session::Session;

use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::classify::Classifier;
use crate::color::ColorFormat;
use crate::index::{IndexOptions, VariableIndex, DEFAULT_MAX_SCAN_DEPTH};
use crate::modes::ModeNames;
use crate::stats::ResolutionStats;

/// Settings shared by every run of a [`Resolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Treat untagged `{id}` objects as aliases
    pub alias_heuristic: bool,
    /// Deep-scan nesting bound
    pub max_scan_depth: usize,
    /// Notation for extracted colors
    pub color_format: ColorFormat,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            alias_heuristic: true,
            max_scan_depth: DEFAULT_MAX_SCAN_DEPTH,
            color_format: ColorFormat::default(),
        }
    }
}

impl ResolveOptions {
    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.alias_heuristic)
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            max_scan_depth: self.max_scan_depth,
            classifier: self.classifier(),
            color_format: self.color_format,
        }
    }
}

/// A resolved document and the counters of the run that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveOutput {
    pub document: Value,
    pub stats: ResolutionStats,
}

/// Resolves every alias in a document to its concrete value.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    options: ResolveOptions,
    modes: ModeNames,
}

impl Resolver {
    pub fn new(options: ResolveOptions) -> Self {
        Self { options, modes: ModeNames::new() }
    }

    /// Use a mode name table with configured overrides.
    pub fn with_mode_names(mut self, modes: ModeNames) -> Self {
        self.modes = modes;
        self
    }

    pub fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Build the variable index for a document without resolving it.
    pub fn index(&self, doc: &Value) -> VariableIndex {
        VariableIndex::build(doc, &self.options.index_options())
    }

    /// Resolve one document.
    ///
    /// Never fails: malformed entries are skipped, and dangling or cyclic
    /// aliases are left in place and counted as unresolved.
    pub fn resolve(&self, doc: &Value) -> ResolveOutput {
        let index = self.index(doc);
        let modes = self.modes.with_document(doc);
        let mut session =
            Session::new(&index, &modes, self.options.classifier(), self.options.color_format);
        let document = session.rewrite(doc, "");
        let stats = session.finish();
        log::debug!("resolved document: {}", stats);
        ResolveOutput { document, stats }
    }

    /// Resolve several documents in parallel, each in its own run.
    pub fn resolve_batch(&self, docs: &[Value]) -> Vec<ResolveOutput> {
        docs.par_iter().map(|doc| self.resolve(doc)).collect()
    }
}

/// Resolve a document with default settings.
pub fn resolve_document(doc: &Value) -> ResolveOutput {
    Resolver::default().resolve(doc)
}
