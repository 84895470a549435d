//! tokensrc - Design-token variable alias resolution
//!
//! This library provides functionality to:
//! - Discover design-token variables in a document under every identifier spelling
//! - Resolve alias chains to concrete primitive values
//! - Relabel internal mode identifiers with human-readable theme names
//! - Check resolved output for leftover aliases

pub mod classify;
pub mod cli;
pub mod color;
pub mod config;
pub mod document;
pub mod ident;
pub mod index;
pub mod modes;
pub mod resolve;
pub mod stats;
pub mod validate;
pub mod variable;

pub use classify::{Classifier, ModeValue, Primitive};
pub use index::VariableIndex;
pub use resolve::{resolve_document, ResolveOptions, ResolveOutput, Resolver, Session};
pub use stats::ResolutionStats;
pub use variable::Variable;
