//! Configuration for the resolver and CLI
//!
//! Provides types and discovery for `tokensrc.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
