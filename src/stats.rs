//! Resolution statistics

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

/// Counters collected during one resolution run.
///
/// Purely observational: downstream consumers use them to decide whether
/// to warn about incomplete resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionStats {
    /// Distinct variables discovered in the document
    pub total_variables: usize,
    /// Aliases dereferenced to a value
    pub resolved_aliases: usize,
    /// Aliases left in place (dangling or cyclic)
    pub unresolved_aliases: usize,
    /// Primitive mode values extracted
    pub primitive_values: usize,
}

impl ResolutionStats {
    /// True when no alias was left unresolved.
    pub fn is_complete(&self) -> bool {
        self.unresolved_aliases == 0
    }
}

impl AddAssign for ResolutionStats {
    fn add_assign(&mut self, other: Self) {
        self.total_variables += other.total_variables;
        self.resolved_aliases += other.resolved_aliases;
        self.unresolved_aliases += other.unresolved_aliases;
        self.primitive_values += other.primitive_values;
    }
}

impl fmt::Display for ResolutionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} variables, {} aliases resolved, {} unresolved, {} primitives",
            self.total_variables,
            self.resolved_aliases,
            self.unresolved_aliases,
            self.primitive_values
        )
    }
}
