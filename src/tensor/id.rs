//! Variable ID generation

use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for unique variable IDs
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a variable
///
/// Clones of a [`super::Variable`] share the same ID since they share the
/// same data. IDs are unique within a process lifetime and show up in
/// evaluation traces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VariableId(u64);

impl VariableId {
    /// Create a new unique variable ID
    #[inline]
    pub fn new() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl Default for VariableId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VariableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Variable({})", self.0)
    }
}
