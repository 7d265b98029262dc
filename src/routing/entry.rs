//! Route entry value.
//!
//! An `Entry` is never mutated once built. A changed route is a new `Entry`
//! stored under the same path, so readers holding an `Arc<Entry>` always see a
//! complete value.

use serde::Serialize;
use std::fmt;

/// A backend service descriptor: the service id plus the path it serves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
    id: String,
    path: String,
}

impl Entry {
    /// Create a new entry.
    ///
    /// Emptiness is checked by the loader before entries reach a table.
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }

    /// Service identifier requests on this path are routed to.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Request path this entry is keyed by.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id:{}, path:{}", self.id, self.path)
    }
}
