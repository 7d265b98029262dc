//! Hot-reload diff/merge.
//!
//! # Responsibilities
//! - Compute the paths the live table has that the candidate lacks
//! - Delete those paths, then put every candidate entry
//! - Report what changed
//!
//! # Design Decisions
//! - The live table is mutated key by key, never swapped, so every holder of
//!   the table handle sees the new routes without re-fetching anything
//! - Deletions run before insertions: a path dropped by the new config
//!   disappears instead of briefly pointing at a stale owner
//! - A path present in both configs with a changed entry serves the old entry
//!   until its own `put` lands
//! - Assumes a single writer; `Router::reload` serializes callers

use std::sync::Arc;

use crate::routing::table::RouteTable;

/// Outcome of reconciling a live table against a candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Paths deleted because the candidate no longer has them.
    pub removed: usize,
    /// Paths the live table did not have before.
    pub added: usize,
    /// Paths whose entry changed.
    pub updated: usize,
    /// Paths rewritten with an identical entry.
    pub unchanged: usize,
}

impl ReconcileSummary {
    /// Whether the reconcile altered any route.
    pub fn is_noop(&self) -> bool {
        self.removed == 0 && self.added == 0 && self.updated == 0
    }
}

/// Paths present in `live` but absent from `candidate`.
///
/// Collected up front so no shard lock on `live` is held while it is later
/// mutated.
pub fn exclusive_keys(live: &RouteTable, candidate: &RouteTable) -> Vec<String> {
    let mut keys = Vec::new();
    live.for_each(|path, _| {
        if !candidate.contains(path) {
            keys.push(path.to_string());
        }
    });
    keys
}

/// Make `live` hold exactly the contents of `candidate`.
pub fn apply(live: &RouteTable, candidate: &RouteTable) -> ReconcileSummary {
    let mut summary = ReconcileSummary::default();

    for path in exclusive_keys(live, candidate) {
        if live.delete(&path).is_some() {
            tracing::debug!(path = %path, "Route removed");
            summary.removed += 1;
        }
    }

    // Entries are cloned out first; `for_each` holds candidate shard locks.
    let mut incoming = Vec::with_capacity(candidate.len());
    candidate.for_each(|_, entry| incoming.push(Arc::clone(entry)));

    for entry in incoming {
        match live.put(Arc::clone(&entry)) {
            None => {
                tracing::debug!(path = %entry.path(), id = %entry.id(), "Route added");
                summary.added += 1;
            }
            Some(previous) if *previous != *entry => {
                tracing::debug!(
                    path = %entry.path(),
                    old_id = %previous.id(),
                    new_id = %entry.id(),
                    "Route updated"
                );
                summary.updated += 1;
            }
            Some(_) => summary.unchanged += 1,
        }
    }

    summary
}
