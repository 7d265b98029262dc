//! Route lookup facade.
//!
//! # Responsibilities
//! - Own the live route table for the process lifetime
//! - Reload from the same source on demand
//! - Serve lookups and render the table for operators
//!
//! # Design Decisions
//! - The table is created once and reconciled in place; `table()` handles
//!   stay live across reloads
//! - Reloads are serialized by an internal mutex; lookups never touch it
//! - A failed reload leaves the table exactly as it was

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use crate::config::loader::{load_file, ConfigError};
use crate::config::schema::RouteSource;
use crate::observability::metrics;
use crate::routing::entry::Entry;
use crate::routing::reconcile::{self, ReconcileSummary};
use crate::routing::table::RouteTable;

/// Live routing table bound to its configuration source.
#[derive(Debug)]
pub struct Router {
    source: RouteSource,
    table: Arc<RouteTable>,
    reload_lock: Mutex<()>,
}

impl Router {
    /// Load `source` and build a router. Fails if the initial load fails.
    pub fn open(source: RouteSource) -> Result<Self, ConfigError> {
        let table = load_file(&source)?;

        tracing::info!(
            path = %source.path().display(),
            routes = table.len(),
            "Route table loaded"
        );
        metrics::record_route_count(table.len());

        Ok(Self {
            source,
            table: Arc::new(table),
            reload_lock: Mutex::new(()),
        })
    }

    /// Shorthand for `open` with the format inferred from the extension.
    pub fn from_path(path: impl Into<std::path::PathBuf>) -> Result<Self, ConfigError> {
        Self::open(RouteSource::new(path))
    }

    /// Re-read the source and reconcile the live table against it.
    ///
    /// Concurrent callers are serialized. On error the table is untouched.
    pub fn reload(&self) -> Result<ReconcileSummary, ConfigError> {
        // The guard protects no data; a panicked reload leaves every key
        // consistent, so poisoning is ignored.
        let _guard = self.reload_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let start = Instant::now();

        let candidate = match load_file(&self.source) {
            Ok(candidate) => candidate,
            Err(e) => {
                tracing::error!(
                    path = %self.source.path().display(),
                    error = %e,
                    "Route reload rejected; keeping current routes"
                );
                metrics::record_reload_failure(e.kind(), start);
                return Err(e);
            }
        };

        let summary = reconcile::apply(&self.table, &candidate);

        tracing::info!(
            added = summary.added,
            removed = summary.removed,
            updated = summary.updated,
            routes = self.table.len(),
            "Route table reloaded"
        );
        metrics::record_reload_success(&summary, start);
        metrics::record_route_count(self.table.len());

        Ok(summary)
    }

    /// Entry serving `path`, if any.
    pub fn lookup(&self, path: &str) -> Option<Arc<Entry>> {
        self.table.get(path)
    }

    /// One `"<path> -> id:<id>, path:<path>"` line per route, in table
    /// enumeration order.
    pub fn export(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.table.len());
        self.table.for_each(|path, entry| {
            lines.push(format!("{} -> {}", path, entry));
        });
        lines
    }

    /// `export()` with every line newline-terminated.
    pub fn export_text(&self) -> String {
        self.export().into_iter().fold(String::new(), |mut out, line| {
            out.push_str(&line);
            out.push('\n');
            out
        })
    }

    /// Path-ordered copy of the current routes.
    pub fn snapshot(&self) -> BTreeMap<String, Entry> {
        self.table.snapshot()
    }

    /// Shared handle to the live table.
    pub fn table(&self) -> Arc<RouteTable> {
        Arc::clone(&self.table)
    }

    pub fn source(&self) -> &RouteSource {
        &self.source
    }
}
