//! Concurrent route table.
//!
//! # Responsibilities
//! - Map request paths to `Entry` values
//! - Serve lookups from any number of threads while a single writer mutates
//! - Enumerate current entries without a whole-table lock
//!
//! # Design Decisions
//! - Backed by `DashMap`: each key lives in one shard, so a write only blocks
//!   readers of keys in that shard for the duration of one insert/remove
//! - Values are `Arc<Entry>`; replacing a route swaps the `Arc`, never the
//!   contents, so readers never see a torn entry
//! - Entries are keyed by their own `path`, which keeps `table[p].path == p`
//! - Enumeration has no snapshot isolation: a concurrent writer may make an
//!   entry appear or disappear mid-walk

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::routing::entry::Entry;

/// Concurrency-safe mapping from request path to `Entry`.
///
/// Writers must be serialized by the owner (see `Router::reload`); readers are
/// unrestricted.
#[derive(Debug, Default)]
pub struct RouteTable {
    inner: DashMap<String, Arc<Entry>>,
}

impl RouteTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the entry for `path`.
    pub fn get(&self, path: &str) -> Option<Arc<Entry>> {
        self.inner.get(path).map(|r| Arc::clone(r.value()))
    }

    /// Insert or replace the entry for `entry.path()`.
    ///
    /// Returns the entry previously stored under that path, if any.
    pub fn put(&self, entry: Arc<Entry>) -> Option<Arc<Entry>> {
        self.inner.insert(entry.path().to_string(), entry)
    }

    /// Remove `path` from the table. Removing an absent path is a no-op.
    pub fn delete(&self, path: &str) -> Option<Arc<Entry>> {
        self.inner.remove(path).map(|(_, entry)| entry)
    }

    /// Visit every current `(path, entry)` pair.
    ///
    /// Shard read locks are held while visiting, so `visit` must not write to
    /// this same table.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &Arc<Entry>),
    {
        for r in self.inner.iter() {
            visit(r.key(), r.value());
        }
    }

    /// Whether `path` currently has an entry.
    pub fn contains(&self, path: &str) -> bool {
        self.inner.contains_key(path)
    }

    /// Number of routes.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Collect the current key set.
    pub fn paths(&self) -> Vec<String> {
        let mut paths = Vec::with_capacity(self.inner.len());
        self.for_each(|path, _| paths.push(path.to_string()));
        paths
    }

    /// Copy the current contents into a path-ordered map.
    pub fn snapshot(&self) -> BTreeMap<String, Entry> {
        let mut map = BTreeMap::new();
        self.for_each(|path, entry| {
            map.insert(path.to_string(), Entry::clone(entry));
        });
        map
    }
}

impl FromIterator<Entry> for RouteTable {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        let table = Self::new();
        for entry in iter {
            table.put(Arc::new(entry));
        }
        table
    }
}
