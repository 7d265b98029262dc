//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     RouteSource → config::loader → RouteTable (live)
//!
//! Reload:
//!     RouteSource → config::loader → RouteTable (candidate)
//!     → reconcile.rs (delete exclusive keys, put candidate entries)
//!     → live table mutated in place
//!
//! Request path:
//!     dispatch pipeline → router.rs lookup(path) → Entry | no match
//! ```
//!
//! # Design Decisions
//! - Exact path match, O(1) per lookup
//! - Lookups never wait on a reload beyond one shard's critical section
//! - No whole-table lock; consistency is per key, not per reload

pub mod entry;
pub mod reconcile;
pub mod router;
pub mod table;

pub use entry::Entry;
pub use reconcile::ReconcileSummary;
pub use router::Router;
pub use table::RouteTable;
