//! Route source management.
//!
//! # Data Flow
//! ```text
//! route file (YAML/TOML)
//!     → loader.rs (read & deserialize, strict fields)
//!     → validation.rs (per-record semantic checks)
//!     → RouteTable (candidate, fully valid or not built at all)
//!
//! On change:
//!     watcher.rs detects change (or SIGHUP arrives)
//!     → Router::reload
//!     → loader.rs loads candidate
//!     → routing::reconcile merges it into the live table
//! ```
//!
//! # Design Decisions
//! - Tables are keyed by the record's `path`, not the service label
//! - Unknown fields are errors, not silently ignored
//! - Validation stops at the first bad record

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{ConfigError, ParseError};
pub use schema::{RouteSource, ServiceRecord, SourceFormat};
pub use validation::{InvalidReason, ValidationError};
pub use watcher::RouteWatcher;
