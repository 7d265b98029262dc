//! Live route table for a request gateway.
//!
//! A `Router` maps request paths to backend service entries. It is built once
//! from a route source and reloaded in place while lookups keep running.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::{ConfigError, RouteSource, SourceFormat};
pub use lifecycle::Shutdown;
pub use routing::{Entry, ReconcileSummary, RouteTable, Router};
