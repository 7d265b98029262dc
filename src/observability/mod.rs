//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Loader / Reconciler / Router
//!     → tracing events (structured fields)
//!     → metrics.rs (reload outcomes, route count, reload latency)
//!
//! Binary:
//!     → logging.rs installs the subscriber (library code never does)
//! ```
//!
//! # Design Decisions
//! - Structured fields over formatted strings
//! - Metrics go through the `metrics` facade; whoever embeds the router
//!   chooses the recorder, without one they are no-ops

pub mod logging;
pub mod metrics;
