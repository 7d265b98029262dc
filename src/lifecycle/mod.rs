//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Open router → Start watcher → Start SIGHUP handler
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → background tasks exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//!     SIGHUP → Trigger route reload
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
