//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global tracing subscriber for the binary
//! - Resolve the log level from `RUST_LOG`, falling back to the CLI flag
//!
//! # Design Decisions
//! - `RUST_LOG` wins so operators can raise verbosity without new flags
//! - An unparsable level falls back to `info` instead of failing startup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter: `RUST_LOG` if set, else `routegate=<level>`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("routegate={}", default_level)))
        .unwrap_or_else(|_| EnvFilter::new("routegate=info"))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(default_level: &str) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(default_level))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
