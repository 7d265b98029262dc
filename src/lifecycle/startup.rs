//! Long-running watch mode.
//!
//! # Responsibilities
//! - Open the router (fail fast on an invalid source)
//! - Start the file watcher and the SIGHUP handler
//! - Log every reload outcome until shutdown
//!
//! # Design Decisions
//! - Startup errors are returned, never swallowed
//! - A failed reload is logged and the previous routes keep serving

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::{ConfigError, RouteSource, RouteWatcher};
use crate::lifecycle::{signals, Shutdown};
use crate::routing::Router;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot watch route source: {0}")]
    Watch(#[from] notify::Error),
}

/// Options for `run_watch`.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub source: RouteSource,
    pub poll_interval: Duration,
}

/// Serve `source` until ctrl-c/SIGTERM, reloading on change and SIGHUP.
pub async fn run_watch(options: WatchOptions) -> Result<(), StartupError> {
    let router = Arc::new(Router::open(options.source)?);

    let (watcher, mut outcomes) = RouteWatcher::new(Arc::clone(&router));
    let _watcher = watcher.with_poll_interval(options.poll_interval).run()?;

    let shutdown = Shutdown::new();
    let hangup = tokio::spawn(signals::reload_on_hangup(
        Arc::clone(&router),
        shutdown.subscribe(),
    ));

    let mut stop = shutdown.subscribe();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        shutdown.trigger();
    });

    loop {
        tokio::select! {
            Some(outcome) = outcomes.recv() => match outcome {
                Ok(summary) if summary.is_noop() => {
                    tracing::debug!("Route source touched, no route changed");
                }
                Ok(summary) => {
                    tracing::info!(
                        added = summary.added,
                        removed = summary.removed,
                        updated = summary.updated,
                        "Watcher reload applied"
                    );
                }
                Err(e) => {
                    tracing::warn!(kind = e.kind(), error = %e, "Watcher reload rejected");
                }
            },
            _ = stop.recv() => break,
        }
    }

    match hangup.await {
        Ok(Err(e)) => tracing::warn!(error = %e, "SIGHUP handler failed"),
        Err(e) => tracing::warn!(error = %e, "SIGHUP handler panicked"),
        Ok(Ok(())) => {}
    }

    tracing::info!(routes = router.table().len(), "Watch stopped");
    Ok(())
}
