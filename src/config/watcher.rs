//! Route source watcher for hot reload.

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::loader::ConfigError;
use crate::routing::{ReconcileSummary, Router};

/// Result of one watcher-triggered reload.
pub type ReloadOutcome = Result<ReconcileSummary, ConfigError>;

/// Reloads a router whenever its route source changes on disk.
pub struct RouteWatcher {
    router: Arc<Router>,
    poll_interval: Duration,
    outcome_tx: mpsc::UnboundedSender<ReloadOutcome>,
}

impl RouteWatcher {
    /// Create a watcher for `router`'s source.
    ///
    /// Returns the watcher and a receiver of reload outcomes.
    pub fn new(router: Arc<Router>) -> (Self, mpsc::UnboundedReceiver<ReloadOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        (
            Self {
                router,
                poll_interval: Duration::from_secs(2),
                outcome_tx,
            },
            outcome_rx,
        )
    }

    /// Poll interval used by backends without native change events.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Start watching. Events arrive on notify's own thread, where the
    /// blocking reload runs. Dropping the returned watcher stops it.
    ///
    /// The parent directory is watched rather than the file, so editors that
    /// save by rename-and-replace keep triggering reloads.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let source_path = self.router.source().path().to_path_buf();
        let file_name = source_path.file_name().map(OsString::from);
        let watch_dir = watch_dir(&source_path);
        let router = Arc::clone(&self.router);
        let tx = self.outcome_tx.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create()) {
                        return;
                    }
                    if !touches(&event, file_name.as_deref()) {
                        return;
                    }
                    tracing::info!("Route source change detected, reloading...");
                    let _ = tx.send(router.reload());
                }
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(self.poll_interval),
        )?;

        watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?source_path, "Route watcher started");
        Ok(watcher)
    }
}

fn watch_dir(source_path: &Path) -> PathBuf {
    match source_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn touches(event: &Event, file_name: Option<&std::ffi::OsStr>) -> bool {
    match file_name {
        Some(name) => event.paths.iter().any(|p| p.file_name() == Some(name)),
        None => true,
    }
}
