//! OS signal handling.
//!
//! # Responsibilities
//! - SIGINT/ctrl-c and SIGTERM: stop the process
//! - SIGHUP: reload the route table
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - SIGHUP triggers a reload, not shutdown
//! - Reloads run on the blocking pool; they read files and take the
//!   router's reload mutex

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::routing::Router;

/// Resolve when the process is asked to stop.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received ctrl-c"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}

/// Reload `router` on every SIGHUP until `shutdown` fires.
#[cfg(unix)]
pub async fn reload_on_hangup(
    router: Arc<Router>,
    mut shutdown: broadcast::Receiver<()>,
) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())?;
    loop {
        tokio::select! {
            _ = hangup.recv() => {
                tracing::info!("Received SIGHUP, reloading routes");
                let router = Arc::clone(&router);
                // Outcome is logged by Router::reload itself.
                if let Err(e) = tokio::task::spawn_blocking(move || router.reload()).await {
                    tracing::error!(error = %e, "Reload task failed");
                }
            }
            _ = shutdown.recv() => {
                tracing::debug!("SIGHUP handler exiting");
                return Ok(());
            }
        }
    }
}

/// SIGHUP does not exist here; wait for shutdown only.
#[cfg(not(unix))]
pub async fn reload_on_hangup(
    _router: Arc<Router>,
    mut shutdown: broadcast::Receiver<()>,
) -> std::io::Result<()> {
    let _ = shutdown.recv().await;
    Ok(())
}
