//! Route table metrics.
//!
//! # Metrics
//! - `routegate_reloads_total` (counter): reloads by `outcome`
//!   (`ok`, `source_unavailable`, `parse`, `validation`)
//! - `routegate_routes` (gauge): routes currently in the live table
//! - `routegate_reload_duration_seconds` (histogram): load + reconcile time
//! - `routegate_route_changes_total` (counter): per-reload changes by `change`

use std::time::Instant;

use crate::routing::ReconcileSummary;

/// Record the route count after construction or reload.
pub fn record_route_count(count: usize) {
    metrics::gauge!("routegate_routes").set(count as f64);
}

/// Record a successful reload.
pub fn record_reload_success(summary: &ReconcileSummary, start: Instant) {
    metrics::counter!("routegate_reloads_total", "outcome" => "ok").increment(1);
    metrics::histogram!("routegate_reload_duration_seconds").record(start.elapsed().as_secs_f64());

    metrics::counter!("routegate_route_changes_total", "change" => "added").increment(summary.added as u64);
    metrics::counter!("routegate_route_changes_total", "change" => "removed").increment(summary.removed as u64);
    metrics::counter!("routegate_route_changes_total", "change" => "updated").increment(summary.updated as u64);
}

/// Record a rejected reload. `kind` is `ConfigError::kind()`.
pub fn record_reload_failure(kind: &'static str, start: Instant) {
    metrics::counter!("routegate_reloads_total", "outcome" => kind).increment(1);
    metrics::histogram!("routegate_reload_duration_seconds").record(start.elapsed().as_secs_f64());
}
