//! Prometheus metrics & middleware helper.

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use once_cell::sync::Lazy;
use prometheus::core::Collector;
use prometheus::{IntCounter, IntGauge};

/// Global Prometheus handle reused in tests.
pub static METRICS: Lazy<PrometheusMetrics> = Lazy::new(|| {
    PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics") // exposed URL
        .build()
        .expect("metrics builder")
});

/// Players in the currently served snapshot.
pub static SNAPSHOT_PLAYERS: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("snapshot_players", "Players in the current data snapshot").expect("metric")
});

/// Unix timestamp of the last successful refresh.
pub static LAST_REFRESH: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "last_refresh_timestamp_seconds",
        "When the snapshot was last replaced",
    )
    .expect("metric")
});

/// Refresh cycles that failed and kept the previous snapshot.
pub static REFRESH_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("refresh_failures_total", "Failed data refresh cycles").expect("metric")
});

/// Attach the snapshot metrics to the middleware registry. Safe to call more
/// than once; re-registration errors are ignored.
pub fn register_domain_metrics() {
    let collectors: [Box<dyn Collector>; 3] = [
        Box::new(SNAPSHOT_PLAYERS.clone()),
        Box::new(LAST_REFRESH.clone()),
        Box::new(REFRESH_FAILURES.clone()),
    ];
    for collector in collectors {
        let _ = METRICS.registry.register(collector);
    }
}
