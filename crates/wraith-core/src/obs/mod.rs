//! Observability for the proxy lifecycle.
//!
//! Lifecycle logic MUST NOT touch the metrics state directly.
//! All instrumentation flows through ProxyEvent and EventSink.

pub mod sink;

pub use sink::{EventSink, ProxyEvent, with_event_sink};
pub(crate) use sink::record;

use serde::Serialize;
use std::cell::RefCell;

///
/// ProxyMetrics
///
/// Process-local lifecycle counters, accumulated by the default sink.
///

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct ProxyMetrics {
    pub init_started: u64,
    pub init_completed: u64,
    pub init_failed: u64,
    pub loads_issued: u64,
    pub clones_finalized: u64,
    pub payloads_built: u64,
    pub sleep_properties_missing: u64,
}

thread_local! {
    static METRICS: RefCell<ProxyMetrics> = RefCell::new(ProxyMetrics::default());
}

pub(crate) fn with_state_mut<T>(f: impl FnOnce(&mut ProxyMetrics) -> T) -> T {
    METRICS.with(|cell| f(&mut cell.borrow_mut()))
}

/// Snapshot the current metrics state for endpoint/test plumbing.
#[must_use]
pub fn metrics_report() -> ProxyMetrics {
    METRICS.with(|cell| *cell.borrow())
}

/// Reset all metrics counters.
pub fn metrics_reset_all() {
    METRICS.with(|cell| {
        *cell.borrow_mut() = ProxyMetrics::default();
    });
}
