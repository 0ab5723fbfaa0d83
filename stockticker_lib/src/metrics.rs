//! Process-wide counters for upstream and cache access.
//!
//! Each operation records a call count, an error count and the cumulative
//! duration. The front door renders a snapshot in Prometheus text format.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Call/error/duration counters for one operation.
#[derive(Default)]
pub struct OperationStats {
    calls: AtomicU64,
    errors: AtomicU64,
    duration_micros: AtomicU64,
}

impl OperationStats {
    /// Records one completed call.
    pub fn record(&self, elapsed: Duration, ok: bool) {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.errors.fetch_add(1, Ordering::Relaxed);
        }
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.duration_micros.fetch_add(micros, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> OperationSnapshot {
        OperationSnapshot {
            calls: self.calls.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
            duration_seconds: self.duration_micros.load(Ordering::Relaxed) as f64 / 1_000_000.0,
        }
    }
}

/// Point-in-time copy of an [`OperationStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct OperationSnapshot {
    pub calls: u64,
    pub errors: u64,
    pub duration_seconds: f64,
}

/// Counters kept by the stock controller.
#[derive(Default)]
pub struct StockMetrics {
    /// Upstream daily series requests.
    pub client_daily: OperationStats,
    /// Cache reads.
    pub cache_read: OperationStats,
    /// Cache writes.
    pub cache_write: OperationStats,
}

impl StockMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            client_daily: self.client_daily.snapshot(),
            cache_read: self.cache_read.snapshot(),
            cache_write: self.cache_write.snapshot(),
        }
    }
}

/// Point-in-time copy of all controller counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub client_daily: OperationSnapshot,
    pub cache_read: OperationSnapshot,
    pub cache_write: OperationSnapshot,
}
