//! Metrics tracking for the event processor.
//!
//! Provides atomic counters for monitoring event processing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Metrics for the event processor.
#[derive(Debug)]
pub struct EventMetrics {
    /// Total number of events applied.
    events_processed: AtomicU64,

    /// Number of flow updates applied.
    flows_processed: AtomicU64,

    /// Number of index events applied (created/updated).
    index_ops_processed: AtomicU64,

    /// Number of subscription events applied.
    subscription_ops_processed: AtomicU64,

    /// Number of flow-operator events applied.
    operator_ops_processed: AtomicU64,

    /// Number of token records created.
    tokens_created: AtomicU64,

    /// Number of events dropped for an invalid host.
    invalid_host_dropped: AtomicU64,

    /// Number of processing errors.
    errors: AtomicU64,

    /// Total processing time in nanoseconds.
    total_processing_time_ns: AtomicU64,

    /// Start time for rate calculation.
    start_time: Instant,
}

impl Default for EventMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl EventMetrics {
    /// Creates a new metrics instance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events_processed: AtomicU64::new(0),
            flows_processed: AtomicU64::new(0),
            index_ops_processed: AtomicU64::new(0),
            subscription_ops_processed: AtomicU64::new(0),
            operator_ops_processed: AtomicU64::new(0),
            tokens_created: AtomicU64::new(0),
            invalid_host_dropped: AtomicU64::new(0),
            errors: AtomicU64::new(0),
            total_processing_time_ns: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records an applied flow update.
    pub fn record_flow(&self) {
        self.events_processed.fetch_add(1, Ordering::Relaxed);
        self.flows_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an applied index event.
    pub fn record_index_op(&self) {
        self.events_processed.fetch_add(1, Ordering::Relaxed);
        self.index_ops_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an applied subscription event.
    pub fn record_subscription_op(&self) {
        self.events_processed.fetch_add(1, Ordering::Relaxed);
        self.subscription_ops_processed
            .fetch_add(1, Ordering::Relaxed);
    }

    /// Records an applied flow-operator event.
    pub fn record_operator_op(&self) {
        self.events_processed.fetch_add(1, Ordering::Relaxed);
        self.operator_ops_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a token record creation.
    pub fn record_token_created(&self) {
        self.tokens_created.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an event dropped for an invalid host.
    pub fn record_invalid_host(&self) {
        self.invalid_host_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a processing error.
    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Records time spent processing one event.
    pub fn record_processing_time(&self, duration: Duration) {
        self.total_processing_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Returns the total events applied.
    #[must_use]
    pub fn events_processed(&self) -> u64 {
        self.events_processed.load(Ordering::Relaxed)
    }

    /// Returns the number of flow updates applied.
    #[must_use]
    pub fn flows_processed(&self) -> u64 {
        self.flows_processed.load(Ordering::Relaxed)
    }

    /// Returns the number of index events applied.
    #[must_use]
    pub fn index_ops_processed(&self) -> u64 {
        self.index_ops_processed.load(Ordering::Relaxed)
    }

    /// Returns the number of subscription events applied.
    #[must_use]
    pub fn subscription_ops_processed(&self) -> u64 {
        self.subscription_ops_processed.load(Ordering::Relaxed)
    }

    /// Returns the number of flow-operator events applied.
    #[must_use]
    pub fn operator_ops_processed(&self) -> u64 {
        self.operator_ops_processed.load(Ordering::Relaxed)
    }

    /// Returns the number of token records created.
    #[must_use]
    pub fn tokens_created(&self) -> u64 {
        self.tokens_created.load(Ordering::Relaxed)
    }

    /// Returns the number of events dropped for an invalid host.
    #[must_use]
    pub fn invalid_host_dropped(&self) -> u64 {
        self.invalid_host_dropped.load(Ordering::Relaxed)
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    /// Returns the total processing time.
    #[must_use]
    pub fn total_processing_time(&self) -> Duration {
        Duration::from_nanos(self.total_processing_time_ns.load(Ordering::Relaxed))
    }

    /// Returns the events per second since start.
    #[must_use]
    pub fn events_per_second(&self) -> f64 {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.events_processed() as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Returns the error rate (0.0 to 1.0).
    #[must_use]
    pub fn error_rate(&self) -> f64 {
        let total = self.events_processed() + self.errors();
        if total == 0 {
            return 0.0;
        }
        self.errors() as f64 / total as f64
    }

    /// Returns a snapshot of all metrics.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            events_processed: self.events_processed(),
            flows_processed: self.flows_processed(),
            index_ops_processed: self.index_ops_processed(),
            subscription_ops_processed: self.subscription_ops_processed(),
            operator_ops_processed: self.operator_ops_processed(),
            tokens_created: self.tokens_created(),
            invalid_host_dropped: self.invalid_host_dropped(),
            errors: self.errors(),
            events_per_second: self.events_per_second(),
            error_rate: self.error_rate(),
        }
    }

    /// Resets all counters.
    pub fn reset(&self) {
        self.events_processed.store(0, Ordering::Relaxed);
        self.flows_processed.store(0, Ordering::Relaxed);
        self.index_ops_processed.store(0, Ordering::Relaxed);
        self.subscription_ops_processed.store(0, Ordering::Relaxed);
        self.operator_ops_processed.store(0, Ordering::Relaxed);
        self.tokens_created.store(0, Ordering::Relaxed);
        self.invalid_host_dropped.store(0, Ordering::Relaxed);
        self.errors.store(0, Ordering::Relaxed);
        self.total_processing_time_ns.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of event metrics.
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    /// Total events applied.
    pub events_processed: u64,
    /// Flow updates applied.
    pub flows_processed: u64,
    /// Index events applied.
    pub index_ops_processed: u64,
    /// Subscription events applied.
    pub subscription_ops_processed: u64,
    /// Flow-operator events applied.
    pub operator_ops_processed: u64,
    /// Token records created.
    pub tokens_created: u64,
    /// Events dropped for an invalid host.
    pub invalid_host_dropped: u64,
    /// Errors.
    pub errors: u64,
    /// Events per second.
    pub events_per_second: f64,
    /// Error rate.
    pub error_rate: f64,
}
