//! Page-level metrics for the HTTP API.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};

/// Story page metrics, labeled by operation (`start`, `continue`, `end`).
#[derive(Clone)]
pub struct PageMetrics {
    _meter: Meter,
    /// Pages served
    pub pages: Counter<u64>,
    /// Page requests that failed
    pub failures: Counter<u64>,
    /// End-to-end page latency in seconds
    pub duration: Histogram<f64>,
}

impl PageMetrics {
    /// Create page metrics on the global meter.
    pub fn new() -> Self {
        let meter = global::meter("taleweaver_pages");

        Self {
            _meter: meter.clone(),
            pages: meter
                .u64_counter("story.pages")
                .with_description("Story pages served")
                .build(),
            failures: meter
                .u64_counter("story.page_failures")
                .with_description("Story page requests that failed")
                .build(),
            duration: meter
                .f64_histogram("story.page_duration")
                .with_unit("seconds")
                .with_description("Story page latency including media")
                .build(),
        }
    }

    /// Record a served page.
    pub fn record_page(&self, operation: &'static str, provider: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("operation", operation),
            KeyValue::new("provider", provider.to_string()),
        ];
        self.pages.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a failed page request.
    pub fn record_failure(&self, operation: &'static str) {
        self.failures
            .add(1, &[KeyValue::new("operation", operation)]);
    }
}

impl Default for PageMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PageMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageMetrics").finish_non_exhaustive()
    }
}
