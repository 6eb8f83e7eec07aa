//! Metrics for generation jobs.
//!
//! OpenTelemetry instruments recorded by [`crate::OperationClient`]. Without
//! an installed meter provider they are no-ops.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use std::sync::OnceLock;

static METRICS: OnceLock<GenerationMetrics> = OnceLock::new();

/// Generation job metrics, labeled by job kind ("video" or "image"),
/// provider and model.
#[derive(Clone)]
pub struct GenerationMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Jobs that reached a result
    pub completed: Counter<u64>,
    /// Jobs that ended in failure, labeled with the failure kind
    pub failures: Counter<u64>,
    /// Status queries issued while waiting on long-running jobs
    pub polls: Counter<u64>,
    /// Wall time from submit to terminal state
    pub duration: Histogram<f64>,
}

impl GenerationMetrics {
    fn init() -> Self {
        let meter = global::meter("studio_generation");

        Self {
            _meter: meter.clone(),
            completed: meter
                .u64_counter("generation.completed")
                .with_description("Generation jobs that produced a result")
                .build(),
            failures: meter
                .u64_counter("generation.failures")
                .with_description("Generation jobs that ended in failure")
                .build(),
            polls: meter
                .u64_counter("generation.polls")
                .with_description("Status queries of long-running jobs")
                .build(),
            duration: meter
                .f64_histogram("generation.duration")
                .with_unit("seconds")
                .with_description("Time from submit to terminal state")
                .build(),
        }
    }

    /// Get the global generation metrics instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    fn labels(kind: &'static str, provider: &str, model: &str) -> [KeyValue; 3] {
        [
            KeyValue::new("kind", kind),
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ]
    }

    /// Record a job that produced a result.
    pub fn record_success(&self, kind: &'static str, provider: &str, model: &str, secs: f64) {
        let labels = Self::labels(kind, provider, model);
        self.completed.add(1, &labels);
        self.duration.record(secs, &labels);
    }

    /// Record a failed job.
    pub fn record_failure(
        &self,
        kind: &'static str,
        provider: &str,
        model: &str,
        failure: &'static str,
        secs: f64,
    ) {
        let [k, p, m] = Self::labels(kind, provider, model);
        let labels = [k, p, m, KeyValue::new("failure", failure)];
        self.failures.add(1, &labels);
        self.duration.record(secs, &labels[..3]);
    }

    /// Record one status query.
    pub fn record_poll(&self, provider: &str, model: &str) {
        self.polls.add(1, &Self::labels("video", provider, model));
    }
}

impl Default for GenerationMetrics {
    fn default() -> Self {
        Self::get().clone()
    }
}
