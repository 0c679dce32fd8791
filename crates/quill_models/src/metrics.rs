//! Metrics for model calls.
//!
//! Provides OpenTelemetry instruments for request volume, failures, timeouts
//! and latency. Without an installed meter provider they are no-ops.

use opentelemetry::{
    KeyValue, global,
    metrics::{Counter, Histogram, Meter},
};
use quill_error::ModelErrorKind;
use std::sync::OnceLock;

static METRICS: OnceLock<LlmMetrics> = OnceLock::new();

/// Instruments for model calls, labelled by provider and model.
#[derive(Clone)]
pub struct LlmMetrics {
    /// Meter handle kept alive for metric instruments
    _meter: Meter,
    /// Total model calls
    pub requests: Counter<u64>,
    /// Calls that ended in a classified error
    pub errors: Counter<u64>,
    /// Calls that ran out of time
    pub timeouts: Counter<u64>,
    /// Call duration in seconds
    pub duration: Histogram<f64>,
}

impl LlmMetrics {
    fn init() -> Self {
        let meter = global::meter("quill_llm");

        Self {
            _meter: meter.clone(),
            requests: meter
                .u64_counter("llm.requests")
                .with_description("Total model calls")
                .build(),
            errors: meter
                .u64_counter("llm.errors")
                .with_description("Failed model calls")
                .build(),
            timeouts: meter
                .u64_counter("llm.timeouts")
                .with_description("Model calls that exceeded their bound")
                .build(),
            duration: meter
                .f64_histogram("llm.duration")
                .with_unit("seconds")
                .with_description("Model call duration")
                .build(),
        }
    }

    /// Get the global instance.
    pub fn get() -> &'static Self {
        METRICS.get_or_init(Self::init)
    }

    /// Record a finished call, whatever its outcome.
    pub fn record_request(&self, provider: &str, model: &str, duration_secs: f64) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.requests.add(1, labels);
        self.duration.record(duration_secs, labels);
    }

    /// Record a classified failure.
    pub fn record_error(&self, provider: &str, model: &str, kind: &ModelErrorKind) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
            KeyValue::new("error_type", error_label(kind)),
        ];
        self.errors.add(1, labels);
    }

    /// Record an elapsed bound.
    pub fn record_timeout(&self, provider: &str, model: &str) {
        let labels = &[
            KeyValue::new("provider", provider.to_string()),
            KeyValue::new("model", model.to_string()),
        ];
        self.timeouts.add(1, labels);
    }
}

fn error_label(kind: &ModelErrorKind) -> &'static str {
    match kind {
        ModelErrorKind::Unreachable(_) => "unreachable",
        ModelErrorKind::MalformedResponse(_) => "malformed_response",
        ModelErrorKind::ModelNotFound(_) => "model_not_found",
        ModelErrorKind::Unknown(_) => "unknown",
    }
}
