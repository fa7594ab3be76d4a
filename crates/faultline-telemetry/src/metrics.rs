//! Metric names and recording helpers

use std::sync::OnceLock;

use opentelemetry::KeyValue;
use opentelemetry::metrics::Counter;

/// Normalized failures, by sub-type, category and status
pub const ERRORS_COUNT: &str = "faultline.errors.count";

fn errors_counter() -> &'static Counter<u64> {
    static COUNTER: OnceLock<Counter<u64>> = OnceLock::new();
    COUNTER.get_or_init(|| {
        opentelemetry::global::meter("faultline")
            .u64_counter(ERRORS_COUNT)
            .with_description("Failures translated into error envelopes")
            .build()
    })
}

/// Count one translated failure
///
/// A no-op until a meter provider is installed.
pub fn record_error(sub_type: &'static str, category: &'static str, status: u16) {
    errors_counter().add(
        1,
        &[
            KeyValue::new("sub_type", sub_type),
            KeyValue::new("category", category),
            KeyValue::new("http.response.status_code", i64::from(status)),
        ],
    );
}
