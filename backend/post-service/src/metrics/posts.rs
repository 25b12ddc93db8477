use crate::error::PostError;
use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};
use std::time::Duration;

lazy_static! {
    /// Store operations segmented by operation and outcome (ok or error kind).
    pub static ref POST_REPO_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "post_repo_operations_total",
        "Post store operations segmented by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("failed to register post_repo_operations_total");

    pub static ref POST_REPO_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "post_repo_operation_duration_seconds",
        "Post store operation latency including connection acquisition",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("failed to register post_repo_operation_duration_seconds");
}

pub fn outcome_label<T>(result: &Result<T, PostError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(err) => err.kind().as_str(),
    }
}

pub fn record_operation(operation: &str, outcome: &str, elapsed: Duration) {
    POST_REPO_OPERATIONS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
    POST_REPO_OPERATION_DURATION_SECONDS
        .with_label_values(&[operation])
        .observe(elapsed.as_secs_f64());
}
