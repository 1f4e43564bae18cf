//! # Metrics
//!
//! Prometheus metrics for monitoring the controller.
//!
//! ## Metrics Exposed
//!
//! - `wordpress_operator_reconciliations_total` - Total number of reconciliations
//! - `wordpress_operator_reconciliation_errors_total` - Reconciliation errors by failed step
//! - `wordpress_operator_reconciliation_duration_seconds` - Duration of reconciliations
//! - `wordpress_operator_resources_created_total` - Dependent objects created, by kind
//! - `wordpress_operator_volume_claims_deleted_total` - Volume claims deleted while finalizing
//! - `wordpress_operator_finalizations_total` - Finalizers removed after cleanup
//! - `wordpress_operator_requeues_total` - Requeues by reason

use crate::controller::resources::ResourceKind;
use anyhow::Result;
use prometheus::{Histogram, IntCounter, IntCounterVec, Registry};
use std::sync::LazyLock;

// Metrics
pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static RECONCILIATIONS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "wordpress_operator_reconciliations_total",
        "Total number of reconciliations",
    )
    .expect("Failed to create RECONCILIATIONS_TOTAL metric - this should never happen")
});

static RECONCILIATION_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "wordpress_operator_reconciliation_errors_total",
            "Total number of reconciliation errors by failed step",
        ),
        &["step"],
    )
    .expect("Failed to create RECONCILIATION_ERRORS_TOTAL metric - this should never happen")
});

static RECONCILIATION_DURATION: LazyLock<Histogram> = LazyLock::new(|| {
    Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "wordpress_operator_reconciliation_duration_seconds",
            "Duration of reconciliation in seconds",
        )
        .buckets(vec![0.05, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
    )
    .expect("Failed to create RECONCILIATION_DURATION metric - this should never happen")
});

static RESOURCES_CREATED_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "wordpress_operator_resources_created_total",
            "Total number of dependent objects created by kind",
        ),
        &["kind"],
    )
    .expect("Failed to create RESOURCES_CREATED_TOTAL metric - this should never happen")
});

static VOLUME_CLAIMS_DELETED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "wordpress_operator_volume_claims_deleted_total",
        "Total number of volume claims deleted during finalization",
    )
    .expect("Failed to create VOLUME_CLAIMS_DELETED_TOTAL metric - this should never happen")
});

static FINALIZATIONS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "wordpress_operator_finalizations_total",
        "Total number of Wordpress objects released by the finalizer",
    )
    .expect("Failed to create FINALIZATIONS_TOTAL metric - this should never happen")
});

static REQUEUES_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "wordpress_operator_requeues_total",
            "Total number of requeues by reason",
        ),
        &["reason"],
    )
    .expect("Failed to create REQUEUES_TOTAL metric - this should never happen")
});

#[allow(
    clippy::missing_errors_doc,
    reason = "Only fails when a metric is registered twice"
)]
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(RECONCILIATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(RECONCILIATION_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(RECONCILIATION_DURATION.clone()))?;
    REGISTRY.register(Box::new(RESOURCES_CREATED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(VOLUME_CLAIMS_DELETED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(FINALIZATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(REQUEUES_TOTAL.clone()))?;

    Ok(())
}

pub fn increment_reconciliations() {
    RECONCILIATIONS_TOTAL.inc();
}

pub fn increment_reconciliation_errors(step: &str) {
    RECONCILIATION_ERRORS_TOTAL.with_label_values(&[step]).inc();
}

pub fn observe_reconciliation_duration(duration: f64) {
    RECONCILIATION_DURATION.observe(duration);
}

pub fn increment_resources_created(kind: ResourceKind) {
    RESOURCES_CREATED_TOTAL
        .with_label_values(&[kind.condition_field()])
        .inc();
}

pub fn increment_volume_claims_deleted() {
    VOLUME_CLAIMS_DELETED_TOTAL.inc();
}

pub fn increment_finalizations() {
    FINALIZATIONS_TOTAL.inc();
}

pub fn increment_requeues(reason: &str) {
    REQUEUES_TOTAL.with_label_values(&[reason]).inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resources_created_labelled_by_kind() {
        let before = RESOURCES_CREATED_TOTAL
            .with_label_values(&["mysqlService"])
            .get();
        increment_resources_created(ResourceKind::DatabaseExposure);
        let after = RESOURCES_CREATED_TOTAL
            .with_label_values(&["mysqlService"])
            .get();
        assert!(after > before);
    }

    #[test]
    fn test_requeues_labelled_by_reason() {
        let before = REQUEUES_TOTAL.with_label_values(&["conflict"]).get();
        increment_requeues("conflict");
        assert!(REQUEUES_TOTAL.with_label_values(&["conflict"]).get() > before);
    }
}
