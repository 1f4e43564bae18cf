//! # Status
//!
//! Recording `<field>Created` conditions on the Wordpress status.

use crate::controller::reconciler::types::{Reconciler, ReconcilerError};
use crate::controller::resources::ResourceKind;
use crate::crd::{Condition, ConditionStatus, Wordpress};
use chrono::Utc;
use tracing::{debug, warn};

/// Reason recorded once a dependent has been created (or already existed)
pub const REASON_CREATED: &str = "operatorCreated";
/// Reason recorded when creating a dependent failed
pub const REASON_CREATE_FAILED: &str = "CreateFailed";

#[must_use]
pub fn created_condition(kind: ResourceKind) -> Condition {
    Condition::new(
        kind.condition_type(),
        ConditionStatus::True,
        REASON_CREATED,
        format!("{} has been created", kind.condition_field()),
        Utc::now(),
    )
}

#[must_use]
pub fn failed_condition(kind: ResourceKind, message: impl Into<String>) -> Condition {
    Condition::new(
        kind.condition_type(),
        ConditionStatus::False,
        REASON_CREATE_FAILED,
        message,
        Utc::now(),
    )
}

impl Reconciler {
    /// Merge `condition` and persist the status subresource if it changed.
    ///
    /// Returns the object as stored so later writes carry a fresh
    /// `resourceVersion`.
    pub(super) async fn record_condition(
        &self,
        mut wordpress: Wordpress,
        condition: Condition,
    ) -> Result<Wordpress, ReconcilerError> {
        let condition_type = condition.r#type.clone();
        let condition_status = condition.status;
        let changed = wordpress
            .status
            .get_or_insert_with(Default::default)
            .set_condition(condition);
        if !changed {
            debug!(condition = %condition_type, "condition unchanged, skipping status write");
            return Ok(wordpress);
        }

        debug!(
            condition = %condition_type,
            status = condition_status.as_str(),
            "persisting condition"
        );
        self.store
            .update_status(&wordpress)
            .await
            .map_err(ReconcilerError::Status)
    }

    /// Best-effort `<field>Created=False`; the caller still surfaces the original error
    pub(super) async fn record_failure(
        &self,
        wordpress: Wordpress,
        kind: ResourceKind,
        error: &ReconcilerError,
    ) {
        if let Err(status_error) = self
            .record_condition(wordpress, failed_condition(kind, error.to_string()))
            .await
        {
            warn!(
                kind = %kind,
                error = %status_error,
                "failed to record failure condition"
            );
        }
    }
}
