//! # Apply
//!
//! Create-if-absent for every dependent resource, in dependency order.

use crate::controller::reconciler::status::created_condition;
use crate::controller::reconciler::types::{Reconciler, ReconcilerError};
use crate::controller::resources::{generate, ResourceKind};
use crate::controller::store::StoreError;
use crate::crd::Wordpress;
use crate::observability;
use tracing::{debug, info};

impl Reconciler {
    /// Walk [`ResourceKind::RECONCILE_ORDER`], stopping at the first failure.
    ///
    /// Existing objects are left untouched; drift is not corrected.
    pub(super) async fn apply_dependents(
        &self,
        mut wordpress: Wordpress,
    ) -> Result<Wordpress, ReconcilerError> {
        for kind in ResourceKind::RECONCILE_ORDER {
            let resource = generate(kind, &wordpress, &self.resources);

            match self.store.create(&resource).await {
                Ok(()) => {
                    info!(kind = %kind, name = resource.name(), "created {}", kind.api_kind());
                    observability::metrics::increment_resources_created(kind);
                }
                Err(StoreError::AlreadyExists) => {
                    debug!(kind = %kind, name = resource.name(), "already exists");
                }
                Err(source) => {
                    let error = ReconcilerError::Create { kind, source };
                    self.record_failure(wordpress, kind, &error).await;
                    return Err(error);
                }
            }

            wordpress = self
                .record_condition(wordpress, created_condition(kind))
                .await?;
        }
        Ok(wordpress)
    }
}
