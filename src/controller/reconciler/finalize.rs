//! # Finalize
//!
//! Finalizer bookkeeping and the cleanup that runs before a Wordpress goes away.
//!
//! Owned dependents are garbage collected by the API server. The two volume
//! claims are not owned, so they are deleted here unless `retainVolumes` is
//! set. The finalizer is only removed after every delete succeeded; a failed
//! delete leaves the object Terminating until a later pass gets through.

use crate::controller::reconciler::types::{Reconciler, ReconcilerError};
use crate::controller::resources::ResourceKind;
use crate::controller::store::StoreError;
use crate::crd::{Wordpress, WORDPRESS_FINALIZER};
use crate::observability;
use kube::ResourceExt;
use tracing::{debug, info};

#[must_use]
pub fn has_finalizer(wordpress: &Wordpress) -> bool {
    wordpress
        .finalizers()
        .iter()
        .any(|finalizer| finalizer == WORDPRESS_FINALIZER)
}

impl Reconciler {
    /// Record the finalizer before any dependent is created
    pub(super) async fn add_finalizer(
        &self,
        mut wordpress: Wordpress,
    ) -> Result<Wordpress, ReconcilerError> {
        wordpress
            .finalizers_mut()
            .push(WORDPRESS_FINALIZER.to_string());
        let updated = self
            .store
            .update(&wordpress)
            .await
            .map_err(ReconcilerError::Finalizer)?;
        info!("added finalizer {WORDPRESS_FINALIZER}");
        Ok(updated)
    }

    /// Delete unretained volume claims, then drop the finalizer
    pub(super) async fn finalize(&self, mut wordpress: Wordpress) -> Result<(), ReconcilerError> {
        if wordpress.spec.retain_volumes {
            info!("retainVolumes set, leaving volume claims in place");
        } else {
            let namespace = wordpress.namespace().unwrap_or_default();
            for kind in ResourceKind::VOLUME_CLAIMS {
                let name = kind.object_name(&self.resources);
                match self.store.delete(kind, &namespace, name).await {
                    Ok(()) => {
                        info!(kind = %kind, name, "deleted volume claim");
                        observability::metrics::increment_volume_claims_deleted();
                    }
                    Err(StoreError::NotFound) => {
                        debug!(kind = %kind, name, "volume claim already gone");
                    }
                    Err(source) => return Err(ReconcilerError::Finalize { kind, source }),
                }
            }
        }

        wordpress
            .finalizers_mut()
            .retain(|finalizer| finalizer != WORDPRESS_FINALIZER);
        self.store
            .update(&wordpress)
            .await
            .map_err(ReconcilerError::Finalizer)?;
        observability::metrics::increment_finalizations();
        info!("removed finalizer {WORDPRESS_FINALIZER}");
        Ok(())
    }
}
