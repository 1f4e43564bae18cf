//! # Reconciliation Logic
//!
//! Entry point of the engine: load, then branch on the finalizer protocol.
//!
//! | Object state                         | Outcome                                   |
//! |--------------------------------------|-------------------------------------------|
//! | absent                               | `Done`                                    |
//! | deleting, finalizer present          | finalize, drop finalizer, `Done`          |
//! | deleting, finalizer absent           | `Done`                                    |
//! | active, finalizer absent             | add finalizer, `Requeue`                  |
//! | active, finalizer present            | create dependents, `RequeueAfter(resync)` |

use crate::controller::reconciler::finalize::has_finalizer;
use crate::controller::reconciler::types::{ReconcileAction, Reconciler, ReconcilerError};
use kube::Resource;
use tracing::{debug, instrument};

impl Reconciler {
    /// Run one reconciliation pass for `namespace/name`.
    ///
    /// The object is always re-read from the store so the pass works on fresh
    /// state; a write conflict is surfaced as an error and the whole pass is
    /// retried by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcilerError`] naming the step that failed.
    #[instrument(skip(self), fields(resource.kind = "Wordpress"))]
    pub async fn reconcile(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<ReconcileAction, ReconcilerError> {
        let Some(wordpress) = self
            .store
            .get_wordpress(namespace, name)
            .await
            .map_err(ReconcilerError::Load)?
        else {
            debug!("Wordpress no longer exists");
            return Ok(ReconcileAction::Done);
        };

        if wordpress.meta().deletion_timestamp.is_some() {
            if has_finalizer(&wordpress) {
                self.finalize(wordpress).await?;
            } else {
                debug!("deletion already finalized");
            }
            return Ok(ReconcileAction::Done);
        }

        if !has_finalizer(&wordpress) {
            self.add_finalizer(wordpress).await?;
            return Ok(ReconcileAction::Requeue);
        }

        self.apply_dependents(wordpress).await?;
        Ok(ReconcileAction::RequeueAfter(self.resync_interval))
    }
}
