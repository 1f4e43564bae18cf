//! # Error Policy
//!
//! Requeue decisions for failed reconciliations.
//!
//! A write conflict means another writer got there first; the object is
//! re-read and retried after a short fixed delay. Every other failure is
//! retried with a Fibonacci backoff tracked per object, so one broken
//! Wordpress does not slow down retries for the rest.

use crate::controller::reconciler::ReconcilerError;
use crate::crd::Wordpress;
use crate::observability;
use crate::runtime::context::ControllerContext;
use kube::ResourceExt;
use kube_runtime::controller::{self, Action};
use kube_runtime::watcher;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Error type yielded by the controller stream
pub type StreamError = controller::Error<ReconcilerError, watcher::Error>;

/// `namespace/name` key used for per-object bookkeeping
#[must_use]
pub fn object_key(wordpress: &Wordpress) -> String {
    format!(
        "{}/{}",
        wordpress.namespace().unwrap_or_default(),
        wordpress.name_any()
    )
}

/// Handle reconciliation errors with conflict requeue or Fibonacci backoff
pub fn handle_reconciliation_error(
    obj: Arc<Wordpress>,
    error: &ReconcilerError,
    ctx: Arc<ControllerContext>,
) -> Action {
    let resource_key = object_key(&obj);

    let error_span = tracing::span!(
        tracing::Level::ERROR,
        "controller.watch.reconciliation_error",
        resource.key = resource_key.as_str(),
        step = error.step(),
        error = %error
    );
    let _error_guard = error_span.enter();

    observability::metrics::increment_reconciliation_errors(error.step());

    if error.is_conflict() {
        warn!(
            "Conflict while reconciling {}, retrying in {}s",
            resource_key, ctx.config.conflict_requeue_secs
        );
        observability::metrics::increment_requeues("conflict");
        return Action::requeue(ctx.config.conflict_requeue());
    }

    error!("Reconciliation error for {}: {}", resource_key, error);

    let (delay, error_count) = ctx.next_error_backoff(&resource_key);
    info!(
        "Retrying with Fibonacci backoff: {}s (error count: {})",
        delay.as_secs(),
        error_count
    );

    observability::metrics::increment_requeues("error-backoff");
    Action::requeue(delay)
}

/// Handle an error surfaced on the controller stream.
///
/// A scheduled retry for an object that has since left the watch cache comes
/// back as `ObjectNotFound`; its backoff history is dropped so deleted objects
/// do not accumulate in the context.
pub fn handle_stream_error(error: &StreamError, ctx: &ControllerContext) {
    match error {
        controller::Error::ObjectNotFound(obj_ref) => {
            let resource_key = format!(
                "{}/{}",
                obj_ref.namespace.as_deref().unwrap_or_default(),
                obj_ref.name
            );
            ctx.reset_backoff(&resource_key);
            debug!(
                resource.key = resource_key.as_str(),
                "object no longer exists, dropped backoff state"
            );
        }
        other => {
            warn!(error = %other, "watch.event.reconciliation_failed");
        }
    }
}
