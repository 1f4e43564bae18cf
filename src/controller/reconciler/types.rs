//! # Types
//!
//! Core types for the reconciler.

use crate::config::ResourceConfig;
use crate::controller::resources::ResourceKind;
use crate::controller::store::{StateStore, StoreError};
use kube_runtime::controller::Action;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconcilerError {
    #[error("failed to load Wordpress: {0}")]
    Load(#[source] StoreError),
    #[error("failed to create {kind}: {source}")]
    Create {
        kind: ResourceKind,
        #[source]
        source: StoreError,
    },
    #[error("failed to delete {kind} while finalizing: {source}")]
    Finalize {
        kind: ResourceKind,
        #[source]
        source: StoreError,
    },
    #[error("failed to update finalizers: {0}")]
    Finalizer(#[source] StoreError),
    #[error("failed to persist status: {0}")]
    Status(#[source] StoreError),
}

impl ReconcilerError {
    /// Underlying store failure
    #[must_use]
    pub fn store_error(&self) -> &StoreError {
        match self {
            ReconcilerError::Load(source)
            | ReconcilerError::Finalizer(source)
            | ReconcilerError::Status(source)
            | ReconcilerError::Create { source, .. }
            | ReconcilerError::Finalize { source, .. } => source,
        }
    }

    /// Optimistic-concurrency conflict; retried after a short fixed delay
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        self.store_error().is_conflict()
    }

    /// Short label for metrics and logs
    #[must_use]
    pub fn step(&self) -> &'static str {
        match self {
            ReconcilerError::Load(_) => "load",
            ReconcilerError::Create { .. } => "create",
            ReconcilerError::Finalize { .. } => "finalize",
            ReconcilerError::Finalizer(_) => "finalizer",
            ReconcilerError::Status(_) => "status",
        }
    }
}

/// Scheduling instruction returned by a successful reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileAction {
    /// Nothing left to do until the object changes again
    Done,
    /// Run again right away
    Requeue,
    /// Re-assert state after the given delay
    RequeueAfter(Duration),
}

impl ReconcileAction {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ReconcileAction::Done => "done",
            ReconcileAction::Requeue => "requeue",
            ReconcileAction::RequeueAfter(_) => "resync",
        }
    }
}

impl From<ReconcileAction> for Action {
    fn from(action: ReconcileAction) -> Self {
        match action {
            ReconcileAction::Done => Action::await_change(),
            ReconcileAction::Requeue => Action::requeue(Duration::ZERO),
            ReconcileAction::RequeueAfter(delay) => Action::requeue(delay),
        }
    }
}

/// Reconciliation engine for `Wordpress` objects.
///
/// Holds no per-object state; one instance is shared by every concurrent
/// reconciliation.
#[derive(Clone)]
pub struct Reconciler {
    pub(super) store: Arc<dyn StateStore>,
    pub(super) resources: Arc<ResourceConfig>,
    pub(super) resync_interval: Duration,
}

impl std::fmt::Debug for Reconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reconciler")
            .field("resources", &self.resources)
            .field("resync_interval", &self.resync_interval)
            .finish_non_exhaustive()
    }
}

impl Reconciler {
    pub fn new(
        store: Arc<dyn StateStore>,
        resources: Arc<ResourceConfig>,
        resync_interval: Duration,
    ) -> Self {
        Self {
            store,
            resources,
            resync_interval,
        }
    }

    #[must_use]
    pub fn resync_interval(&self) -> Duration {
        self.resync_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_detection_through_wrapper() {
        assert!(ReconcilerError::Finalizer(StoreError::Conflict).is_conflict());
        assert!(ReconcilerError::Status(StoreError::Conflict).is_conflict());
        assert!(!ReconcilerError::Create {
            kind: ResourceKind::Credential,
            source: StoreError::NotFound,
        }
        .is_conflict());
    }

    #[test]
    fn test_error_messages_name_the_failed_step() {
        let error = ReconcilerError::Create {
            kind: ResourceKind::AppWorkload,
            source: StoreError::Conflict,
        };
        assert_eq!(
            error.to_string(),
            "failed to create wordpressDeployment: object was modified concurrently"
        );
        assert_eq!(error.step(), "create");
    }

    #[test]
    fn test_actions_map_to_runtime_actions() {
        assert_eq!(Action::from(ReconcileAction::Done), Action::await_change());
        assert_eq!(
            Action::from(ReconcileAction::RequeueAfter(Duration::from_secs(300))),
            Action::requeue(Duration::from_secs(300))
        );
        assert_eq!(ReconcileAction::Requeue.as_str(), "requeue");
    }
}
