//! # State Store
//!
//! Gateway between the reconciliation engine and the cluster.
//!
//! The engine only ever talks to a [`StateStore`]; [`KubeStateStore`] is the
//! production implementation on top of `kube::Api`. Unit tests use the
//! generated `MockStateStore`, integration tests an in-memory store.
//!
//! Every implementation must classify failures the same way: a missing object
//! is [`StoreError::NotFound`], a create that collides with an existing object
//! is [`StoreError::AlreadyExists`], and a write against a stale
//! `resourceVersion` is [`StoreError::Conflict`].

mod cluster;

pub use cluster::KubeStateStore;

use crate::controller::resources::{DependentResource, ResourceKind};
use crate::crd::Wordpress;
use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// Failures surfaced by a [`StateStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object not found")]
    NotFound,
    #[error("object already exists")]
    AlreadyExists,
    #[error("object was modified concurrently")]
    Conflict,
    #[error("Kubernetes API error: {0}")]
    Api(kube::Error),
    #[error("failed to serialize request body: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    /// Transient write conflict; retry soon with a fresh read
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict)
    }
}

impl From<kube::Error> for StoreError {
    fn from(error: kube::Error) -> Self {
        match &error {
            kube::Error::Api(api_err) if api_err.code == 404 => StoreError::NotFound,
            kube::Error::Api(api_err) if api_err.code == 409 => {
                if api_err.reason == "AlreadyExists" {
                    StoreError::AlreadyExists
                } else {
                    StoreError::Conflict
                }
            }
            _ => StoreError::Api(error),
        }
    }
}

/// Read/write access to `Wordpress` objects and their dependents
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Fetch a Wordpress, `None` when it does not exist
    async fn get_wordpress(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<Wordpress>, StoreError>;

    /// Create a dependent object in its own namespace
    ///
    /// Never overwrites: an existing object yields [`StoreError::AlreadyExists`].
    async fn create(&self, resource: &DependentResource) -> Result<(), StoreError>;

    /// Replace the Wordpress object (metadata and spec)
    ///
    /// Uses the object's `resourceVersion` for optimistic concurrency.
    async fn update(&self, wordpress: &Wordpress) -> Result<Wordpress, StoreError>;

    /// Delete a dependent object by kind and name
    async fn delete(
        &self,
        kind: ResourceKind,
        namespace: &str,
        name: &str,
    ) -> Result<(), StoreError>;

    /// Persist the status subresource of a Wordpress
    async fn update_status(&self, wordpress: &Wordpress) -> Result<Wordpress, StoreError>;
}
