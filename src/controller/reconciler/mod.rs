//! # Reconciler
//!
//! Core reconciliation logic for `Wordpress` resources.
//!
//! The reconciler:
//! - Records the `wordpress.example.com` finalizer before anything else
//! - Creates the credential Secret, both volume claims, both Deployments and
//!   both Services, in that order, leaving existing objects alone
//! - Tracks a `<field>Created` condition per dependent in the status
//! - Deletes the volume claims on teardown unless `retainVolumes` is set
//!
//! All cluster access goes through the injected
//! [`StateStore`](crate::controller::store::StateStore).

pub mod apply;
pub mod finalize;
pub mod reconcile;
pub mod status;
pub mod types;

// Re-export public API
pub use finalize::has_finalizer;
pub use status::{REASON_CREATED, REASON_CREATE_FAILED};
pub use types::{ReconcileAction, Reconciler, ReconcilerError};
