//! # Controller
//!
//! Core controller modules for the Wordpress operator.
//!
//! - `backoff`: Fibonacci backoff mechanism for retries
//! - `reconciler`: Reconciliation engine and finalizer protocol
//! - `resources`: Builders for the seven dependent objects
//! - `server`: HTTP server for metrics and health checks
//! - `store`: Gateway to the cluster state

pub mod backoff;
pub mod reconciler;
pub mod resources;
pub mod server;
pub mod store;
