//! # Runtime
//!
//! Process wiring around the reconciler: startup, the kube-runtime watch
//! loop and the requeue policy for failed reconciliations.

pub mod context;
pub mod error_policy;
pub mod initialization;
pub mod watch_loop;

pub use context::ControllerContext;
pub use initialization::{initialize, InitializationResult};
pub use watch_loop::run_watch_loop;
