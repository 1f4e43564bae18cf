//! # Custom Resource Definitions
//!
//! CRD types for the Wordpress operator.
//!
//! ## Module Structure
//!
//! - `spec.rs` - The `Wordpress` custom resource and its spec
//! - `status.rs` - Status types and the condition merge rules

mod spec;
mod status;

pub use spec::{default_false, Wordpress, WordpressSpec, WORDPRESS_FINALIZER};
pub use status::{Condition, ConditionStatus, WordpressStatus};
