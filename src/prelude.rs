//! # Prelude
//!
//! Re-exports commonly used types and traits for convenience.
//!
//! ## Usage
//!
//! ```rust
//! use wordpress_operator::prelude::*;
//! ```
//!
//! This brings into scope:
//! - All CRD types (Wordpress, WordpressStatus, Condition, etc.)
//! - The state store trait and its error type
//! - Reconciler types (Reconciler, ReconcilerError, ReconcileAction)
//! - Dependent resource types
//! - Config types (ControllerConfig, ResourceConfig)

// CRD types - most commonly used
pub use crate::crd::*;

// State store - implement this to drive the reconciler against another backend
pub use crate::controller::store::{KubeStateStore, StateStore, StoreError};

// Reconciler types - core controller functionality
pub use crate::controller::reconciler::{ReconcileAction, Reconciler, ReconcilerError};

// Dependent resources
pub use crate::controller::resources::{generate, DependentResource, ResourceKind};

// Config types - for configuration management
pub use crate::config::{ConfigError, ControllerConfig, LogFormat, ResourceConfig};
